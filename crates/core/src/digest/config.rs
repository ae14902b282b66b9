//! Digest parameters.

use crate::codec::Alphabet;
use crate::error::{Rc4HashError, Result};

/// Default digest length in bits.
pub const DEFAULT_DIGEST_BITS: u64 = 256;

/// Keystream bytes dropped before digest output starts.
pub const DEFAULT_WARMUP: usize = 3072;

/// Validated, immutable digest parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestConfig {
    digest_bits: u64,
    alphabet: Alphabet,
    warmup: usize,
}

impl DigestConfig {
    /// Digest of `digest_bits` bits rendered in `alphabet`.
    ///
    /// The length must be non-zero and pass [`Alphabet::accepts_length`].
    pub fn new(digest_bits: u64, alphabet: Alphabet) -> Result<Self> {
        if digest_bits == 0 {
            return Err(Rc4HashError::ZeroDigestSize);
        }
        if !alphabet.accepts_length(digest_bits) {
            return Err(Rc4HashError::MisalignedDigestSize {
                bits: digest_bits,
                alphabet,
            });
        }
        Ok(Self {
            digest_bits,
            alphabet,
            warmup: DEFAULT_WARMUP,
        })
    }

    /// Digest of `digest_bytes` bytes rendered in `alphabet`.
    pub fn from_bytes(digest_bytes: u64, alphabet: Alphabet) -> Result<Self> {
        let bits = digest_bytes
            .checked_mul(8)
            .ok_or(Rc4HashError::DigestSizeOverflow(digest_bytes))?;
        Self::new(bits, alphabet)
    }

    /// Replace the number of discarded warm-up bytes.
    pub fn with_warmup(self, warmup: usize) -> Self {
        Self { warmup, ..self }
    }

    pub fn digest_bits(&self) -> u64 {
        self.digest_bits
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn warmup(&self) -> usize {
        self.warmup
    }

    pub fn symbol_bits(&self) -> u32 {
        self.alphabet.symbol_bits()
    }

    /// Number of symbols a digest with these parameters has.
    pub fn symbol_count(&self) -> u64 {
        self.digest_bits.div_ceil(u64::from(self.symbol_bits()))
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            digest_bits: DEFAULT_DIGEST_BITS,
            alphabet: Alphabet::default(),
            warmup: DEFAULT_WARMUP,
        }
    }
}
