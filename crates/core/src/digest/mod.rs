//! RC4-based message digest.
//!
//! The whole input is scheduled as an RC4 key, the first
//! [`DigestConfig::warmup`] keystream bytes are dropped, and the following
//! keystream bits are sliced into symbols of the configured alphabet.
//!
//! [`digest`] and [`digest_reader`] collect the symbols into a [`Digest`].
//! Digest lengths are unbounded, so callers that emit long digests should
//! use [`digest_reader_into`] or [`write_symbols`], which run in constant
//! memory.

pub mod config;
pub mod packer;

pub use config::{DEFAULT_DIGEST_BITS, DEFAULT_WARMUP, DigestConfig};
pub use packer::DigestPacker;

use std::fmt;
use std::io::{self, ErrorKind, Read, Write};

use tracing::debug;

use crate::codec::{Alphabet, Arcfour, KeySchedule};
use crate::error::Result;

/// Read size used when streaming key material.
const READ_CHUNK: usize = 64 * 1024;

/// Symbols encoded per write when streaming a digest out.
const WRITE_CHUNK: usize = 4096;

/// A computed digest: output symbols plus the alphabet they are in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    symbols: Vec<u8>,
    alphabet: Alphabet,
}

impl Digest {
    /// Output bytes: characters for encoded alphabets, raw bytes otherwise.
    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol indices, each below `2^symbol_bits`.
    pub fn symbol_indices(&self) -> impl Iterator<Item = u8> + '_ {
        // Every symbol was produced by `Alphabet::encode`, so decoding succeeds.
        self.symbols
            .iter()
            .filter_map(move |&s| self.alphabet.decode(s))
    }
}

impl fmt::Display for Digest {
    /// Encoded digests print as-is; raw digests print as lowercase hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alphabet.is_encoded() {
            // Table characters are all ASCII.
            for &c in &self.symbols {
                write!(f, "{}", c as char)?;
            }
        } else {
            for b in &self.symbols {
                write!(f, "{b:02x}")?;
            }
        }
        Ok(())
    }
}

/// Digest an in-memory byte sequence.
pub fn digest(input: &[u8], config: &DigestConfig) -> Digest {
    let mut engine = Arcfour::new();
    engine.absorb(input);
    debug!(bytes = input.len(), "key material absorbed");
    collect(engine, config)
}

/// Digest everything `reader` yields until end of input.
///
/// The key is scheduled chunk by chunk, so the input is never held in
/// memory as a whole.
pub fn digest_reader<R: Read>(reader: R, config: &DigestConfig) -> Result<Digest> {
    let engine = absorb_reader(reader)?;
    Ok(collect(engine, config))
}

/// Digest everything `reader` yields and write the symbols to `out`.
///
/// Returns the number of symbols written. Errors from either side are
/// reported as [`Rc4HashError::Io`](crate::Rc4HashError::Io); use
/// [`absorb_reader`] and [`write_symbols`] to tell them apart.
pub fn digest_reader_into<R: Read, W: Write + ?Sized>(
    reader: R,
    config: &DigestConfig,
    out: &mut W,
) -> Result<u64> {
    let engine = absorb_reader(reader)?;
    Ok(write_symbols(engine, config, out)?)
}

/// Schedule everything `reader` yields as the key of a fresh engine.
pub fn absorb_reader<R: Read>(mut reader: R) -> Result<Arcfour> {
    let mut engine = Arcfour::new();
    let mut schedule = KeySchedule::new(&mut engine);
    let mut chunk = vec![0u8; READ_CHUNK];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        schedule.update(&chunk[..n]);
    }

    debug!(bytes = schedule.absorbed(), "key material absorbed");
    schedule.finish();
    Ok(engine)
}

/// Drop the warm-up keystream of a keyed `engine` and write the digest
/// symbols to `out`, a block at a time.
///
/// Returns the number of symbols written.
pub fn write_symbols<W: Write + ?Sized>(
    mut engine: Arcfour,
    config: &DigestConfig,
    out: &mut W,
) -> io::Result<u64> {
    let alphabet = config.alphabet();
    let mut symbols = squeeze(&mut engine, config);
    let mut block = [0u8; WRITE_CHUNK];
    let mut written = 0u64;

    loop {
        let mut n = 0;
        for (slot, symbol) in block.iter_mut().zip(symbols.by_ref()) {
            *slot = symbol;
            n += 1;
        }
        if n == 0 {
            break;
        }
        out.write_all(&block[..n])?;
        written += n as u64;
    }

    debug!(
        bits = config.digest_bits(),
        %alphabet,
        symbols = written,
        "digest written"
    );
    Ok(written)
}

/// Collect a digest in memory.
fn collect(mut engine: Arcfour, config: &DigestConfig) -> Digest {
    let alphabet = config.alphabet();
    let symbols: Vec<u8> = squeeze(&mut engine, config).collect();

    debug!(
        bits = config.digest_bits(),
        %alphabet,
        symbols = symbols.len(),
        "digest emitted"
    );
    Digest { symbols, alphabet }
}

/// Drop the warm-up keystream and yield encoded symbols.
fn squeeze<'a>(engine: &'a mut Arcfour, config: &DigestConfig) -> impl Iterator<Item = u8> + 'a {
    engine.discard(config.warmup());

    let alphabet = config.alphabet();
    DigestPacker::new(engine, config.digest_bits(), alphabet)
        .map(move |index| alphabet.encode(index))
}
