//! Output alphabets for digest symbols.

use std::fmt;

/// Uppercase letters and digits without the look-alikes `0`, `1`, `O`, `I`.
pub const BASE32_CUSTOM: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Uppercase hexadecimal digits.
pub const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Symbol alphabet a digest is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alphabet {
    /// 5-bit symbols over [`BASE32_CUSTOM`].
    #[default]
    Base32,
    /// 4-bit symbols over [`HEX_UPPER`].
    Hex,
    /// 8-bit symbols, emitted as raw bytes.
    Raw,
}

impl Alphabet {
    /// Bits carried by one symbol.
    pub const fn symbol_bits(self) -> u32 {
        match self {
            Alphabet::Base32 => 5,
            Alphabet::Hex => 4,
            Alphabet::Raw => 8,
        }
    }

    /// Bits that must be clear in a digest length for this alphabet.
    ///
    /// For the power-of-two widths this makes the length a whole number of
    /// symbols. For base-32 only bit 2 is checked; the final symbol is topped
    /// up from the keystream when the length is not a multiple of 5.
    pub const fn length_mask(self) -> u64 {
        (self.symbol_bits() - 1) as u64
    }

    /// Whether `digest_bits` is an acceptable digest length.
    pub const fn accepts_length(self, digest_bits: u64) -> bool {
        digest_bits != 0 && digest_bits & self.length_mask() == 0
    }

    /// Translation table, `None` for raw output.
    pub const fn table(self) -> Option<&'static [u8]> {
        match self {
            Alphabet::Base32 => Some(BASE32_CUSTOM),
            Alphabet::Hex => Some(HEX_UPPER),
            Alphabet::Raw => None,
        }
    }

    /// Whether symbols are printable characters (as opposed to raw bytes).
    pub const fn is_encoded(self) -> bool {
        !matches!(self, Alphabet::Raw)
    }

    /// Map a symbol index (`< 2^symbol_bits`) to its output byte.
    pub fn encode(self, index: u8) -> u8 {
        debug_assert!(u32::from(index) < 1 << self.symbol_bits());
        match self.table() {
            Some(table) => table[index as usize],
            None => index,
        }
    }

    /// Map an output byte back to its symbol index.
    pub fn decode(self, symbol: u8) -> Option<u8> {
        match self.table() {
            Some(table) => table.iter().position(|&c| c == symbol).map(|p| p as u8),
            None => Some(symbol),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alphabet::Base32 => "base32",
            Alphabet::Hex => "hex",
            Alphabet::Raw => "raw",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_symbol_width() {
        for alphabet in [Alphabet::Base32, Alphabet::Hex] {
            let table = alphabet.table().unwrap();
            assert_eq!(table.len(), 1 << alphabet.symbol_bits());
        }
        assert!(Alphabet::Raw.table().is_none());
    }

    #[test]
    fn test_base32_excludes_lookalikes() {
        for c in b"01OI" {
            assert!(!BASE32_CUSTOM.contains(c));
        }
        let mut sorted = BASE32_CUSTOM.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 32);
    }

    #[test]
    fn test_encode_decode_inverse() {
        for alphabet in [Alphabet::Base32, Alphabet::Hex, Alphabet::Raw] {
            for index in 0..(1u32 << alphabet.symbol_bits()) {
                let index = index as u8;
                assert_eq!(alphabet.decode(alphabet.encode(index)), Some(index));
            }
        }
        assert_eq!(Alphabet::Base32.decode(b'0'), None);
        assert_eq!(Alphabet::Hex.decode(b'a'), None);
    }

    #[test]
    fn test_accepted_lengths() {
        assert!(Alphabet::Raw.accepts_length(256));
        assert!(!Alphabet::Raw.accepts_length(255));
        assert!(Alphabet::Hex.accepts_length(12));
        assert!(!Alphabet::Hex.accepts_length(14));

        // Base-32 only rejects lengths with bit 2 set.
        for bits in [8, 10, 24, 40, 160, 256] {
            assert!(Alphabet::Base32.accepts_length(bits), "{bits}");
        }
        for bits in [4, 12, 20, 260] {
            assert!(!Alphabet::Base32.accepts_length(bits), "{bits}");
        }
        assert!(!Alphabet::Base32.accepts_length(0));
    }
}
