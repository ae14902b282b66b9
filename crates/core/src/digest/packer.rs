//! Bit packer slicing keystream bytes into fixed-width symbols.

use crate::codec::{Alphabet, Arcfour};

/// Iterator over digest symbol indices, most significant bit first.
///
/// Keystream bytes are pulled one at a time into a small bit buffer; each
/// step hands out the top `width` buffered bits. Symbol widths are at most 8
/// bits, so the buffer holds at most 7 leftover bits plus one fresh byte.
pub struct DigestPacker<'a> {
    engine: &'a mut Arcfour,
    width: u32,
    remaining: u64,
    buf: u16,
    bufbits: u32,
}

impl<'a> DigestPacker<'a> {
    /// Pack `digest_bits` bits into symbols of `alphabet`.
    ///
    /// A length that is not a multiple of the symbol width is rounded up to a
    /// whole symbol.
    pub fn new(engine: &'a mut Arcfour, digest_bits: u64, alphabet: Alphabet) -> Self {
        let width = alphabet.symbol_bits();
        Self {
            engine,
            width,
            remaining: digest_bits.div_ceil(u64::from(width)),
            buf: 0,
            bufbits: 0,
        }
    }

    /// Symbols still to be emitted.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    fn refill(&mut self) {
        debug_assert!(self.bufbits < 8);
        self.buf = self.buf << 8 | u16::from(self.engine.next_byte());
        self.bufbits += 8;
    }
}

impl Iterator for DigestPacker<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        if self.bufbits < self.width {
            self.refill();
        }
        debug_assert!(self.bufbits >= self.width && self.bufbits <= 15);

        let mask = (1u16 << self.width) - 1;
        let symbol = (self.buf >> (self.bufbits - self.width)) & mask;
        self.bufbits -= self.width;
        self.buf &= (1u16 << self.bufbits) - 1;
        self.remaining -= 1;

        if self.remaining == 0 {
            self.buf = 0;
            self.bufbits = 0;
        }
        Some(symbol as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABETS: [Alphabet; 3] = [Alphabet::Base32, Alphabet::Hex, Alphabet::Raw];

    fn keystream(n: usize) -> Vec<u8> {
        let mut engine = Arcfour::with_key(b"packer");
        (0..n).map(|_| engine.next_byte()).collect()
    }

    fn bits_of(bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .flat_map(|&b| (0..8).rev().map(move |s| (b >> s) & 1))
            .collect()
    }

    fn symbol_bits(symbols: &[u8], width: u32) -> Vec<u8> {
        symbols
            .iter()
            .flat_map(|&s| (0..width).rev().map(move |b| (s >> b) & 1))
            .collect()
    }

    #[test]
    fn test_raw_passes_bytes_through() {
        let mut engine = Arcfour::with_key(b"packer");
        let symbols: Vec<u8> = DigestPacker::new(&mut engine, 64, Alphabet::Raw).collect();
        assert_eq!(symbols, keystream(8));
    }

    #[test]
    fn test_symbols_follow_keystream_bits() {
        for alphabet in ALPHABETS {
            let width = alphabet.symbol_bits();
            let mut engine = Arcfour::with_key(b"packer");
            let symbols: Vec<u8> = DigestPacker::new(&mut engine, 120, alphabet).collect();
            let count = 120u32.div_ceil(width) as usize;
            assert_eq!(symbols.len(), count);
            assert!(symbols.iter().all(|&s| u32::from(s) < 1 << width));

            let packed = symbol_bits(&symbols, width);
            let stream = bits_of(&keystream(packed.len().div_ceil(8)));
            assert_eq!(packed, stream[..packed.len()], "{alphabet}");
        }
    }

    #[test]
    fn test_pulls_only_needed_bytes() {
        // 10 bits of base-32 is 2 symbols, i.e. 10 bits from 2 bytes.
        let mut engine = Arcfour::with_key(b"packer");
        let count = DigestPacker::new(&mut engine, 10, Alphabet::Base32).count();
        assert_eq!(count, 2);
        assert_eq!(engine.next_byte(), keystream(3)[2]);
    }

    #[test]
    fn test_size_hint_tracks_remaining() {
        let mut engine = Arcfour::new();
        let mut packer = DigestPacker::new(&mut engine, 20, Alphabet::Hex);
        assert_eq!(packer.size_hint(), (5, Some(5)));
        packer.next();
        assert_eq!(packer.remaining(), 4);
        assert_eq!(packer.by_ref().count(), 4);
        assert_eq!(packer.next(), None);
    }

    #[test]
    fn test_huge_length_is_lazy() {
        let mut engine = Arcfour::new();
        let mut packer = DigestPacker::new(&mut engine, 1 << 62, Alphabet::Hex);
        assert_eq!(packer.by_ref().take(10).count(), 10);
        assert_eq!(packer.remaining(), (1 << 60) - 10);
    }
}
