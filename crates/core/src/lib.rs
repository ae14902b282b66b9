//! rc4hash - variable-length message digests from the ARCFOUR keystream.
//!
//! Not a cryptographic hash: RC4's keystream biases are only mitigated by
//! discarding a fixed warm-up prefix.

pub mod codec;
pub mod digest;
pub mod error;

pub use codec::alphabet;
pub use codec::arcfour;

pub use codec::{Alphabet, Arcfour, KeySchedule};
pub use digest::{
    Digest, DigestConfig, DigestPacker, absorb_reader, digest, digest_reader, digest_reader_into,
    write_symbols,
};
pub use error::{Rc4HashError, Result};
