//! Error types for rc4hash.

use thiserror::Error;

use crate::codec::Alphabet;

/// Primary error type for digest operations.
#[derive(Error, Debug)]
pub enum Rc4HashError {
    #[error("invalid digest size: length must be at least 1 bit")]
    ZeroDigestSize,

    #[error("invalid digest size: {bits} bits cannot be rendered in {alphabet}")]
    MisalignedDigestSize { bits: u64, alphabet: Alphabet },

    #[error("invalid digest size: {0} bytes does not fit in a bit count")]
    DigestSizeOverflow(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Rc4HashError {
    /// Whether the error stems from digest configuration rather than I/O.
    pub fn is_config(&self) -> bool {
        !matches!(self, Rc4HashError::Io(_))
    }
}

/// Convenience Result type alias for Rc4HashError.
pub type Result<T> = std::result::Result<T, Rc4HashError>;
