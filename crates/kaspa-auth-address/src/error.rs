//! Error types for the address codec and address model.

use thiserror::Error;

/// Errors raised while encoding an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("invalid prefix ({0}): characters must be printable ASCII")]
    InvalidPrefix(String),

    #[error("encoded length {0} exceeds the limit of 90 characters")]
    TooLong(usize),
}

/// Errors raised while decoding bech32 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid bech32 string length {0}")]
    InvalidLength(usize),

    #[error("invalid character in string: {0:?}")]
    InvalidCharacter(char),

    #[error("string not all lowercase or all uppercase")]
    MixedCase,

    #[error("invalid index of ':'")]
    InvalidSeparator,

    #[error("invalid character not part of charset: {0:?}")]
    InvalidDataCharacter(char),

    #[error("checksum failed: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("missing version byte")]
    MissingVersion,
}

/// Errors raised when text or parts do not form a recognized Kaspa address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodeError),

    #[error("decoding error: {0}")]
    Decoding(#[from] DecodeError),

    #[error("unrecognized address prefix: {0}")]
    UnknownPrefix(String),

    #[error("invalid payload version {0}, expected 0 or 1")]
    UnknownVersion(u8),
}

impl AddressError {
    /// Whether this error came from a failed checksum.
    pub fn is_checksum_failure(&self) -> bool {
        matches!(
            self,
            AddressError::Decoding(DecodeError::ChecksumMismatch { .. })
        )
    }
}

/// Result type for address operations.
pub type Result<T> = std::result::Result<T, AddressError>;
