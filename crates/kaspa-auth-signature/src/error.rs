//! Error types for signature handling.

use thiserror::Error;

/// Errors that can occur while preparing a signature check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The signature text is not an even-length run of hex digits.
    #[error("signature is not in hexadecimal form: {0}")]
    Format(String),

    /// The signature decoded to the wrong number of bytes.
    #[error("signature must be 64 bytes, got {0}")]
    InvalidLength(usize),

    /// The address is not Schnorr-versioned.
    #[error("trying to get a schnorr public key from an ECDSA Kaspa address")]
    AddressType,

    /// The address payload cannot be an x-only public key.
    #[error("schnorr public key must be 32 bytes, got {0}")]
    InvalidPublicKey(usize),
}

impl From<hex::FromHexError> for SignatureError {
    fn from(e: hex::FromHexError) -> Self {
        SignatureError::Format(e.to_string())
    }
}

/// Result type for signature operations.
pub type Result<T> = std::result::Result<T, SignatureError>;
