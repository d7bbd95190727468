//! Error types for SIWK message handling.

use kaspa_auth_address::AddressError;
use kaspa_auth_signature::SignatureError;
use thiserror::Error;

/// Errors that can occur while building or verifying a SIWK message.
///
/// `Display` output is the human-readable reason reported in
/// [`VerifyResult`](crate::VerifyResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A field is malformed, e.g. the version literal is not `"1"`.
    #[error("{0}")]
    Validation(String),

    /// The address text is not a recognized Kaspa address.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// The signature or key could not be prepared for verification.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// A check failed: mismatch, expiry, rejected nonce, bad signature.
    #[error("{0}")]
    Verification(String),
}

impl AuthError {
    pub(crate) fn rejected(reason: impl Into<String>) -> Self {
        AuthError::Verification(reason.into())
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        AuthError::Validation(reason.into())
    }
}

/// Result type for SIWK operations.
pub type Result<T> = std::result::Result<T, AuthError>;
