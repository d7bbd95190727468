//! SIWK verification.
//!
//! [`Authenticator::verify_message`] is a direct pass/fail check of a
//! signature over arbitrary text. [`Authenticator::verify_siwk`] runs the
//! full challenge pipeline and never fails: every problem, including
//! malformed attacker-supplied input, comes back as a negative
//! [`VerifyResult`] with a reason.
//!
//! Pipeline stages, in order, stopping at the first failure:
//!
//! 1. domain matches `options.domain`, if set
//! 2. address parses
//! 3. `issuedAt` parses and is not more than the skew in the future
//! 4. `notBefore`, if present, parses and has been reached (minus skew)
//! 5. `expirationTime`, if present, parses and has not passed (plus skew)
//! 6. nonce accepted, if a check is configured
//! 7. canonical message rebuilt and signature verified against the address
//!
//! The only suspension points are the nonce check and the signature check.

use kaspa_auth_address::Address;
use kaspa_auth_signature::{verify_with, PersonalMessageDigest, Secp256k1Verifier, SignatureVerifier};
use serde::Serialize;

use crate::error::{AuthError, Result};
use crate::fields::{parse_timestamp_ms, SiwkFields};
use crate::message::build_message;
use crate::options::VerifyOptions;

const SIGNATURE_MISMATCH: &str = "signature/address mismatch";

/// Outcome of [`verify_siwk`]: valid, or invalid with a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl VerifyResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The failure reason; `None` exactly when valid.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl From<Result<()>> for VerifyResult {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => VerifyResult::valid(),
            Err(e) => VerifyResult::invalid(e.to_string()),
        }
    }
}

/// Verifies SIWK challenges and signed messages with a chosen signature verifier.
#[derive(Debug, Default)]
pub struct Authenticator<V = Secp256k1Verifier> {
    verifier: V,
}

impl Authenticator {
    /// An authenticator using in-process secp256k1 verification.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: SignatureVerifier> Authenticator<V> {
    pub fn with_verifier(verifier: V) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Verify a signature over `message` by the key in `address`.
    ///
    /// Fails with [`AuthError::Verification`] when the signature does not
    /// match, and with address or signature errors for malformed input.
    pub async fn verify_message(&self, message: &str, address: &str, signature_hex: &str) -> Result<()> {
        let address = Address::parse(address)?;
        let digest = PersonalMessageDigest::from_message(message);

        if !verify_with(&self.verifier, &digest, signature_hex, &address).await? {
            return Err(AuthError::rejected(SIGNATURE_MISMATCH));
        }
        Ok(())
    }

    /// Run the full SIWK pipeline. Never fails; see the module docs.
    pub async fn verify_siwk(
        &self,
        fields: &SiwkFields,
        signature_hex: &str,
        options: &VerifyOptions,
    ) -> VerifyResult {
        let result = self.check_siwk(fields, signature_hex, options).await;
        if let Err(e) = &result {
            tracing::debug!(
                domain = %fields.domain,
                address = %fields.address,
                reason = %e,
                "siwk verification rejected"
            );
        }
        result.into()
    }

    async fn check_siwk(
        &self,
        fields: &SiwkFields,
        signature_hex: &str,
        options: &VerifyOptions,
    ) -> Result<()> {
        if let Some(expected) = options.expected_domain() {
            if fields.domain != expected {
                return Err(AuthError::rejected("domain mismatch"));
            }
        }

        let address = Address::parse(&fields.address)?;

        let at = options.reference_time_ms();
        let skew = options.clock_skew_ms;

        let issued = parse_timestamp_ms(&fields.issued_at)
            .ok_or_else(|| AuthError::rejected("invalid issuedAt"))?;
        if issued.saturating_sub(at) > skew {
            return Err(AuthError::rejected("issuedAt is in the future"));
        }

        if let Some(not_before) = fields.not_before() {
            let not_before = parse_timestamp_ms(not_before)
                .ok_or_else(|| AuthError::rejected("invalid notBefore"))?;
            if at.saturating_add(skew) < not_before {
                return Err(AuthError::rejected("notBefore not reached"));
            }
        }

        if let Some(expiration) = fields.expiration_time() {
            let expiration = parse_timestamp_ms(expiration)
                .ok_or_else(|| AuthError::rejected("invalid expirationTime"))?;
            if at.saturating_sub(skew) > expiration {
                return Err(AuthError::rejected("message expired"));
            }
        }

        if let Some(check) = &options.check_nonce {
            if !check.accept(&fields.nonce).await {
                return Err(AuthError::rejected("nonce rejected"));
            }
        }

        let built = build_message(fields)?;
        if !verify_with(&self.verifier, &built.digest, signature_hex, &address).await? {
            return Err(AuthError::rejected(SIGNATURE_MISMATCH));
        }

        Ok(())
    }
}

/// [`Authenticator::verify_message`] with the default verifier.
pub async fn verify_message(message: &str, address: &str, signature_hex: &str) -> Result<()> {
    Authenticator::new()
        .verify_message(message, address, signature_hex)
        .await
}

/// [`Authenticator::verify_siwk`] with the default verifier.
pub async fn verify_siwk(fields: &SiwkFields, signature_hex: &str, options: &VerifyOptions) -> VerifyResult {
    Authenticator::new()
        .verify_siwk(fields, signature_hex, options)
        .await
}
