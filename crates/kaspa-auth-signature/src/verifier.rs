//! Signature verification against Kaspa addresses.
//!
//! The curve check is behind the [`SignatureVerifier`] trait so that an
//! implementation backed by a remote signer or a hardware device can be
//! swapped in. [`Secp256k1Verifier`] is the in-process default.

use async_trait::async_trait;
use kaspa_auth_address::Address;
use secp256k1::{schnorr, Message, Secp256k1, VerifyOnly, XOnlyPublicKey};

use crate::digest::PersonalMessageDigest;
use crate::error::Result;
use crate::keys::{SchnorrPublicKey, SchnorrSignature};

/// Verifies a BIP-340 signature over a personal-message digest.
///
/// Returns `false` for any signature that does not verify, including
/// keys that are not valid curve points.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    async fn verify(
        &self,
        digest: &PersonalMessageDigest,
        signature: &SchnorrSignature,
        public_key: &SchnorrPublicKey,
    ) -> bool;
}

/// BIP-340 verification over secp256k1.
pub struct Secp256k1Verifier {
    secp: Secp256k1<VerifyOnly>,
}

impl Secp256k1Verifier {
    /// Create a verification-only context.
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }

    /// Verify without going through the async trait.
    pub fn verify_now(
        &self,
        digest: &PersonalMessageDigest,
        signature: &SchnorrSignature,
        public_key: &SchnorrPublicKey,
    ) -> bool {
        let Ok(xonly) = XOnlyPublicKey::from_slice(public_key.as_bytes()) else {
            tracing::debug!(key = ?public_key, "public key is not a valid x-only point");
            return false;
        };
        let Ok(sig) = schnorr::Signature::from_slice(signature.as_bytes()) else {
            return false;
        };
        let message = Message::from_digest(*digest.as_bytes());

        self.secp.verify_schnorr(&sig, &message, &xonly).is_ok()
    }
}

impl Default for Secp256k1Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Secp256k1Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secp256k1Verifier")
    }
}

#[async_trait]
impl SignatureVerifier for Secp256k1Verifier {
    async fn verify(
        &self,
        digest: &PersonalMessageDigest,
        signature: &SchnorrSignature,
        public_key: &SchnorrPublicKey,
    ) -> bool {
        self.verify_now(digest, signature, public_key)
    }
}

/// Verify `signature_hex` over `digest` against the key in `address`, using `verifier`.
///
/// Errors are argument errors: malformed hex, wrong signature length, a
/// non-Schnorr address. A well-formed signature that does not verify
/// yields `Ok(false)`.
pub async fn verify_with<V>(
    verifier: &V,
    digest: &PersonalMessageDigest,
    signature_hex: &str,
    address: &Address,
) -> Result<bool>
where
    V: SignatureVerifier + ?Sized,
{
    let signature = SchnorrSignature::from_hex(signature_hex)?;
    let public_key = SchnorrPublicKey::from_address(address)?;
    Ok(verifier.verify(digest, &signature, &public_key).await)
}

/// Verify a signature over an already computed digest.
pub async fn verify_signature_from_digest(
    digest: &PersonalMessageDigest,
    signature_hex: &str,
    address: &Address,
) -> Result<bool> {
    verify_with(&Secp256k1Verifier::new(), digest, signature_hex, address).await
}

/// Hash `message` as a personal message and verify the signature over it.
pub async fn verify_signature(message: &str, signature_hex: &str, address: &Address) -> Result<bool> {
    let digest = PersonalMessageDigest::from_message(message);
    verify_signature_from_digest(&digest, signature_hex, address).await
}
