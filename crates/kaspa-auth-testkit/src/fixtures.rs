//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a signer that plays the wallet
//! side of a SIWK exchange.

use chrono::{DateTime, Duration, Utc};
use kaspa_auth::fields::to_iso;
use kaspa_auth::{build_message, SiwkFields};
use kaspa_auth_address::{Address, AddressVersion, NetworkPrefix};
use kaspa_auth_signature::{PersonalMessageDigest, SchnorrPublicKey};
use secp256k1::{All, Keypair, Message, Secp256k1, SecretKey};
use std::fmt;

/// A wallet-side signer holding a secp256k1 keypair.
pub struct TestSigner {
    secp: Secp256k1<All>,
    keypair: Keypair,
}

impl TestSigner {
    /// Create a signer with a random key.
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let keypair = Keypair::new(&secp, &mut rand::thread_rng());
        Self { secp, keypair }
    }

    /// Create a signer with a deterministic key.
    ///
    /// Panics if `seed` is not a valid secret key (zero or above the curve order).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&seed).expect("seed is a valid secret key");
        let keypair = Keypair::from_secret_key(&secp, &secret);
        Self { secp, keypair }
    }

    /// The x-only public key.
    pub fn public_key(&self) -> SchnorrPublicKey {
        let (xonly, _) = self.keypair.x_only_public_key();
        SchnorrPublicKey::from_bytes(xonly.serialize())
    }

    /// The Schnorr address for this key on `prefix`.
    pub fn address(&self, prefix: NetworkPrefix) -> Address {
        Address::new(
            prefix,
            AddressVersion::Schnorr,
            self.public_key().as_bytes().to_vec(),
        )
        .expect("32-byte payload always encodes")
    }

    /// Sign a digest, returning lower-case signature hex.
    pub fn sign_digest(&self, digest: &PersonalMessageDigest) -> String {
        let message = Message::from_digest(*digest.as_bytes());
        let sig = self.secp.sign_schnorr_no_aux_rand(&message, &self.keypair);
        hex::encode(sig.serialize())
    }

    /// Sign arbitrary text as a personal message.
    pub fn sign_message(&self, message: &str) -> String {
        self.sign_digest(&PersonalMessageDigest::from_message(message))
    }

    /// Sign the canonical form of `fields`.
    pub fn sign_fields(&self, fields: &SiwkFields) -> String {
        let built = build_message(fields).expect("fixture fields are valid");
        self.sign_digest(&built.digest)
    }

    /// A mainnet challenge for this signer issued at `at`, valid for an hour.
    pub fn challenge(&self, domain: &str, nonce: &str, at: DateTime<Utc>) -> SiwkFields {
        SiwkFields::builder(
            domain,
            self.address(NetworkPrefix::Mainnet).to_string(),
            format!("https://{domain}/login"),
            nonce,
        )
        .statement(format!("Sign in to {domain}."))
        .issued_at(to_iso(at))
        .expiration_time(to_iso(at + Duration::hours(1)))
        .build()
    }
}

impl Default for TestSigner {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Debug for TestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSigner")
            .field("public_key", &self.public_key())
            .finish()
    }
}

/// Create several deterministic signers with distinct keys.
pub fn multi_party_signers(count: usize) -> Vec<TestSigner> {
    (0..count)
        .map(|i| TestSigner::from_seed([i as u8 + 1; 32]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kaspa_auth::{verify_siwk, VerifyOptions};
    use kaspa_auth_signature::verify_signature;

    #[tokio::test]
    async fn test_signed_message_verifies() {
        let signer = TestSigner::generate();
        let address = signer.address(NetworkPrefix::Testnet);
        let sig = signer.sign_message("hello");

        assert!(verify_signature("hello", &sig, &address).await.unwrap());
        assert!(!verify_signature("hello!", &sig, &address).await.unwrap());
    }

    #[tokio::test]
    async fn test_challenge_verifies() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let signer = TestSigner::from_seed([7; 32]);
        let fields = signer.challenge("example.com", "abc", at);
        let sig = signer.sign_fields(&fields);

        let result = verify_siwk(&fields, &sig, &VerifyOptions::new().at_time(at)).await;
        assert!(result.is_valid(), "{result:?}");
    }

    #[test]
    fn test_seeded_signer_is_deterministic() {
        let a = TestSigner::from_seed([3; 32]);
        let b = TestSigner::from_seed([3; 32]);
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.sign_message("x"), b.sign_message("x"));
    }

    #[test]
    fn test_multi_party() {
        let signers = multi_party_signers(3);
        let pks: Vec<_> = signers.iter().map(|s| s.public_key()).collect();
        assert_ne!(pks[0], pks[1]);
        assert_ne!(pks[1], pks[2]);
        assert_ne!(pks[0], pks[2]);
    }
}
