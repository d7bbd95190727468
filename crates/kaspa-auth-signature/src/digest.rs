//! Personal-message digest: keyed BLAKE2b-256.
//!
//! Off-chain messages are hashed under a fixed key so a message signature
//! can never double as a transaction signature.

use blake2::digest::consts::U32;
use blake2::digest::Mac;
use blake2::Blake2bMac;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain-separation key for personal-message hashing.
pub const PERSONAL_MESSAGE_KEY: &[u8] = b"PersonalMessageSigningHash";

type PersonalMac = Blake2bMac<U32>;

/// A 32-byte personal-message digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonalMessageDigest(pub [u8; 32]);

impl PersonalMessageDigest {
    /// Hash raw message bytes.
    pub fn hash(data: &[u8]) -> Self {
        let mut mac = PersonalMac::new_with_salt_and_personal(PERSONAL_MESSAGE_KEY, &[], &[])
            .expect("personal message key fits in a BLAKE2b key block");
        mac.update(data);

        let mut out = [0u8; 32];
        out.copy_from_slice(&mac.finalize().into_bytes());
        Self(out)
    }

    /// Hash the UTF-8 bytes of a message.
    pub fn from_message(message: &str) -> Self {
        Self::hash(message.as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PersonalMessageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersonalMessageDigest({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for PersonalMessageDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PersonalMessageDigest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let d1 = PersonalMessageDigest::from_message("hello world");
        let d2 = PersonalMessageDigest::hash(b"hello world");
        assert_eq!(d1, d2);

        let d3 = PersonalMessageDigest::from_message("hey world");
        assert_ne!(d1, d3);
    }

    #[test]
    fn test_digest_is_keyed() {
        // Plain BLAKE2b-256 of the same bytes must differ from the keyed digest.
        use blake2::digest::{FixedOutput, Update};
        use blake2::Blake2b;

        let mut plain = Blake2b::<U32>::default();
        Update::update(&mut plain, b"hello world");
        let plain = plain.finalize_fixed();

        let keyed = PersonalMessageDigest::from_message("hello world");
        assert_ne!(keyed.as_bytes().as_slice(), plain.as_slice());
    }

    #[test]
    fn test_empty_message_has_digest() {
        let digest = PersonalMessageDigest::from_message("");
        assert_ne!(digest, PersonalMessageDigest::from_bytes([0u8; 32]));
        assert_eq!(digest.to_hex().len(), 64);
    }

    #[test]
    fn test_debug_is_truncated() {
        let digest = PersonalMessageDigest::from_bytes([0xab; 32]);
        assert_eq!(format!("{digest:?}"), "PersonalMessageDigest(abababababababab)");
    }
}
