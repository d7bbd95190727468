//! Strong types for Schnorr keys and signatures.
//!
//! These carry bytes only. Curve validity is checked by the verifier.

use kaspa_auth_address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SignatureError};

/// Length of a BIP-340 signature.
pub const SIGNATURE_LEN: usize = 64;

/// Length of an x-only public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// A 32-byte x-only Schnorr public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchnorrPublicKey(pub [u8; 32]);

impl SchnorrPublicKey {
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

    /// Read the public key embedded in a Schnorr address.
    pub fn from_address(address: &Address) -> Result<Self> {
        if !address.is_schnorr() {
            return Err(SignatureError::AddressType);
        }
        let payload = address.payload();
        let bytes: [u8; PUBLIC_KEY_LEN] = payload
            .try_into()
            .map_err(|_| SignatureError::InvalidPublicKey(payload.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for SchnorrPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchnorrPub({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for SchnorrPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for SchnorrPublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte BIP-340 Schnorr signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SchnorrSignature(pub [u8; 64]);

impl SchnorrSignature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to lower-case hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex; either case is accepted.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        let arr: [u8; SIGNATURE_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| SignatureError::InvalidLength(bytes.len()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for SchnorrSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchnorrSig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for SchnorrSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for SchnorrSignature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaspa_auth_address::{AddressVersion, NetworkPrefix};

    #[test]
    fn test_signature_hex_roundtrip() {
        let sig = SchnorrSignature::from_bytes([0x5a; 64]);
        let recovered = SchnorrSignature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(sig, recovered);

        let upper = SchnorrSignature::from_hex(&sig.to_hex().to_uppercase()).unwrap();
        assert_eq!(sig, upper);
    }

    #[test]
    fn test_signature_rejects_odd_length() {
        let odd = "a".repeat(127);
        assert!(matches!(
            SchnorrSignature::from_hex(&odd),
            Err(SignatureError::Format(_))
        ));
    }

    #[test]
    fn test_signature_rejects_non_hex() {
        let bad = format!("zz{}", "00".repeat(63));
        assert!(matches!(
            SchnorrSignature::from_hex(&bad),
            Err(SignatureError::Format(_))
        ));
    }

    #[test]
    fn test_signature_rejects_wrong_length() {
        assert_eq!(
            SchnorrSignature::from_hex(&"00".repeat(32)),
            Err(SignatureError::InvalidLength(32))
        );
        assert_eq!(SchnorrSignature::from_hex(""), Err(SignatureError::InvalidLength(0)));
    }

    #[test]
    fn test_public_key_from_schnorr_address() {
        let address = Address::new(NetworkPrefix::Mainnet, AddressVersion::Schnorr, vec![0x42; 32]).unwrap();
        let key = SchnorrPublicKey::from_address(&address).unwrap();
        assert_eq!(key.as_bytes(), &[0x42; 32]);
    }

    #[test]
    fn test_public_key_rejects_ecdsa_address() {
        let address = Address::new(NetworkPrefix::Mainnet, AddressVersion::Ecdsa, vec![0x02; 33]).unwrap();
        assert_eq!(
            SchnorrPublicKey::from_address(&address),
            Err(SignatureError::AddressType)
        );
    }

    #[test]
    fn test_public_key_rejects_short_payload() {
        let address = Address::new(NetworkPrefix::Testnet, AddressVersion::Schnorr, vec![0x42; 20]).unwrap();
        assert_eq!(
            SchnorrPublicKey::from_address(&address),
            Err(SignatureError::InvalidPublicKey(20))
        );
    }
}
