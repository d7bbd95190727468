//! Validated Kaspa addresses.
//!
//! An [`Address`] can only be obtained by parsing text that decodes under
//! one of the four network prefixes with version 0 or 1, or by building one
//! from parts that encode successfully. It caches its canonical lower-case
//! text, so formatting never fails.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::bech32;
use crate::error::{AddressError, Result};

/// Network a Kaspa address belongs to, carried as the bech32 prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPrefix {
    Mainnet,
    Testnet,
    Devnet,
    Simnet,
}

impl NetworkPrefix {
    /// All recognized prefixes.
    pub const ALL: [NetworkPrefix; 4] = [
        NetworkPrefix::Mainnet,
        NetworkPrefix::Testnet,
        NetworkPrefix::Devnet,
        NetworkPrefix::Simnet,
    ];

    /// The textual prefix, e.g. `kaspa` or `kaspatest`.
    pub const fn as_str(self) -> &'static str {
        match self {
            NetworkPrefix::Mainnet => "kaspa",
            NetworkPrefix::Testnet => "kaspatest",
            NetworkPrefix::Devnet => "kaspadev",
            NetworkPrefix::Simnet => "kaspasim",
        }
    }

    /// Exact match against the lower-case prefix strings.
    pub fn from_prefix_str(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == prefix)
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkPrefix {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_prefix_str(s).ok_or_else(|| AddressError::UnknownPrefix(s.to_string()))
    }
}

/// Address version byte: which signature scheme the payload is a key for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AddressVersion {
    /// Payload is a 32-byte x-only Schnorr public key.
    Schnorr = 0,
    /// Payload is a 33-byte compressed ECDSA public key.
    Ecdsa = 1,
}

impl AddressVersion {
    /// Convert to the version byte.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from the version byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Schnorr),
            1 => Some(Self::Ecdsa),
            _ => None,
        }
    }

    /// Payload length a key of this kind has.
    ///
    /// Not enforced when parsing or building addresses.
    pub fn expected_payload_len(self) -> usize {
        match self {
            Self::Schnorr => 32,
            Self::Ecdsa => 33,
        }
    }
}

/// A validated Kaspa address.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address {
    prefix: NetworkPrefix,
    version: AddressVersion,
    payload: Vec<u8>,
    encoded: String,
}

impl Address {
    /// Build an address from known parts.
    ///
    /// Fails if the payload is too long to fit in an encoded address.
    pub fn new(prefix: NetworkPrefix, version: AddressVersion, payload: Vec<u8>) -> Result<Self> {
        let encoded = bech32::encode(prefix.as_str(), &payload, version.to_u8())?;
        Ok(Self {
            prefix,
            version,
            payload,
            encoded,
        })
    }

    /// Parse and validate address text.
    ///
    /// Upper-case input is accepted; the stored form is lower case.
    pub fn parse(s: &str) -> Result<Self> {
        let decoded = bech32::decode(s)?;

        let prefix = NetworkPrefix::from_prefix_str(&decoded.prefix)
            .ok_or(AddressError::UnknownPrefix(decoded.prefix))?;
        let version = AddressVersion::from_u8(decoded.version)
            .ok_or(AddressError::UnknownVersion(decoded.version))?;

        Self::new(prefix, version, decoded.payload)
    }

    /// The network prefix.
    pub fn prefix(&self) -> NetworkPrefix {
        self.prefix
    }

    /// The version tag.
    pub fn version(&self) -> AddressVersion {
        self.version
    }

    /// The raw payload bytes (a public key).
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether the payload is a Schnorr public key.
    pub fn is_schnorr(&self) -> bool {
        self.version == AddressVersion::Schnorr
    }

    /// The canonical lower-case text.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encoded)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
