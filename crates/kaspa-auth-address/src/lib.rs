//! # Kaspa Auth Address
//!
//! Kaspa address text encoding and the validated [`Address`] type.
//!
//! This crate contains no I/O and no cryptography beyond the bech32
//! checksum. It is pure computation over address text.
//!
//! ## Key Types
//!
//! - [`Address`] - Validated address: network prefix, version and payload
//! - [`NetworkPrefix`] - `kaspa`, `kaspatest`, `kaspadev`, `kaspasim`
//! - [`AddressVersion`] - Schnorr (0) or ECDSA (1)
//!
//! ## Encoding
//!
//! The low-level codec lives in the [`bech32`] module:
//!
//! ```rust
//! use kaspa_auth_address::{bech32, Address, NetworkPrefix};
//!
//! let text = "kaspa:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucgwqm3fnl";
//! let address: Address = text.parse().unwrap();
//! assert_eq!(address.prefix(), NetworkPrefix::Mainnet);
//! assert_eq!(address.to_string(), text);
//!
//! let decoded = bech32::decode(text).unwrap();
//! assert_eq!(decoded.payload, address.payload());
//! ```

pub mod address;
pub mod bech32;
pub mod error;

pub use address::{Address, AddressVersion, NetworkPrefix};
pub use error::{AddressError, DecodeError, EncodeError, Result};
