//! # Kaspa Auth Testkit
//!
//! Testing utilities for Kaspa auth.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known addresses, signatures and a signed SIWK challenge
//! - **Generators**: Proptest strategies for addresses and SIWK fields
//! - **Fixtures**: A wallet-side signer for end-to-end tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use kaspa_auth_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed) in verify_all_vectors() {
//!     assert!(passed, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use kaspa_auth_testkit::generators::{address_from_params, AddressParams};
//!
//! proptest! {
//!     #[test]
//!     fn address_text_roundtrips(params: AddressParams) {
//!         let address = address_from_params(&params);
//!         prop_assert_eq!(address.as_str().parse().ok(), Some(address));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use kaspa_auth_testkit::fixtures::TestSigner;
//! use kaspa_auth::address::NetworkPrefix;
//!
//! let signer = TestSigner::from_seed([1; 32]);
//! let address = signer.address(NetworkPrefix::Mainnet);
//! let signature = signer.sign_message("hello world");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_signers, TestSigner};
pub use generators::{address_from_params, siwk_fields, AddressParams};
pub use vectors::{
    address_vectors, signature_vectors, siwk_vector, verify_all_vectors, AddressVector,
    SignatureVector,
};
