//! # Kaspa Auth Signature
//!
//! Off-chain message signing primitives for Kaspa addresses.
//!
//! - [`PersonalMessageDigest`] - keyed BLAKE2b-256 of a message
//! - [`SchnorrSignature`], [`SchnorrPublicKey`] - byte newtypes
//! - [`SignatureVerifier`] - the curve check, with [`Secp256k1Verifier`] as default
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kaspa_auth_address::Address;
//! use kaspa_auth_signature::verify_signature;
//!
//! async fn example() {
//!     let address: Address = "kaspa:qr0lr4ml9fn3chekrqmjdkergxl93l4wrk3dankcgvjq776s9wn9jkdskewva"
//!         .parse()
//!         .unwrap();
//!     let ok = verify_signature("hello world", "35c5...", &address).await;
//!     assert!(ok.is_err()); // truncated hex
//! }
//! ```

pub mod digest;
pub mod error;
pub mod keys;
pub mod verifier;

pub use digest::{PersonalMessageDigest, PERSONAL_MESSAGE_KEY};
pub use error::{Result, SignatureError};
pub use keys::{SchnorrPublicKey, SchnorrSignature};
pub use verifier::{
    verify_signature, verify_signature_from_digest, verify_with, Secp256k1Verifier,
    SignatureVerifier,
};
