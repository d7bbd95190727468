//! # Kaspa Auth
//!
//! Sign-In With Kaspa (SIWK): a relying party issues a structured
//! challenge, the user's wallet signs its canonical text, and the relying
//! party verifies the signature against the claimed Kaspa address.
//!
//! ## Overview
//!
//! - **Fields**: [`SiwkFields`] is the structured challenge
//! - **Canonical text**: [`canonical_siwk_string`] renders the exact signed text
//! - **Build**: [`build_message`] validates fields and produces the digest to sign
//! - **Verify**: [`verify_siwk`] checks domain, time window, nonce and signature
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kaspa_auth::{verify_siwk, SiwkFields, VerifyOptions};
//!
//! async fn example(signature_hex: &str) {
//!     let fields = SiwkFields::builder(
//!         "example.com",
//!         "kaspa:qr0lr4ml9fn3chekrqmjdkergxl93l4wrk3dankcgvjq776s9wn9jkdskewva",
//!         "https://example.com/login",
//!         "32891756",
//!     )
//!     .statement("Sign in to Example.")
//!     .build();
//!
//!     let options = VerifyOptions::new()
//!         .with_domain("example.com")
//!         .check_nonce(|nonce: &str| nonce == "32891756");
//!
//!     let result = verify_siwk(&fields, signature_hex, &options).await;
//!     if !result.is_valid() {
//!         println!("rejected: {}", result.reason().unwrap_or_default());
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `kaspa_auth::address` - address codec and [`Address`]
//! - `kaspa_auth::signature` - personal-message digests and Schnorr verification

pub mod canonical;
pub mod error;
pub mod fields;
pub mod message;
pub mod options;
pub mod parse;
pub mod verify;

// Re-export component crates
pub use kaspa_auth_address as address;
pub use kaspa_auth_signature as signature;

pub use canonical::canonical_siwk_string;
pub use error::{AuthError, Result};
pub use fields::{now_iso, ChainId, SiwkFields, SiwkFieldsBuilder, SIWK_VERSION};
pub use message::{build_message, BuiltMessage};
pub use options::{NonceCheck, VerifyConfig, VerifyOptions, DEFAULT_CLOCK_SKEW_MS};
pub use parse::parse_message;
pub use verify::{verify_message, verify_siwk, Authenticator, VerifyResult};

// Commonly used component types
pub use kaspa_auth_address::{Address, AddressVersion, NetworkPrefix};
pub use kaspa_auth_signature::{
    verify_signature, PersonalMessageDigest, Secp256k1Verifier, SignatureVerifier,
};
