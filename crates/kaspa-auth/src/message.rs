//! Building the signable form of a SIWK challenge.

use kaspa_auth_address::Address;
use kaspa_auth_signature::PersonalMessageDigest;

use crate::canonical::canonical_siwk_string;
use crate::error::{AuthError, Result};
use crate::fields::{SiwkFields, SIWK_VERSION};

/// A rendered challenge with its bytes and digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltMessage {
    /// Canonical human-readable text.
    pub message: String,
    /// UTF-8 bytes of `message`; these are what gets hashed.
    pub prefixed: Vec<u8>,
    /// Personal-message digest of `prefixed`; this is what gets signed.
    pub digest: PersonalMessageDigest,
}

/// Validate `fields` and render the challenge a wallet signs.
///
/// Fails if the version is not `"1"` or the address does not parse.
pub fn build_message(fields: &SiwkFields) -> Result<BuiltMessage> {
    if fields.version != SIWK_VERSION {
        return Err(AuthError::invalid(format!(
            "version must be \"{SIWK_VERSION}\""
        )));
    }
    Address::parse(&fields.address)?;

    let message = canonical_siwk_string(fields);
    let prefixed = message.clone().into_bytes();
    let digest = PersonalMessageDigest::hash(&prefixed);

    tracing::trace!(domain = %fields.domain, digest = %digest.to_hex(), "built siwk message");

    Ok(BuiltMessage {
        message,
        prefixed,
        digest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaspa_auth_address::AddressError;

    const ADDRESS: &str = "kaspa:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucgwqm3fnl";

    fn fields() -> SiwkFields {
        SiwkFields::builder("example.com", ADDRESS, "https://example.com", "nonce-1")
            .issued_at("2024-01-01T00:00:00.000Z")
            .build()
    }

    #[test]
    fn test_build_is_deterministic() {
        let b1 = build_message(&fields()).unwrap();
        let b2 = build_message(&fields()).unwrap();
        assert_eq!(b1, b2);
        assert_eq!(b1.prefixed, b1.message.as_bytes());
        assert_eq!(b1.digest, PersonalMessageDigest::from_message(&b1.message));
    }

    #[test]
    fn test_field_change_changes_digest() {
        let mut other = fields();
        other.nonce = "nonce-2".into();
        assert_ne!(
            build_message(&fields()).unwrap().digest,
            build_message(&other).unwrap().digest
        );
    }

    #[test]
    fn test_wrong_version_rejected() {
        let mut f = fields();
        f.version = "2".into();
        let err = build_message(&f).unwrap_err();
        assert_eq!(err, AuthError::Validation("version must be \"1\"".into()));
        assert_eq!(err.to_string(), "version must be \"1\"");
    }

    #[test]
    fn test_bad_address_rejected() {
        let mut f = fields();
        f.address = "kaspa:qrjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucgwqm3fnl".into();
        match build_message(&f) {
            Err(AuthError::Address(e)) => assert!(e.is_checksum_failure()),
            other => panic!("expected address error, got {other:?}"),
        }

        f.address = "not an address".into();
        assert!(matches!(
            build_message(&f),
            Err(AuthError::Address(AddressError::Decoding(_)))
        ));
    }
}
