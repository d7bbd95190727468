//! Canonical SIWK text.
//!
//! The rendered text is both the prompt a wallet shows and the exact byte
//! sequence that gets hashed and signed. Line order and spelling are FROZEN:
//! any change breaks every existing signature.
//!
//! ```text
//! {domain} wants you to sign in with your Kaspa address:
//! {address}
//!
//! {statement}            (only if non-empty after trimming,
//!                         followed by a blank line)
//! URI: {uri}
//! Version: {version}
//! Chain ID: {chainId}
//! Nonce: {nonce}
//! Issued At: {issuedAt}
//! Expiration Time: {expirationTime}   (optional)
//! Not Before: {notBefore}             (optional)
//! Request ID: {requestId}             (optional)
//! Resources:                          (only if resources is non-empty)
//! - {resource}
//! ```
//!
//! Lines are joined with `\n`, with no trailing newline.

use crate::fields::SiwkFields;

/// Header line suffix following the domain.
pub const HEADER_SUFFIX: &str = " wants you to sign in with your Kaspa address:";

/// Line tags.
pub(crate) mod tags {
    pub const URI: &str = "URI: ";
    pub const VERSION: &str = "Version: ";
    pub const CHAIN_ID: &str = "Chain ID: ";
    pub const NONCE: &str = "Nonce: ";
    pub const ISSUED_AT: &str = "Issued At: ";
    pub const EXPIRATION_TIME: &str = "Expiration Time: ";
    pub const NOT_BEFORE: &str = "Not Before: ";
    pub const REQUEST_ID: &str = "Request ID: ";
    pub const RESOURCES: &str = "Resources:";
    pub const RESOURCE_ITEM: &str = "- ";
}

/// Render fields as canonical SIWK text.
///
/// Performs no validation; see [`build_message`](crate::build_message).
pub fn canonical_siwk_string(fields: &SiwkFields) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(12 + fields.resources.len());

    lines.push(format!("{}{}", fields.domain, HEADER_SUFFIX));
    lines.push(fields.address.clone());
    lines.push(String::new());

    if let Some(statement) = fields.statement_text() {
        lines.push(statement.to_string());
        lines.push(String::new());
    }

    lines.push(format!("{}{}", tags::URI, fields.uri));
    lines.push(format!("{}{}", tags::VERSION, fields.version));
    lines.push(format!("{}{}", tags::CHAIN_ID, fields.chain_id));
    lines.push(format!("{}{}", tags::NONCE, fields.nonce));
    lines.push(format!("{}{}", tags::ISSUED_AT, fields.issued_at));

    if let Some(exp) = fields.expiration_time() {
        lines.push(format!("{}{}", tags::EXPIRATION_TIME, exp));
    }
    if let Some(nb) = fields.not_before() {
        lines.push(format!("{}{}", tags::NOT_BEFORE, nb));
    }
    if let Some(id) = fields.request_id() {
        lines.push(format!("{}{}", tags::REQUEST_ID, id));
    }

    if !fields.resources.is_empty() {
        lines.push(tags::RESOURCES.to_string());
        for resource in &fields.resources {
            lines.push(format!("{}{}", tags::RESOURCE_ITEM, resource));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ChainId;

    fn minimal() -> SiwkFields {
        SiwkFields {
            domain: "example.com".into(),
            address: "kaspa:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucgwqm3fnl".into(),
            statement: None,
            uri: "https://example.com/login".into(),
            version: "1".into(),
            chain_id: ChainId::Number(1),
            nonce: "32891756".into(),
            issued_at: "2024-01-01T00:00:00.000Z".into(),
            expiration_time: None,
            not_before: None,
            request_id: None,
            resources: vec![],
        }
    }

    #[test]
    fn test_minimal_message() {
        let expected = "example.com wants you to sign in with your Kaspa address:\n\
            kaspa:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucgwqm3fnl\n\
            \n\
            URI: https://example.com/login\n\
            Version: 1\n\
            Chain ID: 1\n\
            Nonce: 32891756\n\
            Issued At: 2024-01-01T00:00:00.000Z";
        assert_eq!(canonical_siwk_string(&minimal()), expected);
    }

    #[test]
    fn test_full_message() {
        let mut fields = minimal();
        fields.statement = Some("  I accept the Terms of Service.\n".into());
        fields.chain_id = ChainId::Text("kaspa-mainnet".into());
        fields.expiration_time = Some("2024-01-02T00:00:00.000Z".into());
        fields.not_before = Some("2024-01-01T00:00:00.000Z".into());
        fields.request_id = Some("req-7".into());
        fields.resources = vec!["ipfs://bafy".into(), "https://example.com/a".into()];

        let expected = "example.com wants you to sign in with your Kaspa address:\n\
            kaspa:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucgwqm3fnl\n\
            \n\
            I accept the Terms of Service.\n\
            \n\
            URI: https://example.com/login\n\
            Version: 1\n\
            Chain ID: kaspa-mainnet\n\
            Nonce: 32891756\n\
            Issued At: 2024-01-01T00:00:00.000Z\n\
            Expiration Time: 2024-01-02T00:00:00.000Z\n\
            Not Before: 2024-01-01T00:00:00.000Z\n\
            Request ID: req-7\n\
            Resources:\n\
            - ipfs://bafy\n\
            - https://example.com/a";
        assert_eq!(canonical_siwk_string(&fields), expected);
    }

    #[test]
    fn test_blank_statement_omitted() {
        let mut fields = minimal();
        fields.statement = Some(" \t ".into());
        assert_eq!(canonical_siwk_string(&fields), canonical_siwk_string(&minimal()));
    }

    #[test]
    fn test_empty_optionals_omitted() {
        let mut fields = minimal();
        fields.expiration_time = Some(String::new());
        fields.request_id = Some(String::new());
        let text = canonical_siwk_string(&fields);
        assert!(!text.contains("Expiration Time"));
        assert!(!text.contains("Request ID"));
        assert!(!text.contains("Resources:"));
    }
}
