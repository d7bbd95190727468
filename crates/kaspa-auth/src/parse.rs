//! Reading canonical SIWK text back into fields.
//!
//! This is the inverse of [`canonical_siwk_string`](crate::canonical_siwk_string).
//! It is purely syntactic: it does not check the version literal, the
//! address, or the timestamps. Verification does that.

use crate::canonical::{tags, HEADER_SUFFIX};
use crate::error::{AuthError, Result};
use crate::fields::{ChainId, SiwkFields};

/// Cursor over message lines, 1-based for error messages.
struct Lines<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn next_line(&mut self, what: &str) -> Result<&'a str> {
        let line = self
            .peek()
            .ok_or_else(|| AuthError::invalid(format!("message ends before {what}")))?;
        self.pos += 1;
        Ok(line)
    }

    /// Consume a line that must start with `tag`.
    fn field(&mut self, tag: &str) -> Result<&'a str> {
        let line = self.next_line(tag.trim_end())?;
        line.strip_prefix(tag).ok_or_else(|| self.unexpected(tag))
    }

    /// Consume the next line only if it starts with `tag`.
    fn optional(&mut self, tag: &str) -> Option<&'a str> {
        let value = self.peek()?.strip_prefix(tag)?;
        self.pos += 1;
        Some(value)
    }

    fn blank(&mut self) -> Result<()> {
        match self.next_line("blank line")? {
            "" => Ok(()),
            _ => Err(self.unexpected("blank line")),
        }
    }

    fn unexpected(&self, expected: &str) -> AuthError {
        AuthError::invalid(format!(
            "line {}: expected `{}`",
            self.pos,
            expected.trim_end()
        ))
    }

    /// Index of the `URI:` line that ends the preamble, searching from the end.
    ///
    /// Nothing after the real `URI:` line can start with that tag, so the
    /// last candidate wins even when a statement quotes the pattern.
    fn uri_line(&self) -> Option<usize> {
        (self.pos..self.lines.len()).rev().find(|&i| {
            self.lines[i].starts_with(tags::URI) && (i == self.pos || self.lines[i - 1].is_empty())
        })
    }
}

/// Parse canonical SIWK text into fields.
///
/// Multi-line statements are accepted. A chain ID that is a canonical
/// decimal integer comes back as [`ChainId::Number`], so the parsed fields
/// render to the same text even when the variant differs.
pub fn parse_message(text: &str) -> Result<SiwkFields> {
    let mut lines = Lines::new(text);

    let header = lines.next_line("header")?;
    let domain = header
        .strip_suffix(HEADER_SUFFIX)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| lines.unexpected("{domain} wants you to sign in with your Kaspa address:"))?;

    let address = lines.next_line("address")?;
    lines.blank()?;

    let statement = match lines.uri_line() {
        Some(uri) if uri > lines.pos + 1 => {
            let statement = lines.lines[lines.pos..uri - 1].join("\n");
            lines.pos = uri;
            Some(statement)
        }
        _ => None,
    };

    let uri = lines.field(tags::URI)?;
    let version = lines.field(tags::VERSION)?;
    let chain_id = lines.field(tags::CHAIN_ID)?;
    let nonce = lines.field(tags::NONCE)?;
    let issued_at = lines.field(tags::ISSUED_AT)?;

    let expiration_time = lines.optional(tags::EXPIRATION_TIME);
    let not_before = lines.optional(tags::NOT_BEFORE);
    let request_id = lines.optional(tags::REQUEST_ID);

    let mut resources = Vec::new();
    if lines.peek() == Some(tags::RESOURCES) {
        lines.pos += 1;
        while let Some(resource) = lines.optional(tags::RESOURCE_ITEM) {
            resources.push(resource.to_string());
        }
        if resources.is_empty() {
            return Err(AuthError::invalid("resources header without entries"));
        }
    }

    if let Some(extra) = lines.peek() {
        return Err(AuthError::invalid(format!(
            "line {}: unexpected content `{}`",
            lines.pos + 1,
            extra
        )));
    }

    Ok(SiwkFields {
        domain: domain.to_string(),
        address: address.to_string(),
        statement,
        uri: uri.to_string(),
        version: version.to_string(),
        chain_id: ChainId::from_text(chain_id),
        nonce: nonce.to_string(),
        issued_at: issued_at.to_string(),
        expiration_time: expiration_time.map(str::to_string),
        not_before: not_before.map(str::to_string),
        request_id: request_id.map(str::to_string),
        resources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonical_siwk_string;

    const ADDRESS: &str = "kaspa:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucgwqm3fnl";

    fn full() -> SiwkFields {
        SiwkFields::builder("example.com", ADDRESS, "https://example.com/login", "n0nce")
            .statement("Sign in to Example.\nSecond line.")
            .chain_id("kaspa-testnet-10")
            .issued_at("2024-01-01T00:00:00.000Z")
            .expiration_time("2024-01-01T01:00:00.000Z")
            .not_before("2024-01-01T00:00:00.000Z")
            .request_id("req-42")
            .add_resource("ipfs://bafy")
            .add_resource("https://example.com/terms")
            .build()
    }

    #[test]
    fn test_parse_full_message() {
        let fields = full();
        let parsed = parse_message(&canonical_siwk_string(&fields)).unwrap();
        assert_eq!(parsed, fields);
    }

    #[test]
    fn test_parse_minimal_message() {
        let fields = SiwkFields::builder("example.com", ADDRESS, "https://example.com", "abc")
            .issued_at("2024-01-01T00:00:00Z")
            .build();
        let parsed = parse_message(&canonical_siwk_string(&fields)).unwrap();
        assert_eq!(parsed, fields);
        assert_eq!(parsed.chain_id, ChainId::Number(1));
    }

    #[test]
    fn test_statement_is_trimmed() {
        let mut fields = full();
        fields.statement = Some("  padded  ".into());
        let parsed = parse_message(&canonical_siwk_string(&fields)).unwrap();
        assert_eq!(parsed.statement.as_deref(), Some("padded"));
    }

    #[test]
    fn test_statement_quoting_uri_line() {
        let mut fields = full();
        fields.statement = Some("Terms:\n\nURI: see below".into());
        let parsed = parse_message(&canonical_siwk_string(&fields)).unwrap();
        assert_eq!(parsed, fields);

        fields.statement = Some("URI: first line\n\nmore".into());
        let parsed = parse_message(&canonical_siwk_string(&fields)).unwrap();
        assert_eq!(parsed, fields);
    }

    #[test]
    fn test_numeric_text_chain_id_renders_identically() {
        let mut fields = full();
        fields.chain_id = ChainId::Text("42".into());
        let text = canonical_siwk_string(&fields);

        let parsed = parse_message(&text).unwrap();
        assert_eq!(parsed.chain_id, ChainId::Number(42));
        assert_eq!(canonical_siwk_string(&parsed), text);
    }

    #[test]
    fn test_missing_uri_line() {
        let text = canonical_siwk_string(&full()).replace("URI: ", "Link: ");
        let err = parse_message(&text).unwrap_err();
        assert!(err.to_string().contains("expected `URI:`"), "{err}");
    }

    #[test]
    fn test_bad_header() {
        let text = canonical_siwk_string(&full()).replacen("wants you", "would like you", 1);
        let err = parse_message(&text).unwrap_err();
        assert!(err.to_string().starts_with("line 1:"), "{err}");
    }

    #[test]
    fn test_missing_field() {
        let text = canonical_siwk_string(&full()).replace("Nonce: n0nce\n", "");
        let err = parse_message(&text).unwrap_err();
        assert!(err.to_string().contains("expected `Nonce:`"), "{err}");
    }

    #[test]
    fn test_trailing_content() {
        let text = format!("{}\nextra", canonical_siwk_string(&full()));
        assert!(parse_message(&text).is_err());
    }

    #[test]
    fn test_truncated_message() {
        let err = parse_message("example.com wants you to sign in with your Kaspa address:").unwrap_err();
        assert_eq!(err.to_string(), "message ends before address");
    }
}
