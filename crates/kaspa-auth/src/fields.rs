//! SIWK challenge fields.
//!
//! [`SiwkFields`] is the structured form of one sign-in challenge. It is
//! what a relying party creates, what a wallet sees rendered as text, and
//! what the verifier checks. Field names serialize in camelCase, the shape
//! web clients exchange.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The only supported message version.
pub const SIWK_VERSION: &str = "1";

/// Chain identifier: JSON clients send either a string or a number.
///
/// Two IDs that render to the same text sign identically. Reading a
/// message back yields [`ChainId::Number`] for canonical decimal integers
/// and [`ChainId::Text`] for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainId {
    Number(u64),
    Text(String),
    /// Any other JSON number, e.g. `-1` or `1.5`.
    Numeric(serde_json::Number),
}

impl ChainId {
    /// Interpret text read back from a rendered message.
    ///
    /// Canonical decimal integers become [`ChainId::Number`].
    pub fn from_text(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) if n.to_string() == s => ChainId::Number(n),
            _ => ChainId::Text(s.to_string()),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::Number(n) => write!(f, "{n}"),
            ChainId::Text(s) => f.write_str(s),
            ChainId::Numeric(n) => write!(f, "{n}"),
        }
    }
}

impl From<u64> for ChainId {
    fn from(n: u64) -> Self {
        ChainId::Number(n)
    }
}

impl From<&str> for ChainId {
    fn from(s: &str) -> Self {
        ChainId::Text(s.to_string())
    }
}

impl From<String> for ChainId {
    fn from(s: String) -> Self {
        ChainId::Text(s)
    }
}

/// One SIWK authentication challenge.
///
/// Timestamps are ISO-8601 strings; they are parsed only when verified.
/// Empty optional strings are treated the same as absent ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiwkFields {
    pub domain: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    pub uri: String,
    pub version: String,
    pub chain_id: ChainId,
    pub nonce: String,
    pub issued_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
}

impl SiwkFields {
    /// Start building fields with the required values.
    pub fn builder(
        domain: impl Into<String>,
        address: impl Into<String>,
        uri: impl Into<String>,
        nonce: impl Into<String>,
    ) -> SiwkFieldsBuilder {
        SiwkFieldsBuilder::new(domain, address, uri, nonce)
    }

    /// The trimmed statement, if it has any content.
    pub fn statement_text(&self) -> Option<&str> {
        self.statement
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn expiration_time(&self) -> Option<&str> {
        present(&self.expiration_time)
    }

    pub fn not_before(&self) -> Option<&str> {
        present(&self.not_before)
    }

    pub fn request_id(&self) -> Option<&str> {
        present(&self.request_id)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Builder for [`SiwkFields`].
#[derive(Debug, Clone)]
pub struct SiwkFieldsBuilder {
    fields: SiwkFields,
}

impl SiwkFieldsBuilder {
    /// Create a builder; `issued_at` defaults to now and `chain_id` to `1`.
    pub fn new(
        domain: impl Into<String>,
        address: impl Into<String>,
        uri: impl Into<String>,
        nonce: impl Into<String>,
    ) -> Self {
        Self {
            fields: SiwkFields {
                domain: domain.into(),
                address: address.into(),
                statement: None,
                uri: uri.into(),
                version: SIWK_VERSION.to_string(),
                chain_id: ChainId::Number(1),
                nonce: nonce.into(),
                issued_at: now_iso(),
                expiration_time: None,
                not_before: None,
                request_id: None,
                resources: Vec::new(),
            },
        }
    }

    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.fields.statement = Some(statement.into());
        self
    }

    pub fn chain_id(mut self, chain_id: impl Into<ChainId>) -> Self {
        self.fields.chain_id = chain_id.into();
        self
    }

    pub fn issued_at(mut self, issued_at: impl Into<String>) -> Self {
        self.fields.issued_at = issued_at.into();
        self
    }

    pub fn expiration_time(mut self, expiration_time: impl Into<String>) -> Self {
        self.fields.expiration_time = Some(expiration_time.into());
        self
    }

    pub fn not_before(mut self, not_before: impl Into<String>) -> Self {
        self.fields.not_before = Some(not_before.into());
        self
    }

    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.fields.request_id = Some(request_id.into());
        self
    }

    /// Append one resource URI.
    pub fn add_resource(mut self, resource: impl Into<String>) -> Self {
        self.fields.resources.push(resource.into());
        self
    }

    pub fn build(self) -> SiwkFields {
        self.fields
    }
}

/// The current instant as RFC 3339 with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`.
pub fn now_iso() -> String {
    to_iso(Utc::now())
}

/// Format an instant the way [`now_iso`] does.
pub fn to_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Date-time layouts tried after RFC 3339. `%#z` takes `Z`, `+hh:mm`, `+hhmm` or `+hh`.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Date-time layouts without an offset; read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp to Unix milliseconds.
///
/// Accepts RFC 3339, minute-precision date-times, offsets with or without a
/// colon, date-times with no offset (taken as UTC, not server-local time)
/// and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp_ms(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.timestamp_millis());
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(Utc.from_utc_datetime(&naive).timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).timestamp_millis())
}
