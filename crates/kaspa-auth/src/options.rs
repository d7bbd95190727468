//! Verification options.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default tolerance for clock differences between signer and verifier: 5 minutes.
pub const DEFAULT_CLOCK_SKEW_MS: i64 = 5 * 60 * 1000;

/// Decides whether a nonce is acceptable, e.g. issued by us and not yet used.
///
/// Any `Fn(&str) -> bool` closure is a `NonceCheck`. Implement the trait
/// directly when the decision needs an async lookup.
#[async_trait]
pub trait NonceCheck: Send + Sync {
    async fn accept(&self, nonce: &str) -> bool;
}

#[async_trait]
impl<F> NonceCheck for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn accept(&self, nonce: &str) -> bool {
        self(nonce)
    }
}

/// Options for [`verify_siwk`](crate::verify_siwk).
#[derive(Clone)]
pub struct VerifyOptions {
    /// Require `fields.domain` to equal this exactly.
    pub domain: Option<String>,
    /// Reference instant for time checks; `None` means now.
    pub at_time: Option<DateTime<Utc>>,
    /// Nonce acceptance check.
    pub check_nonce: Option<Arc<dyn NonceCheck>>,
    /// Tolerance applied to `issuedAt`, `notBefore` and `expirationTime`.
    pub clock_skew_ms: i64,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn at_time(mut self, at: DateTime<Utc>) -> Self {
        self.at_time = Some(at);
        self
    }

    pub fn check_nonce(mut self, check: impl NonceCheck + 'static) -> Self {
        self.check_nonce = Some(Arc::new(check));
        self
    }

    pub fn clock_skew_ms(mut self, skew_ms: i64) -> Self {
        self.clock_skew_ms = skew_ms;
        self
    }

    /// The reference instant in Unix milliseconds.
    pub fn reference_time_ms(&self) -> i64 {
        self.at_time.unwrap_or_else(Utc::now).timestamp_millis()
    }

    /// The domain to enforce, ignoring an empty string.
    pub fn expected_domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            domain: None,
            at_time: None,
            check_nonce: None,
            clock_skew_ms: DEFAULT_CLOCK_SKEW_MS,
        }
    }
}

impl fmt::Debug for VerifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyOptions")
            .field("domain", &self.domain)
            .field("at_time", &self.at_time)
            .field("check_nonce", &self.check_nonce.is_some())
            .field("clock_skew_ms", &self.clock_skew_ms)
            .finish()
    }
}

/// The static part of [`VerifyOptions`], loadable from service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyConfig {
    pub domain: Option<String>,
    pub clock_skew_ms: i64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            domain: None,
            clock_skew_ms: DEFAULT_CLOCK_SKEW_MS,
        }
    }
}

impl From<VerifyConfig> for VerifyOptions {
    fn from(config: VerifyConfig) -> Self {
        Self {
            domain: config.domain,
            clock_skew_ms: config.clock_skew_ms,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let options = VerifyOptions::default();
        assert_eq!(options.clock_skew_ms, 300_000);
        assert!(options.domain.is_none());
        assert!(options.check_nonce.is_none());
    }

    #[test]
    fn test_reference_time() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let options = VerifyOptions::new().at_time(at);
        assert_eq!(options.reference_time_ms(), 1_704_067_200_000);
    }

    #[test]
    fn test_empty_domain_not_enforced() {
        assert_eq!(VerifyOptions::new().with_domain("").expected_domain(), None);
        assert_eq!(
            VerifyOptions::new().with_domain("example.com").expected_domain(),
            Some("example.com")
        );
    }

    #[tokio::test]
    async fn test_closure_nonce_check() {
        let options = VerifyOptions::new().check_nonce(|nonce: &str| nonce == "expected");
        let check = options.check_nonce.as_ref().unwrap();
        assert!(check.accept("expected").await);
        assert!(!check.accept("other").await);
    }

    #[test]
    fn test_config_from_json() {
        let config: VerifyConfig = serde_json::from_str(r#"{"domain":"example.com"}"#).unwrap();
        assert_eq!(config.clock_skew_ms, DEFAULT_CLOCK_SKEW_MS);

        let options = VerifyOptions::from(config);
        assert_eq!(options.expected_domain(), Some("example.com"));

        let config: VerifyConfig = serde_json::from_str(r#"{"clockSkewMs":1000}"#).unwrap();
        assert_eq!(config.clock_skew_ms, 1000);
        assert_eq!(config.domain, None);
    }

    #[test]
    fn test_debug_hides_closure() {
        let options = VerifyOptions::new().check_nonce(|_: &str| true);
        assert!(format!("{options:?}").contains("check_nonce: true"));
    }
}
