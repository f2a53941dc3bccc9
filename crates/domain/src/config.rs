//! Adapter configuration structures
//!
//! The gateway receives one `AdapterConfig` at construction time. Loading it
//! from the environment or from files is handled by the infrastructure crate.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AUDIT_MODULE, DEFAULT_AUTH_ENDPOINT, DEFAULT_ORGANIZATION_ID, DEFAULT_RETRY_ATTEMPTS,
    DEFAULT_SENSITIVE_FIELDS, DEFAULT_SUCCESS_CODE, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_TTL_SECS,
};

/// Per-operation overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationConfig {
    /// Endpoint path appended to `base_url` (e.g. `/api/v1/link-account`)
    pub endpoint: String,
    /// Request timeout; falls back to the catalog default when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Configuration for the switch adapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdapterConfig {
    /// Base URL of the financial switch (e.g. "https://switch.example.com")
    pub base_url: String,
    pub client_id: String,
    /// Credential exchanged for a bearer token by the authenticator
    pub client_secret: String,
    pub organization_id: String,
    pub auth_endpoint: String,
    pub token_ttl_secs: u64,
    pub default_timeout_secs: u64,
    pub verify_tls: bool,
    /// Total transport attempts (initial try + retries); not used by the core
    pub retry_attempts: usize,
    pub success_code: String,
    pub sensitive_fields: Vec<String>,
    pub audit_module: String,
    /// Overrides keyed by operation name (`linkAccount`, `accountInfo`, ...)
    pub operations: BTreeMap<String, OperationConfig>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            organization_id: DEFAULT_ORGANIZATION_ID.to_string(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_tls: true,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            success_code: DEFAULT_SUCCESS_CODE.to_string(),
            sensitive_fields: DEFAULT_SENSITIVE_FIELDS.iter().map(|s| (*s).to_string()).collect(),
            audit_module: DEFAULT_AUDIT_MODULE.to_string(),
            operations: BTreeMap::new(),
        }
    }
}

impl AdapterConfig {
    /// Token lifetime as a `Duration`
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Organization id sent upstream; blank values fall back to the sentinel.
    pub fn organization_id(&self) -> &str {
        let trimmed = self.organization_id.trim();
        if trimmed.is_empty() {
            DEFAULT_ORGANIZATION_ID
        } else {
            trimmed
        }
    }

    /// Join the base URL and an endpoint path without doubling slashes.
    pub fn url_for(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        }
    }

    /// Override (or add) one operation's endpoint.
    pub fn with_operation(mut self, name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        self.operations.insert(
            name.into(),
            OperationConfig { endpoint: endpoint.into(), timeout_secs: None },
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_conventions() {
        let config = AdapterConfig::default();
        assert_eq!(config.organization_id(), "223");
        assert_eq!(config.success_code, "00");
        assert_eq!(config.token_ttl(), Duration::from_secs(3600));
        assert!(config.verify_tls);
        assert!(config.sensitive_fields.iter().any(|f| f == "cnic"));
    }

    #[test]
    fn blank_organization_falls_back_to_sentinel() {
        let config = AdapterConfig { organization_id: "  ".into(), ..Default::default() };
        assert_eq!(config.organization_id(), "223");
    }

    #[test]
    fn url_for_joins_without_double_slash() {
        let config =
            AdapterConfig { base_url: "https://switch.test/".into(), ..Default::default() };
        assert_eq!(config.url_for("/api/link"), "https://switch.test/api/link");
        assert_eq!(config.url_for("api/link"), "https://switch.test/api/link");
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"base_url":"https://switch.test","client_id":"abc"}"#)
                .unwrap();
        assert_eq!(config.client_id, "abc");
        assert_eq!(config.default_timeout_secs, 30);
        assert!(config.operations.is_empty());
    }
}
