//! Outbound envelope and header construction

use std::collections::BTreeMap;
use std::time::Duration;

use finswitch_domain::{AdapterConfig, AuthToken};
use serde_json::{Map, Value};

use super::record::RequestRecord;
use crate::errors::OperationError;
use crate::operations::OperationSpec;

pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_CLIENT_ID: &str = "clientId";
pub const HEADER_CLIENT_SECRET: &str = "clientSecret";
pub const HEADER_ORGANIZATION_ID: &str = "organizationId";

const APPLICATION_JSON: &str = "application/json";

/// Fully resolved POST handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    pub timeout: Duration,
    pub verify_tls: bool,
}

/// Resolved endpoint path and timeout for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub endpoint: String,
    pub timeout: Duration,
}

/// Catalog defaults, replaced by any per-operation override in `config`.
pub fn resolve_route(config: &AdapterConfig, spec: &OperationSpec) -> Result<Route, OperationError> {
    if config.base_url.trim().is_empty() {
        return Err(OperationError::Config("base URL is not configured".to_string()));
    }

    let override_ = config.operations.get(spec.name);
    let endpoint = override_.map_or(spec.endpoint, |o| o.endpoint.as_str()).trim();
    if endpoint.is_empty() {
        return Err(OperationError::Config(format!("no endpoint configured for {}", spec.name)));
    }

    let timeout_secs = override_
        .and_then(|o| o.timeout_secs)
        .or(spec.timeout_secs)
        .unwrap_or(config.default_timeout_secs);

    Ok(Route { endpoint: endpoint.to_string(), timeout: Duration::from_secs(timeout_secs) })
}

/// Wrap the record's fields under the operation's request key and attach the
/// fixed header set.
pub fn build_request(
    config: &AdapterConfig,
    record: &RequestRecord,
    token: &AuthToken,
) -> Result<OutboundRequest, OperationError> {
    let spec = record.spec();
    let route = resolve_route(config, spec)?;

    let headers = BTreeMap::from([
        (HEADER_ACCEPT.to_string(), APPLICATION_JSON.to_string()),
        (HEADER_CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
        (HEADER_CLIENT_ID.to_string(), config.client_id.clone()),
        (HEADER_CLIENT_SECRET.to_string(), token.value.clone()),
        (HEADER_ORGANIZATION_ID.to_string(), config.organization_id().to_string()),
    ]);

    Ok(OutboundRequest {
        url: config.url_for(&route.endpoint),
        headers,
        body: envelope(spec, record),
        timeout: route.timeout,
        verify_tls: config.verify_tls,
    })
}

/// `{ request_key: { field: value, ... } }` with absent fields left out.
pub fn envelope(spec: &OperationSpec, record: &RequestRecord) -> Value {
    let inner: Map<String, Value> = spec
        .fields
        .iter()
        .filter_map(|field| {
            record.get(field.key).map(|value| (field.key.to_string(), Value::String(value.to_string())))
        })
        .collect();

    let mut outer = Map::new();
    outer.insert(spec.request_key.to_string(), Value::Object(inner));
    Value::Object(outer)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use finswitch_domain::OperationConfig;

    use super::*;
    use crate::operations::OperationKind;

    fn config() -> AdapterConfig {
        AdapterConfig {
            base_url: "https://switch.test".into(),
            client_id: "client-1".into(),
            ..Default::default()
        }
    }

    fn token() -> AuthToken {
        AuthToken::new("bearer-xyz", Instant::now())
    }

    fn link_record(otp: Option<&str>) -> RequestRecord {
        let mut fields = vec![
            ("Cnic", "4210112345671"),
            ("MobileNumber", "03001234567"),
            ("AccountNumber", "0011223344"),
            ("Rrn", "2023011233242312"),
        ];
        if let Some(otp) = otp {
            fields.push(("Otp", otp));
        }
        RequestRecord::new(OperationKind::LinkAccount, fields).unwrap()
    }

    #[test]
    fn fixed_header_set() {
        let request = build_request(&config(), &link_record(None), &token()).unwrap();

        assert_eq!(request.headers["Accept"], "application/json");
        assert_eq!(request.headers["Content-Type"], "application/json");
        assert_eq!(request.headers["clientId"], "client-1");
        assert_eq!(request.headers["clientSecret"], "bearer-xyz");
        assert_eq!(request.headers["organizationId"], "223");
        assert_eq!(request.headers.len(), 5);
    }

    #[test]
    fn body_wrapped_under_request_key() {
        let request = build_request(&config(), &link_record(Some("1234")), &token()).unwrap();

        let inner = &request.body["LinkAccountRequest"];
        assert_eq!(inner["Cnic"], "4210112345671");
        assert_eq!(inner["Otp"], "1234");
        assert_eq!(request.body.as_object().unwrap().len(), 1);
        assert_eq!(request.url, "https://switch.test/api/v1/link-account");
        assert_eq!(request.timeout, Duration::from_secs(60));
    }

    #[test]
    fn absent_optional_field_is_omitted() {
        let request = build_request(&config(), &link_record(None), &token()).unwrap();
        let inner = request.body["LinkAccountRequest"].as_object().unwrap();
        assert!(!inner.contains_key("Otp"));
    }

    #[test]
    fn overrides_replace_catalog_defaults() {
        let mut config = config();
        config.organization_id = "501".into();
        config.verify_tls = false;
        config.operations.insert(
            "linkAccount".into(),
            OperationConfig { endpoint: "/v2/link".into(), timeout_secs: Some(15) },
        );

        let request = build_request(&config, &link_record(None), &token()).unwrap();
        assert_eq!(request.url, "https://switch.test/v2/link");
        assert_eq!(request.timeout, Duration::from_secs(15));
        assert_eq!(request.headers["organizationId"], "501");
        assert!(!request.verify_tls);
    }

    #[test]
    fn default_timeout_used_when_catalog_has_none() {
        let mut config = config();
        config.default_timeout_secs = 45;
        let spec = OperationKind::AccountInfo.spec();
        assert_eq!(resolve_route(&config, spec).unwrap().timeout, Duration::from_secs(45));
    }

    #[test]
    fn missing_configuration_is_a_config_error() {
        let config = config().with_operation("linkAccount", "  ");
        let err = build_request(&config, &link_record(None), &token()).unwrap_err();
        assert!(matches!(err, OperationError::Config(ref m) if m.contains("linkAccount")));

        let config = AdapterConfig::default();
        let err = build_request(&config, &link_record(None), &token()).unwrap_err();
        assert!(matches!(err, OperationError::Config(_)));
    }
}
