//! Client-credential token fetch against the switch's auth endpoint

use async_trait::async_trait;
use finswitch_core::request::{HEADER_CLIENT_ID, HEADER_CLIENT_SECRET, HEADER_ORGANIZATION_ID};
use finswitch_core::{AuthError, Authenticator};
use finswitch_domain::AdapterConfig;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::client::HttpClient;

/// POSTs the configured client credentials and extracts the bearer token.
pub struct HttpAuthenticator {
    client: HttpClient,
    url: String,
    client_id: String,
    client_secret: String,
    organization_id: String,
    verify_tls: bool,
}

impl HttpAuthenticator {
    pub fn new(client: HttpClient, config: &AdapterConfig) -> Self {
        Self {
            client,
            url: config.url_for(&config.auth_endpoint),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            organization_id: config.organization_id().to_string(),
            verify_tls: config.verify_tls,
        }
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self) -> Result<String, AuthError> {
        let builder = self
            .client
            .request(Method::POST, self.url.as_str(), self.verify_tls)
            .header(HEADER_CLIENT_ID, self.client_id.as_str())
            .header(HEADER_CLIENT_SECRET, self.client_secret.as_str())
            .header(HEADER_ORGANIZATION_ID, self.organization_id.as_str())
            .json(&serde_json::json!({}));

        let response = self
            .client
            .send(builder)
            .await
            .map_err(|err| AuthError::new(format!("token request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::new(format!(
                "token endpoint returned HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| AuthError::new(format!("token response is not JSON: {err}")))?;

        debug!(url = %self.url, "token endpoint answered");
        extract_token(&body).ok_or_else(|| AuthError::new("token response carries no token"))
    }
}

/// Token from `access_token`, `token` or `AuthResponse.Token`, first non-empty wins.
fn extract_token(body: &Value) -> Option<String> {
    [
        body.get("access_token"),
        body.get("token"),
        body.get("AuthResponse").and_then(|inner| inner.get("Token")),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .map(str::trim)
    .find(|token| !token.is_empty())
    .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn authenticator(server: &MockServer) -> HttpAuthenticator {
        let config = AdapterConfig {
            base_url: server.uri(),
            client_id: "client-1".into(),
            client_secret: "secret-1".into(),
            ..Default::default()
        };
        HttpAuthenticator::new(HttpClient::new().unwrap(), &config)
    }

    #[test]
    fn extracts_token_from_known_shapes() {
        assert_eq!(extract_token(&json!({"access_token": "a"})).as_deref(), Some("a"));
        assert_eq!(extract_token(&json!({"token": "b"})).as_deref(), Some("b"));
        assert_eq!(
            extract_token(&json!({"AuthResponse": {"Token": "c"}})).as_deref(),
            Some("c")
        );
        assert_eq!(extract_token(&json!({"access_token": "", "token": "d"})).as_deref(), Some("d"));
        assert!(extract_token(&json!({"unexpected": "x"})).is_none());
    }

    #[tokio::test]
    async fn sends_client_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(header("clientId", "client-1"))
            .and(header("clientSecret", "secret-1"))
            .and(header("organizationId", "223"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
            .expect(1)
            .mount(&server)
            .await;

        let token = authenticator(&server).authenticate().await.unwrap();

        assert_eq!(token, "tok");
    }

    #[tokio::test]
    async fn rejected_credentials_are_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = authenticator(&server).authenticate().await.unwrap_err();

        assert!(err.message.contains("401"), "{err}");
    }

    #[tokio::test]
    async fn missing_token_field_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expires_in": 3600})))
            .mount(&server)
            .await;

        let err = authenticator(&server).authenticate().await.unwrap_err();

        assert_eq!(err.message, "token response carries no token");
    }
}
