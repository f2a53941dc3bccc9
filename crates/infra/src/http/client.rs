use std::time::Duration;

use finswitch_core::TransportError;
use finswitch_domain::{AdapterConfig, FinSwitchError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::{transport_error, InfraError};

/// HTTP client with built-in retry support.
///
/// Holds one pooled client that verifies TLS certificates and one that does
/// not; callers pick per request.
#[derive(Clone)]
pub struct HttpClient {
    verifying: ReqwestClient,
    insecure: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, FinSwitchError> {
        Self::builder().build()
    }

    /// Client sized from the adapter's default timeout and retry settings.
    pub fn for_adapter(config: &AdapterConfig) -> Result<Self, FinSwitchError> {
        Self::builder()
            .timeout(Duration::from_secs(config.default_timeout_secs))
            .max_attempts(config.retry_attempts)
            .user_agent(concat!("finswitch/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Create a request builder on the client matching `verify_tls`.
    pub fn request<U>(&self, method: Method, url: U, verify_tls: bool) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        let client = if verify_tls { &self.verifying } else { &self.insecure };
        client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    ///
    /// Server errors and network failures are retried until `max_attempts` is
    /// reached; the last response (any status) is returned as-is.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TransportError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                TransportError::Request(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                )
            })?;

            let (client, request) = cloned_builder.build_split();
            let request = request.map_err(|err| transport_error(&err))?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if status.is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %url, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(transport_error(&err));
                }
            }
        }

        Err(TransportError::Request("http client exhausted retries without producing a result".into()))
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = u32::try_from(retry_number.saturating_sub(1).min(8)).unwrap_or(8);
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 1,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Client-wide timeout; a per-request timeout takes precedence.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, FinSwitchError> {
        let verifying = self.client(false)?;
        let insecure = self.client(true)?;

        Ok(HttpClient {
            verifying,
            insecure,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }

    fn client(&self, accept_invalid_certs: bool) -> Result<ReqwestClient, FinSwitchError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        if accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().map_err(|err| FinSwitchError::from(InfraError::from(err)))
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_request() || err.is_connect()
}
