//! reqwest-backed [`Transport`] for switch calls

use async_trait::async_trait;
use finswitch_core::{HttpResponse, OutboundRequest, Transport, TransportError};
use finswitch_domain::{AdapterConfig, FinSwitchError};
use reqwest::Method;

use super::client::HttpClient;
use crate::errors::transport_error;

/// POSTs JSON envelopes and hands back every reply, whatever its status.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: HttpClient,
}

impl ReqwestTransport {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Transport over a client sized from `config`.
    pub fn from_config(config: &AdapterConfig) -> Result<Self, FinSwitchError> {
        Ok(Self::new(HttpClient::for_adapter(config)?))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: OutboundRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(Method::POST, request.url.as_str(), request.verify_tls)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let builder = builder.json(&request.body);

        let response = self.client.send(builder).await?;
        let status = response.status();
        let body = response.text().await.map_err(|err| transport_error(&err))?;

        Ok(HttpResponse::new(status.as_u16(), status.canonical_reason().unwrap_or_default(), body))
    }
}
