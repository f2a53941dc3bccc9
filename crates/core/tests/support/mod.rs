//! Shared test helpers for `finswitch-core` integration tests.
//!
//! Lightweight in-memory mocks for every gateway port, so flow tests can
//! focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod ports;

use std::sync::Arc;

use finswitch_core::{GatewayPorts, HttpResponse, SwitchGateway, TransportError};
use finswitch_domain::AdapterConfig;

pub use ports::{
    MockAuthenticator, MockTransport, RecordingAudit, RecordingLogger, RecordingNotifier,
    InMemoryRepository,
};

/// Every mock behind one handle so tests can inspect calls afterwards.
pub struct Harness {
    pub authenticator: Arc<MockAuthenticator>,
    pub transport: Arc<MockTransport>,
    pub repository: Arc<InMemoryRepository>,
    pub logger: Arc<RecordingLogger>,
    pub notifier: Arc<RecordingNotifier>,
    pub audit: Arc<RecordingAudit>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            authenticator: Arc::new(MockAuthenticator::ok("token-abc")),
            transport: Arc::new(MockTransport::default()),
            repository: Arc::new(InMemoryRepository::default()),
            logger: Arc::new(RecordingLogger::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            audit: Arc::new(RecordingAudit::default()),
        }
    }

    pub fn with_authenticator(mut self, authenticator: MockAuthenticator) -> Self {
        self.authenticator = Arc::new(authenticator);
        self
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.transport.push(Ok(HttpResponse::new(status, reason(status), body)));
        self
    }

    pub fn fail_transport(self, error: TransportError) -> Self {
        self.transport.push(Err(error));
        self
    }

    pub fn gateway(&self) -> SwitchGateway {
        SwitchGateway::new(config(), self.ports())
    }

    pub fn ports(&self) -> GatewayPorts {
        GatewayPorts {
            authenticator: self.authenticator.clone(),
            transport: self.transport.clone(),
            repository: self.repository.clone(),
            logger: self.logger.clone(),
            notifier: self.notifier.clone(),
            audit: self.audit.clone(),
        }
    }
}

pub fn config() -> AdapterConfig {
    AdapterConfig {
        base_url: "https://switch.test".into(),
        client_id: "client-1".into(),
        client_secret: "secret-1".into(),
        ..Default::default()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "",
    }
}
