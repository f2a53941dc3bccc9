//! Switch gateway: orchestration and the ports it drives

pub mod ports;
pub mod service;
pub mod stage;

pub use ports::{
    AuditLog, Authenticator, EventNotifier, HttpLogger, HttpResponse, TransactionRepository,
    Transport,
};
pub use service::{GatewayPorts, SwitchGateway};
pub use stage::Stage;
