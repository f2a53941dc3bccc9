//! # FinSwitch Core
//!
//! Request/response orchestration for the financial switch - no
//! infrastructure dependencies.
//!
//! This crate contains:
//! - The operation catalog (field rules, envelope keys, response shapes)
//! - Port/adapter interfaces (traits)
//! - The token cache, request builder, response mapper and error normalizer
//! - `SwitchGateway`, which sequences them per call
//!
//! ## Architecture Principles
//! - Only depends on `finswitch-common` and `finswitch-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod auth;
pub mod errors;
pub mod gateway;
pub mod operations;
pub mod request;
pub mod response;

// Re-export specific items to avoid ambiguity
pub use auth::TokenCache;
pub use errors::{AuthError, ErrorKind, OperationError, TransportError};
pub use gateway::{
    AuditLog, Authenticator, EventNotifier, GatewayPorts, HttpLogger, HttpResponse, Stage,
    SwitchGateway, TransactionRepository, Transport,
};
pub use operations::{OperationKind, OperationSpec, UnknownOperation};
pub use request::{OutboundRequest, RequestRecord};
pub use response::{map_response, normalize, Mapped};
