//! Domain types and models

pub mod result;
pub mod token;
pub mod transaction;

pub use result::{JsonMap, ResultRecord};
pub use token::AuthToken;
pub use transaction::{AuditEntry, DomainEvent, NewTransaction, PersistedRecord};
