//! SQLite persistence for transactions and audit entries

pub mod audit_repository;
pub mod manager;
pub mod transaction_repository;

pub use audit_repository::SqliteAuditLog;
pub use manager::{DbManager, SqliteConnection, SqlitePool};
pub use transaction_repository::SqliteTransactionRepository;
