//! Application context - dependency injection container

use std::path::PathBuf;
use std::sync::Arc;

use finswitch_core::{AuditLog, GatewayPorts, OperationKind, SwitchGateway, TransactionRepository};
use finswitch_domain::{AdapterConfig, FinSwitchError, Result, ResultRecord};
use finswitch_infra::{
    BroadcastNotifier, DbManager, HttpAuthenticator, HttpClient, ReqwestTransport,
    SqliteAuditLog, SqliteTransactionRepository, TracingAuditLog, TracingHttpLogger,
};
use tracing::info;

const DEFAULT_POOL_SIZE: u32 = 4;

/// Where transactions and audit entries are kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Storage {
    /// In-memory SQLite for transactions; audit entries go to the log.
    #[default]
    Memory,
    /// File-backed SQLite for both transactions and audit entries.
    File { path: PathBuf, pool_size: u32 },
}

impl Storage {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into(), pool_size: DEFAULT_POOL_SIZE }
    }
}

/// Application context - holds the gateway and its collaborators
pub struct AppContext {
    pub config: AdapterConfig,
    pub db: Arc<DbManager>,
    pub gateway: SwitchGateway,
    pub transactions: Arc<dyn TransactionRepository>,
    pub notifier: BroadcastNotifier,
}

impl AppContext {
    /// Wire every adapter for `config`, creating the database schema if needed.
    pub fn new(config: AdapterConfig, storage: Storage) -> Result<Self> {
        let db = Arc::new(match &storage {
            Storage::Memory => DbManager::in_memory()?,
            Storage::File { path, pool_size } => DbManager::new(path, *pool_size)?,
        });
        db.run_migrations()?;

        let audit: Arc<dyn AuditLog> = match storage {
            Storage::Memory => Arc::new(TracingAuditLog),
            Storage::File { .. } => Arc::new(SqliteAuditLog::new(Arc::clone(&db))),
        };

        let client = HttpClient::for_adapter(&config)?;

        let transactions: Arc<dyn TransactionRepository> =
            Arc::new(SqliteTransactionRepository::new(Arc::clone(&db)));
        let notifier = BroadcastNotifier::default();

        let ports = GatewayPorts {
            authenticator: Arc::new(HttpAuthenticator::new(client.clone(), &config)),
            transport: Arc::new(ReqwestTransport::new(client)),
            repository: Arc::clone(&transactions),
            logger: Arc::new(TracingHttpLogger),
            notifier: Arc::new(notifier.clone()),
            audit,
        };

        info!(
            base_url = %config.base_url,
            persistent = db.path().is_some(),
            retry_attempts = config.retry_attempts,
            "application context initialised"
        );

        Ok(Self {
            gateway: SwitchGateway::new(config.clone(), ports),
            config,
            db,
            transactions,
            notifier,
        })
    }

    /// Run one operation; never fails, the outcome is in the record.
    pub async fn execute<I, K, V>(&self, kind: OperationKind, fields: I) -> ResultRecord
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.gateway.execute(kind, fields).await
    }

    /// Check database connectivity off the async runtime.
    pub async fn health_check(&self) -> Result<()> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || db.health_check())
            .await
            .map_err(|e| FinSwitchError::Internal(format!("health check task failed: {e}")))?
    }
}
