//! Switch gateway - orchestrates one operation call end to end

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use finswitch_common::privacy::Redactor;
use finswitch_common::time::{Clock, SystemClock};
use finswitch_domain::{
    AdapterConfig, AuditEntry, DomainEvent, JsonMap, NewTransaction, PersistedRecord, ResultRecord,
};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use super::ports::{
    AuditLog, Authenticator, EventNotifier, HttpLogger, TransactionRepository, Transport,
};
use super::stage::Stage;
use crate::auth::TokenCache;
use crate::errors::OperationError;
use crate::operations::{sensitive_field_keys, OperationKind, OperationSpec};
use crate::request::{build_request, RequestRecord};
use crate::response::{map_response, normalize, Mapped};

const UNAUTHORIZED: u16 = 401;

/// Collaborators the gateway drives
#[derive(Clone)]
pub struct GatewayPorts {
    pub authenticator: Arc<dyn Authenticator>,
    pub transport: Arc<dyn Transport>,
    pub repository: Arc<dyn TransactionRepository>,
    pub logger: Arc<dyn HttpLogger>,
    pub notifier: Arc<dyn EventNotifier>,
    pub audit: Arc<dyn AuditLog>,
}

/// Runs switch operations and always answers with a `ResultRecord`.
pub struct SwitchGateway {
    config: AdapterConfig,
    tokens: TokenCache,
    transport: Arc<dyn Transport>,
    repository: Arc<dyn TransactionRepository>,
    logger: Arc<dyn HttpLogger>,
    notifier: Arc<dyn EventNotifier>,
    audit: Arc<dyn AuditLog>,
    redactor: Redactor,
    clock: Arc<dyn Clock>,
}

impl SwitchGateway {
    pub fn new(config: AdapterConfig, ports: GatewayPorts) -> Self {
        Self::with_clock(config, ports, Arc::new(SystemClock))
    }

    /// Gateway whose token expiry and generated timestamps follow `clock`
    pub fn with_clock(config: AdapterConfig, ports: GatewayPorts, clock: Arc<dyn Clock>) -> Self {
        let tokens =
            TokenCache::with_clock(ports.authenticator, config.token_ttl(), Arc::clone(&clock));
        let redactor = Redactor::new(
            config.sensitive_fields.iter().cloned().chain(sensitive_field_keys().map(String::from)),
        );

        Self {
            config,
            tokens,
            transport: ports.transport,
            repository: ports.repository,
            logger: ports.logger,
            notifier: ports.notifier,
            audit: ports.audit,
            redactor,
            clock,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// Validate raw fields for `kind`, then run the operation.
    #[instrument(
        name = "switch_operation",
        skip_all,
        fields(operation = %kind, stage = tracing::field::Empty)
    )]
    pub async fn execute<I, K, V>(&self, kind: OperationKind, fields: I) -> ResultRecord
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let spec = kind.spec();
        let fields: BTreeMap<String, String> =
            fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.log_entry(spec, &fields);

        Stage::Validating.enter();
        match RequestRecord::with_clock(kind, fields, self.clock.as_ref()) {
            Ok(record) => self.process(&record).await,
            Err(err) => self.fail(spec, &OperationError::Validation(err)),
        }
    }

    /// Run an already validated record.
    #[instrument(
        name = "switch_operation",
        skip_all,
        fields(operation = %record.kind(), stage = tracing::field::Empty)
    )]
    pub async fn submit(&self, record: RequestRecord) -> ResultRecord {
        self.log_entry(record.spec(), record.fields());
        self.process(&record).await
    }

    async fn process(&self, record: &RequestRecord) -> ResultRecord {
        let spec = record.spec();
        let mapped = match self.exchange(record).await {
            Ok(mapped) => mapped,
            Err(err) => return self.fail(spec, &err),
        };

        if let Some(kind) = mapped.failure_kind() {
            warn!(error_kind = %kind, "operation did not succeed");
        }
        if let Some(error) = mapped.error() {
            self.logger.log_error(spec.name, &error);
        }

        if mapped.is_structured() {
            Stage::Finalizing.enter();
            self.finalize(record, mapped.record()).await;
        }

        Stage::Done.enter();
        let result = mapped.into_record();
        info!(success = result.success, response_code = %result.code, "operation completed");
        result
    }

    async fn exchange(&self, record: &RequestRecord) -> Result<Mapped, OperationError> {
        let spec = record.spec();

        Stage::Authenticating.enter();
        let token = self.tokens.get_token().await?;

        Stage::Building.enter();
        let request = build_request(&self.config, record, &token)?;

        Stage::Sending.enter();
        self.logger.log_request(
            &request.url,
            &self.redactor.redact_value(&request.body),
            &self.redactor.redact_headers(&request.headers),
        );
        let response = self.transport.post(request).await?;
        self.logger.log_response(response.status, &self.redacted_body(&response.body));

        if response.status == UNAUTHORIZED {
            self.tokens.invalidate();
        }
        if !response.is_success() {
            return Err(OperationError::Upstream {
                status: response.status,
                reason: response.reason,
                body: response.body,
            });
        }

        Stage::Mapping.enter();
        let success_code = spec.success_code(&self.config.success_code);
        Ok(map_response(&response.body, &spec.response, success_code))
    }

    /// Persist, audit and, on success, announce. Failures here are logged only.
    async fn finalize(&self, record: &RequestRecord, result: &ResultRecord) {
        let spec = record.spec();
        let request = self.redacted_fields(record.fields());
        let response = self.redactor.redact_map(&result.payload);

        let mut attributes = JsonMap::new();
        attributes.insert("request".to_string(), Value::Object(request.clone()));
        attributes.insert("response".to_string(), Value::Object(response));

        let transaction = NewTransaction {
            operation: spec.name.to_string(),
            trace_no: record.trace_no().map(str::to_string),
            rrn: record.rrn().map(str::to_string),
            cnic: record.cnic().map(str::to_string),
            mobile: record.mobile().map(str::to_string),
            response_code: result.code.clone(),
            success: result.success,
            attributes,
        };

        let persisted = match self.repository.create(transaction).await {
            Ok(persisted) => Some(persisted),
            Err(err) => {
                error!(error = %err, "Failed to persist transaction");
                None
            }
        };

        let mut payload = JsonMap::new();
        payload.insert("request".to_string(), Value::Object(request));
        payload.insert(
            "response".to_string(),
            Value::Object(self.redactor.redact_map(&result.raw_response)),
        );
        payload.insert("success".to_string(), Value::Bool(result.success));
        payload.insert("responseCode".to_string(), Value::String(result.code.clone()));

        let entry = AuditEntry {
            operation: spec.name.to_string(),
            module: self.config.audit_module.clone(),
            payload,
            correlation_id: record.rrn().map(str::to_string),
            trace_no: record.trace_no().map(str::to_string),
        };
        if let Err(err) = self.audit.log(entry).await {
            error!(error = %err, "Failed to write audit entry");
        }

        if result.success {
            match persisted {
                Some(persisted) => self.announce(spec, persisted, result).await,
                None => warn!("Skipping domain event: transaction was not persisted"),
            }
        }
    }

    async fn announce(&self, spec: &OperationSpec, record: PersistedRecord, result: &ResultRecord) {
        let event = DomainEvent {
            operation: spec.name.to_string(),
            record,
            result: result.clone(),
            occurred_at: DateTime::<Utc>::from(self.clock.system_time()),
        };
        if let Err(err) = self.notifier.dispatch(event).await {
            error!(error = %err, "Failed to dispatch domain event");
        }
    }

    fn fail(&self, spec: &OperationSpec, error: &OperationError) -> ResultRecord {
        Stage::Done.enter();
        warn!(error_kind = %error.kind(), error = %error, "operation failed");
        self.logger.log_error(spec.name, error);
        normalize(error, spec)
    }

    fn log_entry(&self, spec: &OperationSpec, fields: &BTreeMap<String, String>) {
        let context = json!({
            "operation": spec.name,
            "fields": self.redacted_fields(fields),
        });
        self.logger.log_info(&format!("{} request received", spec.display_name), &context);
    }

    fn redacted_fields(&self, fields: &BTreeMap<String, String>) -> JsonMap {
        let map: JsonMap =
            fields.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect();
        self.redactor.redact_map(&map)
    }

    /// Redacted JSON body, or the raw text when it is not JSON
    fn redacted_body(&self, body: &str) -> Value {
        serde_json::from_str::<Value>(body)
            .map_or_else(|_| Value::String(body.to_string()), |value| self.redactor.redact_value(&value))
    }
}
