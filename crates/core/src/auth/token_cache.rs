//! Process-wide bearer token cache

use std::sync::Arc;
use std::time::Duration;

use finswitch_common::time::{Clock, SystemClock};
use finswitch_domain::AuthToken;
use parking_lot::Mutex;
use tracing::debug;

use crate::errors::AuthError;
use crate::gateway::ports::Authenticator;

/// Caches one bearer token for `ttl`.
///
/// The slot lock is never held across the authenticator call. Concurrent
/// callers that find the slot expired each fetch a token and the last write
/// wins.
pub struct TokenCache {
    authenticator: Arc<dyn Authenticator>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<AuthToken>>,
}

impl TokenCache {
    pub fn new(authenticator: Arc<dyn Authenticator>, ttl: Duration) -> Self {
        Self::with_clock(authenticator, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(authenticator: Arc<dyn Authenticator>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { authenticator, ttl, clock, slot: Mutex::new(None) }
    }

    pub async fn get_token(&self) -> Result<AuthToken, AuthError> {
        if let Some(token) = self.cached() {
            return Ok(token);
        }

        debug!("bearer token missing or expired, fetching a new one");
        let value = self.authenticator.authenticate().await?;
        if value.trim().is_empty() {
            return Err(AuthError::new("authenticator returned an empty token"));
        }

        let expires_at = self.clock.now().checked_add(self.ttl).ok_or_else(|| {
            AuthError::new(format!("token TTL of {}s is out of range", self.ttl.as_secs()))
        })?;
        let token = AuthToken::new(value, expires_at);
        *self.slot.lock() = Some(token.clone());
        Ok(token)
    }

    /// Valid cached token, if any
    pub fn cached(&self) -> Option<AuthToken> {
        let now = self.clock.now();
        self.slot.lock().as_ref().filter(|token| token.is_valid_at(now)).cloned()
    }

    /// Drop the cached token so the next call refetches.
    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}
