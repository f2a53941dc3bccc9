//! Bearer credential held by the token cache

use std::fmt;
use std::time::Instant;

/// Bearer credential with an absolute expiry.
///
/// Never persisted. `Debug` output hides the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub value: String,
    pub expires_at: Instant,
}

impl AuthToken {
    pub fn new(value: impl Into<String>, expires_at: Instant) -> Self {
        Self { value: value.into(), expires_at }
    }

    /// True while `now` is strictly before the expiry instant.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn expiry_is_exclusive() {
        let now = Instant::now();
        let token = AuthToken::new("abc", now + Duration::from_secs(10));
        assert!(token.is_valid_at(now));
        assert!(!token.is_valid_at(now + Duration::from_secs(10)));
    }

    #[test]
    fn debug_hides_value() {
        let token = AuthToken::new("super-secret", Instant::now());
        assert!(!format!("{token:?}").contains("super-secret"));
    }
}
