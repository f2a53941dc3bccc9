use std::fmt;

use tracing::{debug, Span};

/// Orchestration states of one operation call.
///
/// Calls move forward only; any failure jumps straight to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validating,
    Authenticating,
    Building,
    Sending,
    Mapping,
    Finalizing,
    Done,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Authenticating => "authenticating",
            Self::Building => "building",
            Self::Sending => "sending",
            Self::Mapping => "mapping",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
        }
    }

    /// Record the stage on the current span.
    pub(crate) fn enter(self) {
        Span::current().record("stage", self.as_str());
        debug!(stage = self.as_str(), "entering stage");
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
