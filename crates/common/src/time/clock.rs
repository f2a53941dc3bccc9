//! Injectable time sources.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, Local};
use parking_lot::Mutex;

/// Clock abstraction for testable time-dependent behavior
pub trait Clock: Send + Sync + 'static {
    /// Get current instant (monotonic time)
    fn now(&self) -> Instant;

    /// Get current system time (wall clock)
    fn system_time(&self) -> SystemTime;
}

/// Real system clock implementation for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn system_time(&self) -> SystemTime {
        (**self).system_time()
    }
}

/// Mock clock for deterministic testing
///
/// Clones share the same elapsed time, so a test can hand one clone to the
/// code under test and advance the other.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    wall_start: SystemTime,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::with_wall_time(SystemTime::UNIX_EPOCH)
    }

    /// Mock clock whose wall time starts at `wall_start`
    pub fn with_wall_time(wall_start: SystemTime) -> Self {
        Self { start: Instant::now(), wall_start, elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn system_time(&self) -> SystemTime {
        self.wall_start + self.elapsed()
    }
}

/// Format a wall-clock time in local time with a chrono format string.
pub fn format_local(time: SystemTime, format: &str) -> String {
    DateTime::<Local>::from(time).format(format).to_string()
}
