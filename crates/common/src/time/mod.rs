//! Time utilities and abstractions
//!
//! - **Clock abstractions**: real and mock time so TTL logic can be tested
//!   without sleeping
//! - **Formatting**: wall-clock timestamps in upstream field formats
//!
//! ```rust
//! use std::time::Duration;
//!
//! use finswitch_common::time::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let before = clock.now();
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.now() - before, Duration::from_secs(5));
//! ```

pub mod clock;

pub use clock::{format_local, Clock, MockClock, SystemClock};
