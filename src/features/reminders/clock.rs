//! Wall-clock source for the scheduler

use chrono::{DateTime, Utc};

/// Source of the current time
///
/// Injected into the scheduler so tests can drive it with tokio's paused clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
