//! Wall-clock abstraction used to stamp `created_at` / `updated_at`.

use chrono::{DateTime, Utc};

/// Abstraction over the system clock for dependency injection.
///
/// Allows deterministic testing by replacing the real clock with a scripted one.
/// The default implementation ([`SystemClock`]) delegates to [`Utc::now`].
pub trait ClockSource: Send + Sync {
    /// Returns the current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Default clock source that reads the real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
