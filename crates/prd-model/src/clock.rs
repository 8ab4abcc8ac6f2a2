//! Injected time source
//!
//! Artifact names and template timestamps are derived from a [`Clock`]
//! passed in by the caller so that naming stays deterministic under test.

use chrono::{DateTime, Utc};

/// Fixed-width UTC timestamp format used in artifact file names
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// `YYYYMMDD-HHMMSS` rendering of `now`
#[inline]
#[must_use]
pub fn artifact_timestamp(now: DateTime<Utc>) -> String {
    now.format(ARTIFACT_TIMESTAMP_FORMAT).to_string()
}
