//! Unit tests for task reconciliation.

mod change_detector_tests;
mod domain_tests;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The instant every test clock reports.
pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
        .single()
        .unwrap_or_default()
}
