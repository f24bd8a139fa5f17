//! Helpers shared by unit and integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single instant.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }

    /// Clock reading 09:30 UTC on the given day.
    pub fn on(year: i32, month: u32, day: u32) -> Arc<dyn Clock> {
        let utc_now = Utc
            .with_ymd_and_hms(year, month, day, 9, 30, 0)
            .single()
            .unwrap_or_else(|| panic!("{year}-{month}-{day} is not a valid date"));
        Arc::new(Self::at(utc_now))
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Shorthand for a calendar date in test data.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("{year}-{month}-{day} is not a valid date"))
}
