//! Age eligibility for new registrations.
//!
//! Age is elapsed time divided by a fixed 365-day year, so leap days make a
//! user "older" by up to one day every four years.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::config::MILLIS_PER_YEAR;

/// Whole years between midnight UTC of `birth_date` and `now` (floored).
pub fn age_in_years(birth_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let born = birth_date.and_time(NaiveTime::default()).and_utc();
    (now - born).num_milliseconds().div_euclid(MILLIS_PER_YEAR)
}

/// Whether someone born on `birth_date` meets `min_age` at `now`.
pub fn is_eligible(birth_date: NaiveDate, now: DateTime<Utc>, min_age: u32) -> bool {
    age_in_years(birth_date, now) >= i64::from(min_age)
}
