//! Clock access
//!
//! Metric functions take `now` explicitly; callers get it from here.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Start of `as_of` when given, otherwise the current local time
pub fn reference_instant(as_of: Option<NaiveDate>) -> NaiveDateTime {
    match as_of {
        Some(date) => date.and_time(NaiveTime::MIN),
        None => now(),
    }
}
