//! Tolerant date interpretation and quarter arithmetic
//!
//! Board CSVs come from spreadsheets in many locales. [`parse_date_loose`]
//! accepts a bounded set of forms, tried in a fixed order:
//!
//! 1. ISO `YYYY-MM-DD` (exact shape), as a plain calendar date
//! 2. `A/B/YYYY`: month-first when it forms a real date, otherwise day-first
//! 3. Spreadsheet short dates with a two-digit year, `M/D/YY` and `D-Mon-YY`.
//!    Years below 50 are 20xx, the rest 19xx.
//! 4. A short list of calendar-string forms ("Jan 5 2026", "5 January 2026",
//!    "5-Jan-2026", "2026/01/05", RFC 3339 timestamps, ...)
//!
//! Anything else is "no date". Nothing here ever fails.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::model::Quarter;

/// All quarters in reporting order
pub const QUARTERS: [Quarter; 4] = Quarter::ALL;

/// Calendar-string fallbacks, tried in order after the ISO and slash rules
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%a %b %d %Y",
    "%a, %d %b %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Two-digit years below this are 20xx, the rest 19xx
const TWO_DIGIT_YEAR_PIVOT: u32 = 50;

/// Years accepted from the calendar-string fallbacks
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Parse a free-text date cell.
///
/// Returns `None` for blank or unrecognized input.
///
/// # Examples
///
/// ```
/// use boardroom_common::dates::parse_date_loose;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date_loose("2026-01-31"), NaiveDate::from_ymd_opt(2026, 1, 31));
/// // 13 cannot be a month, so the day-first reading is used
/// assert_eq!(parse_date_loose("13/01/2026"), NaiveDate::from_ymd_opt(2026, 1, 13));
/// // Ambiguous: month-first wins
/// assert_eq!(parse_date_loose("02/03/2026"), NaiveDate::from_ymd_opt(2026, 2, 3));
/// assert_eq!(parse_date_loose("Jan 5 2026"), NaiveDate::from_ymd_opt(2026, 1, 5));
/// assert_eq!(parse_date_loose("not a date"), None);
/// ```
pub fn parse_date_loose(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // ISO first: a matching shape is final, even if the date does not exist
    if let Some((y, m, d)) = match_iso(raw) {
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    if let Some((a, b, y)) = match_slash(raw) {
        if (1..=12).contains(&a) && (1..=31).contains(&b) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, a, b) {
                return Some(date);
            }
        }
        if (1..=12).contains(&b) && (1..=31).contains(&a) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, b, a) {
                return Some(date);
            }
        }
    }

    parse_short_year(raw).or_else(|| parse_fallback(raw))
}

/// `YYYY-MM-DD` with exactly four, two and two digits
fn match_iso(raw: &str) -> Option<(i32, u32, u32)> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let y = parse_digits(&raw[0..4])?;
    let m = parse_digits(&raw[5..7])?;
    let d = parse_digits(&raw[8..10])?;
    Some((y as i32, m, d))
}

/// `A/B/YYYY` with one- or two-digit A and B
fn match_slash(raw: &str) -> Option<(u32, u32, i32)> {
    let mut parts = raw.split('/');
    let a = parts.next()?;
    let b = parts.next()?;
    let y = parts.next()?;
    if parts.next().is_some() || !(1..=2).contains(&a.len()) || !(1..=2).contains(&b.len()) || y.len() != 4 {
        return None;
    }
    Some((parse_digits(a)?, parse_digits(b)?, parse_digits(y)? as i32))
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `M/D/YY` (month-first only) or `D-Mon-YY`
fn parse_short_year(raw: &str) -> Option<NaiveDate> {
    let (separator, format) = if raw.contains('/') {
        ('/', "%m/%d/%Y")
    } else if raw.contains('-') {
        ('-', "%d-%b-%Y")
    } else {
        return None;
    };
    let (head, yy) = raw.rsplit_once(separator)?;
    if yy.len() != 2 {
        return None;
    }
    let yy = parse_digits(yy)?;
    let year = if yy < TWO_DIGIT_YEAR_PIVOT { 2000 + yy } else { 1900 + yy };
    NaiveDate::parse_from_str(&format!("{}{}{}", head, separator, year), format).ok()
}

fn parse_fallback(raw: &str) -> Option<NaiveDate> {
    let parsed = FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        // Keep the calendar date as written; no shift into local time
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            FALLBACK_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })?;

    // chrono's %Y accepts any digit count; "5 Jan 26" must not become year 26
    PLAUSIBLE_YEARS.contains(&parsed.year()).then_some(parsed)
}

/// Midnight at the start of the given instant's day
pub fn start_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_time(NaiveTime::MIN)
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (start_of_day(to) - start_of_day(from)).num_days()
}

/// Quarter containing a date: months 1-3 Q1, 4-6 Q2, 7-9 Q3, 10-12 Q4
pub fn quarter_for_date(date: NaiveDate) -> Quarter {
    match date.month() {
        1..=3 => Quarter::Q1,
        4..=6 => Quarter::Q2,
        7..=9 => Quarter::Q3,
        _ => Quarter::Q4,
    }
}

/// Inclusive date range of a quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive start and end of `quarter` in `year`.
///
/// `None` only when `year` is outside chrono's representable range.
pub fn quarter_range(year: i32, quarter: Quarter) -> Option<QuarterRange> {
    let (start_month, end_month, end_day) = match quarter {
        Quarter::Q1 => (1, 3, 31),
        Quarter::Q2 => (4, 6, 30),
        Quarter::Q3 => (7, 9, 30),
        Quarter::Q4 => (10, 12, 31),
    };
    Some(QuarterRange {
        start: NaiveDate::from_ymd_opt(year, start_month, 1)?,
        end: NaiveDate::from_ymd_opt(year, end_month, end_day)?,
    })
}

/// Where "now" sits in the reporting calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentQuarterInfo {
    pub quarter: Quarter,
    pub quarter_end: NaiveDate,
    /// Days until the quarter's last day, never negative
    pub days_remaining: i64,
}

pub fn current_quarter_info(now: NaiveDateTime) -> CurrentQuarterInfo {
    let today = now.date();
    let quarter = quarter_for_date(today);
    let quarter_end = quarter_range(today.year(), quarter)
        .map(|r| r.end)
        .unwrap_or(today);
    CurrentQuarterInfo {
        quarter,
        quarter_end,
        days_remaining: days_between(now, quarter_end.and_time(NaiveTime::MIN)).max(0),
    }
}

/// Short display form ("Jan 31, 2026"), or an em dash when absent
pub fn format_date_short(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %d, %Y").to_string(),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        ymd(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(parse_date_loose("2026-01-31"), Some(ymd(2026, 1, 31)));
        assert_eq!(parse_date_loose("  2026-12-01 "), Some(ymd(2026, 12, 1)));
        // Right shape but no such day
        assert_eq!(parse_date_loose("2026-02-30"), None);
    }

    #[test]
    fn test_slash_month_first_preferred() {
        assert_eq!(parse_date_loose("02/03/2026"), Some(ymd(2026, 2, 3)));
        assert_eq!(parse_date_loose("1/5/2026"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_date_loose("12/31/2026"), Some(ymd(2026, 12, 31)));
    }

    #[test]
    fn test_slash_day_first_fallback() {
        assert_eq!(parse_date_loose("13/01/2026"), Some(ymd(2026, 1, 13)));
        assert_eq!(parse_date_loose("31/12/2026"), Some(ymd(2026, 12, 31)));
    }

    #[test]
    fn test_slash_neither_reading_valid() {
        assert_eq!(parse_date_loose("13/13/2026"), None);
        assert_eq!(parse_date_loose("00/00/2026"), None);
        assert_eq!(parse_date_loose("1/2/026"), None);
    }

    #[test]
    fn test_two_digit_year_short_dates() {
        assert_eq!(parse_date_loose("1/2/26"), Some(ymd(2026, 1, 2)));
        assert_eq!(parse_date_loose("12/31/49"), Some(ymd(2049, 12, 31)));
        assert_eq!(parse_date_loose("6/1/50"), Some(ymd(1950, 6, 1)));
        assert_eq!(parse_date_loose("5-Jan-26"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_date_loose("15-Sep-99"), Some(ymd(1999, 9, 15)));
        assert_eq!(parse_date_loose("5-Jan-2026"), Some(ymd(2026, 1, 5)));
        // Month-first only; no day-first reading for short years
        assert_eq!(parse_date_loose("13/1/26"), None);
        assert_eq!(parse_date_loose("2/30/26"), None);
        assert_eq!(parse_date_loose("5-Foo-26"), None);
    }

    #[test]
    fn test_slash_nonexistent_dates_do_not_roll_over() {
        // Feb 30 does not exist and 30 is not a month
        assert_eq!(parse_date_loose("2/30/2026"), None);
        // Apr 31 does not exist and 31 is not a month
        assert_eq!(parse_date_loose("4/31/2026"), None);
        assert_eq!(parse_date_loose("31/4/2026"), None);
        assert_eq!(parse_date_loose("31/7/2026"), Some(ymd(2026, 7, 31)));
    }

    #[test]
    fn test_calendar_string_fallbacks() {
        assert_eq!(parse_date_loose("Jan 5 2026"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_date_loose("January 5, 2026"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_date_loose("5 Jan 2026"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_date_loose("2026/01/05"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_date_loose("2026-1-5"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_date_loose("2026-03-05T10:30:00"), Some(ymd(2026, 3, 5)));
        assert_eq!(parse_date_loose("2026-03-05T23:30:00-08:00"), Some(ymd(2026, 3, 5)));
    }

    #[test]
    fn test_unparseable_is_absent() {
        for raw in ["", "   ", "not a date", "TBC", "Q3", "2026", "31-31-2026"] {
            assert_eq!(parse_date_loose(raw), None, "input {:?}", raw);
        }
    }

    #[test]
    fn test_days_between_ignores_time_of_day() {
        assert_eq!(days_between(at(2026, 1, 1, 23), at(2026, 1, 2, 1)), 1);
        assert_eq!(days_between(at(2026, 1, 10, 8), at(2026, 1, 10, 20)), 0);
        assert_eq!(days_between(at(2026, 1, 10, 8), at(2026, 1, 3, 8)), -7);
        assert_eq!(start_of_day(at(2026, 5, 5, 17)), at(2026, 5, 5, 0));
    }

    #[test]
    fn test_quarter_for_date() {
        assert_eq!(quarter_for_date(ymd(2026, 1, 1)), Quarter::Q1);
        assert_eq!(quarter_for_date(ymd(2026, 3, 31)), Quarter::Q1);
        assert_eq!(quarter_for_date(ymd(2026, 4, 1)), Quarter::Q2);
        assert_eq!(quarter_for_date(ymd(2026, 9, 30)), Quarter::Q3);
        assert_eq!(quarter_for_date(ymd(2026, 10, 1)), Quarter::Q4);
    }

    #[test]
    fn test_quarter_range_inclusive() {
        let q1 = quarter_range(2026, Quarter::Q1).unwrap();
        assert_eq!(q1.start, ymd(2026, 1, 1));
        assert_eq!(q1.end, ymd(2026, 3, 31));
        let q2 = quarter_range(2026, Quarter::Q2).unwrap();
        assert_eq!(q2.end, ymd(2026, 6, 30));
        let q3 = quarter_range(2026, Quarter::Q3).unwrap();
        assert_eq!(q3.start, ymd(2026, 7, 1));
        assert_eq!(q3.end, ymd(2026, 9, 30));
        let q4 = quarter_range(2026, Quarter::Q4).unwrap();
        assert_eq!(q4.end, ymd(2026, 12, 31));
    }

    #[test]
    fn test_current_quarter_info() {
        let info = current_quarter_info(at(2026, 10, 19, 9));
        assert_eq!(info.quarter, Quarter::Q4);
        assert_eq!(info.quarter_end, ymd(2026, 12, 31));
        assert_eq!(info.days_remaining, 73);

        let last_day = current_quarter_info(at(2026, 3, 31, 18));
        assert_eq!(last_day.quarter, Quarter::Q1);
        assert_eq!(last_day.days_remaining, 0);
    }

    #[test]
    fn test_format_date_short() {
        assert_eq!(format_date_short(Some(ymd(2026, 1, 31))), "Jan 31, 2026");
        assert_eq!(format_date_short(Some(ymd(2026, 4, 5))), "Apr 05, 2026");
        assert_eq!(format_date_short(None), "—");
    }
}
