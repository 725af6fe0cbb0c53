//! Derived metrics over initiatives
//!
//! Pure functions: no I/O, no shared state. Anything time-dependent takes
//! `now` explicitly so results are reproducible.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::model::{Initiative, Quarter};
use crate::status::Status;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Portfolio health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLabel {
    Healthy,
    Caution,
    Critical,
}

impl HealthLabel {
    pub fn label(&self) -> &'static str {
        match self {
            HealthLabel::Healthy => "Healthy",
            HealthLabel::Caution => "Caution",
            HealthLabel::Critical => "Critical",
        }
    }
}

fn due_instant(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Percentage of scheduled quarters that are Complete (0 when none scheduled)
pub fn quarterly_progress_pct(initiative: &Initiative) -> f64 {
    let scheduled = initiative.quarters.iter().filter(|(_, m)| m.has_milestone()).count();
    if scheduled == 0 {
        return 0.0;
    }
    let complete = initiative
        .quarters
        .iter()
        .filter(|(_, m)| m.has_milestone() && m.status == Status::Complete)
        .count();
    complete as f64 / scheduled as f64 * 100.0
}

/// Quarters whose status is At Risk or Blocked, in Q1..Q4 order
pub fn risk_quarters(initiative: &Initiative) -> Vec<Quarter> {
    initiative
        .quarters
        .iter()
        .filter(|(_, m)| m.status.is_risk())
        .map(|(q, _)| q)
        .collect()
}

/// Scheduled, not Complete, and due strictly before `now`
pub fn overdue_quarters(initiative: &Initiative, now: NaiveDateTime) -> Vec<Quarter> {
    initiative
        .quarters
        .iter()
        .filter(|(_, m)| m.is_open() && m.due.is_some_and(|d| due_instant(d) < now))
        .map(|(q, _)| q)
        .collect()
}

/// Days (rounded up) until the nearest open milestone due at or after `now`.
///
/// `None` when no open milestone has a future due date.
pub fn days_until_next_milestone(initiative: &Initiative, now: NaiveDateTime) -> Option<i64> {
    let nearest_ms = initiative
        .quarters
        .iter()
        .filter(|(_, m)| m.is_open())
        .filter_map(|(_, m)| m.due)
        .map(|d| (due_instant(d) - now).num_milliseconds())
        .filter(|ms| *ms >= 0)
        .min()?;
    Some((nearest_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY)
}

/// Earliest due date among open milestones, overdue ones included
pub fn next_due_date(initiative: &Initiative) -> Option<NaiveDate> {
    initiative
        .quarters
        .iter()
        .filter(|(_, m)| m.is_open())
        .filter_map(|(_, m)| m.due)
        .min()
}

/// Per-quarter status markers in Q1..Q4 order
pub fn quarter_dots(initiative: &Initiative) -> Vec<(Quarter, Status)> {
    initiative.quarters.iter().map(|(q, m)| (q, m.status)).collect()
}

/// Anything other than Not Commenced
pub fn is_commenced(initiative: &Initiative) -> bool {
    initiative.annual_status != Status::NotCommenced
}

/// Classify portfolio risk over commenced initiatives.
///
/// Risk ratio = (At Risk + Blocked) / commenced. At most 10% is Healthy, at
/// most 30% Caution, above that Critical. No commenced work is Healthy.
pub fn portfolio_health_label(initiatives: &[Initiative]) -> HealthLabel {
    let commenced: Vec<_> = initiatives.iter().filter(|i| is_commenced(i)).collect();
    if commenced.is_empty() {
        return HealthLabel::Healthy;
    }
    let at_risk = commenced.iter().filter(|i| i.annual_status.is_risk()).count();

    // Integer cross-multiplication keeps the 10% / 30% boundaries exact
    if at_risk * 10 <= commenced.len() {
        HealthLabel::Healthy
    } else if at_risk * 10 <= commenced.len() * 3 {
        HealthLabel::Caution
    } else {
        HealthLabel::Critical
    }
}

/// Rounded percentage of commenced initiatives that are On Track or Complete.
///
/// 100 when nothing has commenced.
pub fn health_score_pct(initiatives: &[Initiative]) -> u32 {
    let commenced: Vec<_> = initiatives.iter().filter(|i| is_commenced(i)).collect();
    if commenced.is_empty() {
        return 100;
    }
    let green = commenced.iter().filter(|i| i.annual_status.is_green()).count();
    rounded_pct(green, commenced.len())
}

/// `part / whole * 100`, rounded half away from zero; 0 for an empty whole
pub(crate) fn rounded_pct(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
