//! Status normalization and severity ordering
//!
//! Board CSVs carry free-text status cells. [`normalize_status`] maps them
//! onto the closed [`Status`] enumeration; anything unrecognized (including
//! a blank cell) becomes `Not Commenced`.
//!
//! Severity, worst first:
//! Blocked (5) > At Risk (4) > In Progress (3) > On Track (2) > Not Commenced (1) > Complete (0)
//!
//! Complete sits below Not Commenced on purpose: it marks resolved risk, so it
//! must never win a worst-case rollup.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical initiative / milestone status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Complete")]
    Complete,
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Blocked")]
    Blocked,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Not Commenced")]
    NotCommenced,
}

/// Statuses from most to least severe
pub const STATUS_ORDER: [Status; 6] = [
    Status::Blocked,
    Status::AtRisk,
    Status::InProgress,
    Status::OnTrack,
    Status::NotCommenced,
    Status::Complete,
];

/// Colour family a status is displayed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Green,
    Amber,
    Red,
    Grey,
    Blue,
}

impl Status {
    /// All statuses, most severe first
    pub const ALL: [Status; 6] = STATUS_ORDER;

    /// Human-readable label, identical to the canonical CSV spelling
    pub fn label(&self) -> &'static str {
        match self {
            Status::Complete => "Complete",
            Status::OnTrack => "On Track",
            Status::AtRisk => "At Risk",
            Status::Blocked => "Blocked",
            Status::InProgress => "In Progress",
            Status::NotCommenced => "Not Commenced",
        }
    }

    /// Higher = worse
    pub fn severity(&self) -> u8 {
        match self {
            Status::Blocked => 5,
            Status::AtRisk => 4,
            Status::InProgress => 3,
            Status::OnTrack => 2,
            Status::NotCommenced => 1,
            Status::Complete => 0,
        }
    }

    /// At Risk or Blocked
    pub fn is_risk(&self) -> bool {
        matches!(self, Status::AtRisk | Status::Blocked)
    }

    /// On Track or Complete
    pub fn is_green(&self) -> bool {
        matches!(self, Status::OnTrack | Status::Complete)
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Status::Complete | Status::OnTrack => StatusTone::Green,
            Status::AtRisk => StatusTone::Amber,
            Status::Blocked => StatusTone::Red,
            Status::NotCommenced => StatusTone::Grey,
            Status::InProgress => StatusTone::Blue,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Ordered by severity so that `max()` is the worst status.
impl Ord for Status {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Strict parse for query parameters: unlike [`normalize_status`], unknown
/// text is an error rather than `Not Commenced`.
impl FromStr for Status {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "not commenced" | "not-commenced" => Ok(Status::NotCommenced),
            other => match normalize_status(other) {
                Status::NotCommenced => Err(crate::Error::InvalidInput(format!(
                    "Unknown status: {}",
                    s.trim()
                ))),
                status => Ok(status),
            },
        }
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        normalize_status(raw)
    }
}

/// Map a free-text status cell onto [`Status`].
///
/// Case-insensitive, trims whitespace, accepts space or hyphen separated
/// two-word spellings. Never fails: unknown or blank input is `Not Commenced`.
///
/// # Examples
///
/// ```
/// use boardroom_common::status::{normalize_status, Status};
///
/// assert_eq!(normalize_status("  on-track "), Status::OnTrack);
/// assert_eq!(normalize_status("AT RISK"), Status::AtRisk);
/// assert_eq!(normalize_status(""), Status::NotCommenced);
/// assert_eq!(normalize_status("green"), Status::NotCommenced);
/// ```
pub fn normalize_status(raw: &str) -> Status {
    match raw.trim().to_lowercase().as_str() {
        "complete" => Status::Complete,
        "on track" | "on-track" => Status::OnTrack,
        "at risk" | "at-risk" => Status::AtRisk,
        "blocked" => Status::Blocked,
        "in progress" | "in-progress" => Status::InProgress,
        _ => Status::NotCommenced,
    }
}

/// Severity rank of a status (higher = worse)
pub fn status_severity(status: Status) -> u8 {
    status.severity()
}

/// Worst status of a group.
///
/// Empty input rolls up to `Not Commenced`. On equal severity the earliest
/// element is kept.
pub fn rollup_worst_status(statuses: &[Status]) -> Status {
    let Some((&first, rest)) = statuses.split_first() else {
        return Status::NotCommenced;
    };
    rest.iter().fold(first, |worst, &s| {
        if s.severity() > worst.severity() {
            s
        } else {
            worst
        }
    })
}
