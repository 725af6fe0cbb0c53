//! Portfolio domain model
//!
//! Strongly-typed records produced by the CSV importer. Every status field is
//! a [`Status`] (never raw text) and every initiative carries exactly one
//! milestone slot per quarter.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::Status;
use crate::Error;

/// Reporting quarter. Multi-year data collapses into the same four buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// All quarters in reporting order
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn label(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quarter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            other => Err(Error::InvalidInput(format!("Unknown quarter: {}", other))),
        }
    }
}

/// One quarter's milestone for an initiative
///
/// An empty `milestone` means nothing is scheduled for the quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterMilestone {
    pub milestone: String,
    /// Normalized due date; drives all date arithmetic
    pub due: Option<NaiveDate>,
    /// Due cell exactly as it appeared in the CSV (after trimming), if any
    pub due_raw: Option<String>,
    pub status: Status,
    pub status_notes: String,
}

impl QuarterMilestone {
    /// True when a milestone is scheduled for this quarter
    pub fn has_milestone(&self) -> bool {
        !self.milestone.is_empty()
    }

    /// Scheduled and not yet Complete
    pub fn is_open(&self) -> bool {
        self.has_milestone() && self.status != Status::Complete
    }
}

impl Default for QuarterMilestone {
    fn default() -> Self {
        Self {
            milestone: String::new(),
            due: None,
            due_raw: None,
            status: Status::NotCommenced,
            status_notes: String::new(),
        }
    }
}

/// Exactly one milestone per quarter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterPlan {
    #[serde(rename = "Q1")]
    pub q1: QuarterMilestone,
    #[serde(rename = "Q2")]
    pub q2: QuarterMilestone,
    #[serde(rename = "Q3")]
    pub q3: QuarterMilestone,
    #[serde(rename = "Q4")]
    pub q4: QuarterMilestone,
}

impl QuarterPlan {
    /// Build a plan by producing each quarter's milestone in order
    pub fn from_fn(mut f: impl FnMut(Quarter) -> QuarterMilestone) -> Self {
        Self {
            q1: f(Quarter::Q1),
            q2: f(Quarter::Q2),
            q3: f(Quarter::Q3),
            q4: f(Quarter::Q4),
        }
    }

    pub fn get(&self, quarter: Quarter) -> &QuarterMilestone {
        match quarter {
            Quarter::Q1 => &self.q1,
            Quarter::Q2 => &self.q2,
            Quarter::Q3 => &self.q3,
            Quarter::Q4 => &self.q4,
        }
    }

    pub fn get_mut(&mut self, quarter: Quarter) -> &mut QuarterMilestone {
        match quarter {
            Quarter::Q1 => &mut self.q1,
            Quarter::Q2 => &mut self.q2,
            Quarter::Q3 => &mut self.q3,
            Quarter::Q4 => &mut self.q4,
        }
    }

    /// Iterate quarters in Q1..Q4 order
    pub fn iter(&self) -> impl Iterator<Item = (Quarter, &QuarterMilestone)> {
        Quarter::ALL.into_iter().map(move |q| (q, self.get(q)))
    }
}

impl std::ops::Index<Quarter> for QuarterPlan {
    type Output = QuarterMilestone;

    fn index(&self, quarter: Quarter) -> &Self::Output {
        self.get(quarter)
    }
}

/// One strategic program tracked across the year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiative {
    /// Never empty; `ROW-{n}` when the source row had no ID
    pub id: String,
    pub name: String,
    /// Theme / grouping key
    pub opportunity: String,
    pub lead: String,
    pub accountable_executive: String,
    pub annual_status: Status,
    pub annual_status_notes: String,
    pub impact_return_horizon: String,
    pub quarters: QuarterPlan,
}

impl Initiative {
    /// Create an initiative with blank fields and an empty quarter plan
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            opportunity: String::new(),
            lead: String::new(),
            accountable_executive: String::new(),
            annual_status: Status::NotCommenced,
            annual_status_notes: String::new(),
            impact_return_horizon: String::new(),
            quarters: QuarterPlan::default(),
        }
    }
}

/// Output of one CSV import
///
/// Built once per parse and never mutated; a new import supersedes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub initiatives: Vec<Initiative>,
    pub warnings: Vec<String>,
}
