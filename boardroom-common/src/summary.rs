//! Portfolio-level summaries
//!
//! Aggregations over a whole initiative list: per-theme rollups, the risk
//! register, headline metrics and the status breakdown.

use serde::{Deserialize, Serialize};

use crate::metrics::{is_commenced, risk_quarters, rounded_pct};
use crate::model::{Initiative, Quarter};
use crate::status::{rollup_worst_status, Status};

/// Group key for initiatives with a blank opportunity
pub const UNASSIGNED_THEME: &str = "Unassigned";

/// Separator between notes in a risk register entry
pub const NOTES_SEPARATOR: &str = " • ";

/// Display order for the status breakdown
pub const BREAKDOWN_ORDER: [Status; 6] = [
    Status::OnTrack,
    Status::AtRisk,
    Status::Blocked,
    Status::InProgress,
    Status::Complete,
    Status::NotCommenced,
];

/// Rollup of all initiatives sharing an opportunity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub opportunity: String,
    pub count: usize,
    pub complete_count: usize,
    pub rollup_status: Status,
    pub progress_pct: u32,
}

/// A risk-flagged quarter and the status that flagged it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskQuarter {
    pub quarter: Quarter,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEntry {
    pub id: String,
    pub name: String,
    pub lead: String,
    pub opportunity: String,
    pub annual_status: Status,
    pub annual_risk: bool,
    pub risk_quarters: Vec<RiskQuarter>,
    /// Annual notes (when the annual status is a risk) then risk-quarter
    /// notes, blanks skipped
    pub notes: String,
}

/// Headline portfolio numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    pub total: usize,
    pub complete_count: usize,
    pub complete_pct: u32,
    pub commenced_count: usize,
    /// On Track or Complete, as a share of commenced
    pub on_track_pct: u32,
    /// At Risk or Blocked among commenced
    pub at_risk_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Group initiatives by opportunity and roll each group up.
///
/// Groups appear in first-appearance order, then are stably sorted by rollup
/// severity (worst first) and member count (largest first).
pub fn theme_summaries(initiatives: &[Initiative]) -> Vec<ThemeSummary> {
    let mut groups: Vec<(String, Vec<&Initiative>)> = Vec::new();
    for initiative in initiatives {
        let key = if initiative.opportunity.is_empty() {
            UNASSIGNED_THEME
        } else {
            initiative.opportunity.as_str()
        };
        match groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, members)) => members.push(initiative),
            None => groups.push((key.to_string(), vec![initiative])),
        }
    }

    let mut summaries: Vec<ThemeSummary> = groups
        .into_iter()
        .map(|(opportunity, members)| {
            let complete_count = members
                .iter()
                .filter(|i| i.annual_status == Status::Complete)
                .count();
            let statuses: Vec<Status> = members.iter().map(|i| i.annual_status).collect();
            ThemeSummary {
                opportunity,
                count: members.len(),
                complete_count,
                rollup_status: rollup_worst_status(&statuses),
                progress_pct: rounded_pct(complete_count, members.len()),
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.rollup_status
            .severity()
            .cmp(&a.rollup_status.severity())
            .then(b.count.cmp(&a.count))
    });
    summaries
}

/// Initiatives with an annual risk status or any risk-flagged quarter, in
/// input order
pub fn risk_register(initiatives: &[Initiative]) -> Vec<RiskEntry> {
    initiatives
        .iter()
        .filter_map(|initiative| {
            let quarters = risk_quarters(initiative);
            let annual_risk = initiative.annual_status.is_risk();
            if !annual_risk && quarters.is_empty() {
                return None;
            }

            let mut notes: Vec<&str> = Vec::new();
            if annual_risk && !initiative.annual_status_notes.is_empty() {
                notes.push(&initiative.annual_status_notes);
            }
            notes.extend(
                quarters
                    .iter()
                    .map(|q| initiative.quarters[*q].status_notes.as_str())
                    .filter(|n| !n.is_empty()),
            );

            Some(RiskEntry {
                id: initiative.id.clone(),
                name: initiative.name.clone(),
                lead: initiative.lead.clone(),
                opportunity: initiative.opportunity.clone(),
                annual_status: initiative.annual_status,
                annual_risk,
                risk_quarters: quarters
                    .iter()
                    .map(|q| RiskQuarter {
                        quarter: *q,
                        status: initiative.quarters[*q].status,
                    })
                    .collect(),
                notes: notes.join(NOTES_SEPARATOR),
            })
        })
        .collect()
}

pub fn portfolio_metrics(initiatives: &[Initiative]) -> PortfolioMetrics {
    let complete_count = initiatives
        .iter()
        .filter(|i| i.annual_status == Status::Complete)
        .count();
    let commenced: Vec<&Initiative> = initiatives.iter().filter(|i| is_commenced(i)).collect();
    let green = commenced.iter().filter(|i| i.annual_status.is_green()).count();
    let at_risk_count = commenced.iter().filter(|i| i.annual_status.is_risk()).count();

    PortfolioMetrics {
        total: initiatives.len(),
        complete_count,
        complete_pct: rounded_pct(complete_count, initiatives.len()),
        commenced_count: commenced.len(),
        on_track_pct: rounded_pct(green, commenced.len()),
        at_risk_count,
    }
}

/// Annual status counts in [`BREAKDOWN_ORDER`], zero counts included
pub fn status_breakdown(initiatives: &[Initiative]) -> Vec<StatusCount> {
    BREAKDOWN_ORDER
        .iter()
        .map(|&status| StatusCount {
            status,
            count: initiatives.iter().filter(|i| i.annual_status == status).count(),
        })
        .collect()
}
