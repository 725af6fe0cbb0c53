//! Initiative filtering
//!
//! Every criterion is optional; an absent criterion matches everything
//! ("All" in the dashboard).

use serde::{Deserialize, Serialize};

use crate::model::{Initiative, Quarter};
use crate::status::Status;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeFilter {
    pub opportunity: Option<String>,
    pub lead: Option<String>,
    pub status: Option<Status>,
    /// Keep only initiatives with a milestone scheduled in this quarter
    pub quarter: Option<Quarter>,
    /// Case-insensitive substring of `"{id} {name}"`
    pub search: Option<String>,
}

impl InitiativeFilter {
    /// True when every present criterion matches
    pub fn matches(&self, initiative: &Initiative) -> bool {
        if let Some(opportunity) = &self.opportunity {
            if &initiative.opportunity != opportunity {
                return false;
            }
        }
        if let Some(lead) = &self.lead {
            if &initiative.lead != lead {
                return false;
            }
        }
        if let Some(status) = self.status {
            if initiative.annual_status != status {
                return false;
            }
        }
        if let Some(quarter) = self.quarter {
            if !initiative.quarters[quarter].has_milestone() {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let haystack = format!("{} {}", initiative.id, initiative.name).to_lowercase();
                if !haystack.contains(&needle) {
                    return false;
                }
            }
        }
        true
    }

    /// Matching initiatives in input order
    pub fn apply<'a>(&self, initiatives: &'a [Initiative]) -> Vec<&'a Initiative> {
        initiatives.iter().filter(|i| self.matches(i)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Values available to each filter criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub opportunities: Vec<String>,
    pub leads: Vec<String>,
    pub statuses: Vec<Status>,
    pub quarters: Vec<Quarter>,
}

/// Distinct non-empty opportunities and leads (sorted), distinct annual
/// statuses (sorted by label), and all four quarters
pub fn filter_options(initiatives: &[Initiative]) -> FilterOptions {
    let mut opportunities: Vec<String> = initiatives
        .iter()
        .map(|i| i.opportunity.clone())
        .filter(|o| !o.is_empty())
        .collect();
    opportunities.sort();
    opportunities.dedup();

    let mut leads: Vec<String> = initiatives
        .iter()
        .map(|i| i.lead.clone())
        .filter(|l| !l.is_empty())
        .collect();
    leads.sort();
    leads.dedup();

    let mut statuses: Vec<Status> = initiatives.iter().map(|i| i.annual_status).collect();
    statuses.sort_by_key(|s| s.label());
    statuses.dedup();

    FilterOptions {
        opportunities,
        leads,
        statuses,
        quarters: Quarter::ALL.to_vec(),
    }
}
