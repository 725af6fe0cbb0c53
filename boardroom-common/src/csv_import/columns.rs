//! Board-report column catalogue
//!
//! Every header literal the importer understands lives here. Headers are
//! matched exactly after trimming; unknown columns are ignored. The header
//! row is resolved once per import into a [`ColumnIndex`] of cell positions.

use crate::model::Quarter;

pub const ID: &str = "ID";
pub const STRATEGIC_INITIATIVE: &str = "Strategic Initiative";
pub const OPPORTUNITY: &str = "Opportunity";
pub const LEAD: &str = "Lead";
pub const ACCOUNTABLE_EXECUTIVE: &str = "Accountable Executive";
pub const ANNUAL_STATUS: &str = "Annual Status";
pub const ANNUAL_STATUS_NOTES: &str = "Annual Status Notes";
pub const IMPACT_RETURN_HORIZON: &str = "Impact / Return Horizon";

/// Headers whose absence is reported as a warning
pub const REQUIRED_HEADERS: [&str; 5] = [ID, STRATEGIC_INITIATIVE, OPPORTUNITY, LEAD, ANNUAL_STATUS];

/// Initiative-level headers, in canonical export order
pub const INITIATIVE_HEADERS: [&str; 8] = [
    ID,
    STRATEGIC_INITIATIVE,
    OPPORTUNITY,
    LEAD,
    ACCOUNTABLE_EXECUTIVE,
    ANNUAL_STATUS,
    ANNUAL_STATUS_NOTES,
    IMPACT_RETURN_HORIZON,
];

/// Per-quarter column kinds; the header is `"{quarter} {suffix}"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterField {
    Milestone,
    Due,
    Status,
    StatusNotes,
}

impl QuarterField {
    pub const ALL: [QuarterField; 4] = [
        QuarterField::Milestone,
        QuarterField::Due,
        QuarterField::Status,
        QuarterField::StatusNotes,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            QuarterField::Milestone => "Milestone",
            QuarterField::Due => "Due",
            QuarterField::Status => "Status",
            QuarterField::StatusNotes => "Status Notes",
        }
    }
}

/// Header text for one quarter column, e.g. `"Q2 Status Notes"`
pub fn quarter_header(quarter: Quarter, field: QuarterField) -> String {
    format!("{} {}", quarter.label(), field.suffix())
}

/// Every recognized header in canonical export order
pub fn recognized_headers() -> Vec<String> {
    let mut headers: Vec<String> = INITIATIVE_HEADERS.iter().map(|h| h.to_string()).collect();
    for quarter in Quarter::ALL {
        for field in QuarterField::ALL {
            headers.push(quarter_header(quarter, field));
        }
    }
    headers
}

/// Required headers absent from a (trimmed) header row, in declaration order
pub fn missing_required_headers(headers: &[String]) -> Vec<&'static str> {
    REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == required))
        .collect()
}

/// Cell positions of one quarter's columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuarterColumns {
    pub milestone: Option<usize>,
    pub due: Option<usize>,
    pub status: Option<usize>,
    pub status_notes: Option<usize>,
}

/// Cell positions of every recognized column; `None` = column absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    pub id: Option<usize>,
    pub name: Option<usize>,
    pub opportunity: Option<usize>,
    pub lead: Option<usize>,
    pub accountable_executive: Option<usize>,
    pub annual_status: Option<usize>,
    pub annual_status_notes: Option<usize>,
    pub impact_return_horizon: Option<usize>,
    pub quarters: [QuarterColumns; 4],
}

impl ColumnIndex {
    /// Resolve positions from a trimmed header row.
    ///
    /// If a header appears twice, the first occurrence wins.
    pub fn resolve(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let mut quarters = [QuarterColumns::default(); 4];
        for (slot, quarter) in quarters.iter_mut().zip(Quarter::ALL) {
            *slot = QuarterColumns {
                milestone: find(&quarter_header(quarter, QuarterField::Milestone)),
                due: find(&quarter_header(quarter, QuarterField::Due)),
                status: find(&quarter_header(quarter, QuarterField::Status)),
                status_notes: find(&quarter_header(quarter, QuarterField::StatusNotes)),
            };
        }

        Self {
            id: find(ID),
            name: find(STRATEGIC_INITIATIVE),
            opportunity: find(OPPORTUNITY),
            lead: find(LEAD),
            accountable_executive: find(ACCOUNTABLE_EXECUTIVE),
            annual_status: find(ANNUAL_STATUS),
            annual_status_notes: find(ANNUAL_STATUS_NOTES),
            impact_return_horizon: find(IMPACT_RETURN_HORIZON),
            quarters,
        }
    }

    pub fn quarter(&self, quarter: Quarter) -> &QuarterColumns {
        &self.quarters[quarter as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_quarter_header_names() {
        assert_eq!(quarter_header(Quarter::Q1, QuarterField::Milestone), "Q1 Milestone");
        assert_eq!(quarter_header(Quarter::Q4, QuarterField::Due), "Q4 Due");
        assert_eq!(quarter_header(Quarter::Q2, QuarterField::StatusNotes), "Q2 Status Notes");
    }

    #[test]
    fn test_recognized_headers_complete() {
        let all = recognized_headers();
        assert_eq!(all.len(), 8 + 4 * 4);
        assert_eq!(all[0], "ID");
        assert_eq!(all[8], "Q1 Milestone");
        assert_eq!(all.last().unwrap(), "Q4 Status Notes");
    }

    #[test]
    fn test_missing_required_headers() {
        let present = headers(&["ID", "Lead", "Extra"]);
        assert_eq!(
            missing_required_headers(&present),
            vec!["Strategic Initiative", "Opportunity", "Annual Status"]
        );
        assert!(missing_required_headers(&headers(&REQUIRED_HEADERS)).is_empty());
    }

    #[test]
    fn test_resolve_positions() {
        let row = headers(&["Lead", "ID", "Q3 Due", "Strategic Initiative", "ID"]);
        let index = ColumnIndex::resolve(&row);
        assert_eq!(index.lead, Some(0));
        assert_eq!(index.id, Some(1)); // first occurrence
        assert_eq!(index.name, Some(3));
        assert_eq!(index.opportunity, None);
        assert_eq!(index.quarter(Quarter::Q3).due, Some(2));
        assert_eq!(index.quarter(Quarter::Q3).status, None);
        assert_eq!(index.quarter(Quarter::Q1), &QuarterColumns::default());
    }
}
