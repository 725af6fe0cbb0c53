//! Row → [`Initiative`] extraction
//!
//! Missing cells read as empty strings, except due dates which become "no
//! date". Status cells go through [`normalize_status`], due cells through
//! [`parse_date_loose`] with the raw text kept alongside.

use csv::StringRecord;

use super::columns::{ColumnIndex, QuarterColumns};
use crate::dates::parse_date_loose;
use crate::model::{Initiative, QuarterMilestone, QuarterPlan};
use crate::status::normalize_status;

/// Trimmed cell text, or `""` when the column or cell is absent
fn cell(row: &StringRecord, column: Option<usize>) -> String {
    column
        .and_then(|i| row.get(i))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn extract_quarter(row: &StringRecord, columns: &QuarterColumns) -> QuarterMilestone {
    let due_raw = cell(row, columns.due);
    QuarterMilestone {
        milestone: cell(row, columns.milestone),
        due: parse_date_loose(&due_raw),
        due_raw: (!due_raw.is_empty()).then_some(due_raw),
        status: normalize_status(&cell(row, columns.status)),
        status_notes: cell(row, columns.status_notes),
    }
}

/// Build one initiative from a decoded row.
///
/// `index` is the row's zero-based position among decoded data rows; a blank
/// ID becomes `ROW-{index + 1}`.
pub fn extract_initiative(row: &StringRecord, columns: &ColumnIndex, index: usize) -> Initiative {
    let id = cell(row, columns.id);
    let id = if id.is_empty() { format!("ROW-{}", index + 1) } else { id };

    Initiative {
        id,
        name: cell(row, columns.name),
        opportunity: cell(row, columns.opportunity),
        lead: cell(row, columns.lead),
        accountable_executive: cell(row, columns.accountable_executive),
        annual_status: normalize_status(&cell(row, columns.annual_status)),
        annual_status_notes: cell(row, columns.annual_status_notes),
        impact_return_horizon: cell(row, columns.impact_return_horizon),
        quarters: QuarterPlan::from_fn(|q| extract_quarter(row, columns.quarter(q))),
    }
}

/// True when both the ID and name cells are blank (a pasted-export filler row)
pub fn is_placeholder_row(row: &StringRecord, columns: &ColumnIndex) -> bool {
    cell(row, columns.id).is_empty() && cell(row, columns.name).is_empty()
}
