//! Initiative listing and detail

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use boardroom_common::dates::format_date_short;
use boardroom_common::metrics::{
    days_until_next_milestone, next_due_date, overdue_quarters, quarterly_progress_pct,
    risk_quarters,
};
use boardroom_common::status::StatusTone;
use boardroom_common::{Initiative, Quarter};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use super::params::{query_or_bad_request, AsOfQuery, InitiativeQuery};
use super::ApiError;
use crate::AppState;

/// An initiative with its time-dependent metrics evaluated at `as_of`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeView {
    #[serde(flatten)]
    pub initiative: Initiative,
    pub annual_tone: StatusTone,
    pub progress_pct: f64,
    pub risk_quarters: Vec<Quarter>,
    pub overdue_quarters: Vec<Quarter>,
    pub days_until_next_milestone: Option<i64>,
    pub next_due: Option<NaiveDate>,
    /// e.g. "Apr 15, 2026", or "—"
    pub next_due_label: String,
}

impl InitiativeView {
    pub fn build(initiative: &Initiative, now: NaiveDateTime) -> Self {
        let next_due = next_due_date(initiative);
        Self {
            annual_tone: initiative.annual_status.tone(),
            progress_pct: quarterly_progress_pct(initiative),
            risk_quarters: risk_quarters(initiative),
            overdue_quarters: overdue_quarters(initiative, now),
            days_until_next_milestone: days_until_next_milestone(initiative, now),
            next_due,
            next_due_label: format_date_short(next_due),
            initiative: initiative.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeListResponse {
    pub as_of: NaiveDate,
    /// Initiatives in the dataset before filtering
    pub total: usize,
    pub count: usize,
    pub initiatives: Vec<InitiativeView>,
}

/// GET /api/initiatives
///
/// Filtered initiatives in source order.
pub async fn list_initiatives(
    State(state): State<AppState>,
    query: Result<Query<InitiativeQuery>, QueryRejection>,
) -> Result<Json<InitiativeListResponse>, ApiError> {
    let query = query_or_bad_request(query)?;
    let filter = query.filter()?;
    let now = query.instant()?;

    let dataset = state.snapshot().await;
    let initiatives: Vec<InitiativeView> = filter
        .apply(&dataset.parsed.initiatives)
        .into_iter()
        .map(|i| InitiativeView::build(i, now))
        .collect();

    debug!(
        "Listed {} of {} initiatives",
        initiatives.len(),
        dataset.parsed.initiatives.len()
    );

    Ok(Json(InitiativeListResponse {
        as_of: now.date(),
        total: dataset.parsed.initiatives.len(),
        count: initiatives.len(),
        initiatives,
    }))
}

/// GET /api/initiatives/:id
pub async fn get_initiative(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Result<Json<InitiativeView>, ApiError> {
    let now = query_or_bad_request(query)?.instant()?;
    let dataset = state.snapshot().await;

    dataset
        .parsed
        .initiatives
        .iter()
        .find(|i| i.id == id)
        .map(|i| Json(InitiativeView::build(i, now)))
        .ok_or_else(|| ApiError::NotFound(format!("Initiative not found: {}", id)))
}
