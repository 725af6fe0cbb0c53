//! Portfolio-level views: summary, themes, risk register

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use boardroom_common::dates::{current_quarter_info, CurrentQuarterInfo};
use boardroom_common::metrics::{health_score_pct, portfolio_health_label, HealthLabel};
use boardroom_common::summary::{
    portfolio_metrics, risk_register, status_breakdown, theme_summaries, PortfolioMetrics,
    RiskEntry, StatusCount, ThemeSummary,
};
use chrono::NaiveDate;
use serde::Serialize;

use super::params::{query_or_bad_request, AsOfQuery};
use super::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub as_of: NaiveDate,
    pub health_label: HealthLabel,
    pub health_score: u32,
    pub status_breakdown: Vec<StatusCount>,
    pub metrics: PortfolioMetrics,
    pub current_quarter: CurrentQuarterInfo,
    /// Serving the built-in sample rather than imported data
    pub is_sample: bool,
    pub warning_count: usize,
}

/// GET /api/summary
pub async fn get_summary(
    State(state): State<AppState>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let now = query_or_bad_request(query)?.instant()?;
    let dataset = state.snapshot().await;
    let initiatives = &dataset.parsed.initiatives;

    Ok(Json(SummaryResponse {
        as_of: now.date(),
        health_label: portfolio_health_label(initiatives),
        health_score: health_score_pct(initiatives),
        status_breakdown: status_breakdown(initiatives),
        metrics: portfolio_metrics(initiatives),
        current_quarter: current_quarter_info(now),
        is_sample: dataset.is_sample,
        warning_count: dataset.parsed.warnings.len(),
    }))
}

/// GET /api/themes
pub async fn get_themes(State(state): State<AppState>) -> Json<Vec<ThemeSummary>> {
    let dataset = state.snapshot().await;
    Json(theme_summaries(&dataset.parsed.initiatives))
}

/// GET /api/risks
pub async fn get_risks(State(state): State<AppState>) -> Json<Vec<RiskEntry>> {
    let dataset = state.snapshot().await;
    Json(risk_register(&dataset.parsed.initiatives))
}
