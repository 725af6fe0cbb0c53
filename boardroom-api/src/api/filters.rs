//! Filter option lists

use axum::{extract::State, Json};
use boardroom_common::filter::{filter_options, FilterOptions};

use crate::AppState;

/// GET /api/filters/options
///
/// Distinct values for each filter criterion in the current dataset.
pub async fn get_filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    let dataset = state.snapshot().await;
    Json(filter_options(&dataset.parsed.initiatives))
}
