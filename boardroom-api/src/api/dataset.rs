//! Dataset import, reset, and raw access
//!
//! An import replaces the whole dataset: the text is parsed, then persisted
//! and swapped in under one writer lock. A dry run parses and reports without touching either.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::params::query_or_bad_request;
use super::ApiError;
use crate::{AppState, Dataset};

#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub dry_run: bool,
}

/// Outcome of an import or reset
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub initiative_count: usize,
    pub warnings: Vec<String>,
    pub dry_run: bool,
    /// Whether the dataset in service changed
    pub applied: bool,
    pub is_sample: bool,
}

impl ImportResponse {
    fn describe(dataset: &Dataset, dry_run: bool) -> Self {
        Self {
            initiative_count: dataset.parsed.initiatives.len(),
            warnings: dataset.parsed.warnings.clone(),
            dry_run,
            applied: !dry_run,
            is_sample: dataset.is_sample,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WarningsResponse {
    pub warnings: Vec<String>,
}

/// GET /api/warnings
pub async fn get_warnings(State(state): State<AppState>) -> Json<WarningsResponse> {
    let dataset = state.snapshot().await;
    Json(WarningsResponse {
        warnings: dataset.parsed.warnings.clone(),
    })
}

/// GET /api/csv
///
/// The raw CSV text currently in service.
pub async fn get_csv(State(state): State<AppState>) -> impl IntoResponse {
    let dataset = state.snapshot().await;
    (
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        dataset.csv_text.clone(),
    )
}

/// POST /api/import[?dry_run=true]
///
/// Body is the raw CSV text.
pub async fn import_csv(
    State(state): State<AppState>,
    query: Result<Query<ImportQuery>, QueryRejection>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let query = query_or_bad_request(query)?;
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("Import body is empty".to_string()));
    }

    let dataset = Dataset::from_text(body, false);
    if !dataset.parsed.warnings.is_empty() {
        warn!(
            "Import produced {} warning(s): {}",
            dataset.parsed.warnings.len(),
            dataset.parsed.warnings.join(" | ")
        );
    }

    if query.dry_run {
        return Ok(Json(ImportResponse::describe(&dataset, true)));
    }

    let dataset = state.commit(dataset).await?;
    info!("Imported {} initiatives", dataset.parsed.initiatives.len());

    Ok(Json(ImportResponse::describe(&dataset, false)))
}

/// DELETE /api/import
///
/// Forget the imported dataset and serve the built-in sample.
pub async fn reset_dataset(State(state): State<AppState>) -> Result<Json<ImportResponse>, ApiError> {
    let dataset = state.reset().await?;
    info!("Dataset reset to built-in sample");

    Ok(Json(ImportResponse::describe(&dataset, false)))
}
