//! Query-string parameters shared by the read endpoints

use axum::extract::{rejection::QueryRejection, Query};
use boardroom_common::filter::InitiativeFilter;
use boardroom_common::time::reference_instant;
use boardroom_common::{Quarter, Status};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::ApiError;

/// Unwrap a query extractor, turning axum's rejection into a JSON 400
pub fn query_or_bad_request<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// `?as_of=YYYY-MM-DD`
#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    pub as_of: Option<String>,
}

impl AsOfQuery {
    pub fn instant(&self) -> Result<NaiveDateTime, ApiError> {
        Ok(reference_instant(parse_as_of(self.as_of.as_deref())?))
    }
}

/// Filter criteria plus `as_of`; "All" or blank means unconstrained
#[derive(Debug, Default, Deserialize)]
pub struct InitiativeQuery {
    pub opportunity: Option<String>,
    pub lead: Option<String>,
    pub status: Option<String>,
    pub quarter: Option<String>,
    pub search: Option<String>,
    pub as_of: Option<String>,
}

impl InitiativeQuery {
    pub fn filter(&self) -> Result<InitiativeFilter, ApiError> {
        let status = criterion(&self.status)
            .map(|s| s.parse::<Status>())
            .transpose()?;
        let quarter = criterion(&self.quarter)
            .map(|q| q.parse::<Quarter>())
            .transpose()?;

        Ok(InitiativeFilter {
            opportunity: criterion(&self.opportunity),
            lead: criterion(&self.lead),
            status,
            quarter,
            search: self
                .search
                .as_ref()
                .filter(|s| !s.trim().is_empty())
                .cloned(),
        })
    }

    pub fn instant(&self) -> Result<NaiveDateTime, ApiError> {
        Ok(reference_instant(parse_as_of(self.as_of.as_deref())?))
    }
}

fn criterion(raw: &Option<String>) -> Option<String> {
    raw.as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Blank means "now"; anything else must be an ISO date
pub fn parse_as_of(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid as_of date (expected YYYY-MM-DD): {}", s))),
    }
}
