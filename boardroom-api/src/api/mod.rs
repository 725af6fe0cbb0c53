//! HTTP API handlers for boardroom-api

pub mod dataset;
pub mod error;
pub mod filters;
pub mod health;
pub mod initiatives;
pub mod params;
pub mod portfolio;

pub use dataset::{get_csv, get_warnings, import_csv, reset_dataset};
pub use error::ApiError;
pub use filters::get_filter_options;
pub use health::health_routes;
pub use initiatives::{get_initiative, list_initiatives};
pub use portfolio::{get_risks, get_summary, get_themes};
