//! # Boardroom Common Library
//!
//! Board-report ingestion and portfolio metrics:
//! - CSV import into typed initiatives (never fails, warns instead)
//! - Status normalization and severity rollups
//! - Lenient date parsing and quarter arithmetic
//! - Derived per-initiative metrics and portfolio summaries
//! - Filtering, dataset persistence and configuration

pub mod config;
pub mod csv_import;
pub mod dates;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod model;
pub mod sample;
pub mod status;
pub mod store;
pub mod summary;
pub mod time;

pub use csv_import::parse_initiatives_csv;
pub use error::{Error, Result};
pub use model::{Initiative, ParseResult, Quarter, QuarterMilestone, QuarterPlan};
pub use status::Status;
