//! boardroom-api library - portfolio review service
//!
//! Serves the current board-report dataset and everything derived from it as
//! JSON. The dataset is parsed once per import and shared read-only between
//! requests.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use boardroom_common::sample::SAMPLE_CSV;
use boardroom_common::store::DatasetStore;
use boardroom_common::{parse_initiatives_csv, ParseResult};
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod api;

/// Largest accepted import body
pub const MAX_IMPORT_BYTES: usize = 10 * 1024 * 1024;

/// Raw CSV text plus its parse, replaced together
#[derive(Debug)]
pub struct Dataset {
    pub csv_text: String,
    pub parsed: ParseResult,
    /// True when serving the built-in sample rather than imported data
    pub is_sample: bool,
}

impl Dataset {
    pub fn from_text(csv_text: String, is_sample: bool) -> Self {
        let parsed = parse_initiatives_csv(&csv_text);
        Self {
            csv_text,
            parsed,
            is_sample,
        }
    }

    pub fn sample() -> Self {
        Self::from_text(SAMPLE_CSV.to_string(), true)
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DatasetStore>,
    dataset: Arc<RwLock<Arc<Dataset>>>,
    /// Held from persist through swap; saved and served data stay in step
    writer: Arc<Mutex<()>>,
}

impl AppState {
    /// Build state from whatever the store holds, or the sample dataset
    pub fn load(store: Arc<dyn DatasetStore>) -> boardroom_common::Result<Self> {
        let dataset = match store.load()? {
            Some(text) => Dataset::from_text(text, false),
            None => {
                info!("No saved dataset, serving built-in sample");
                Dataset::sample()
            }
        };
        info!(
            "Dataset ready: {} initiatives, {} warnings",
            dataset.parsed.initiatives.len(),
            dataset.parsed.warnings.len()
        );
        Ok(Self {
            store,
            dataset: Arc::new(RwLock::new(Arc::new(dataset))),
            writer: Arc::new(Mutex::new(())),
        })
    }

    /// Current dataset; stays valid even if replaced meanwhile
    pub async fn snapshot(&self) -> Arc<Dataset> {
        self.dataset.read().await.clone()
    }

    /// Persist an imported dataset, then swap it in wholesale
    ///
    /// Writers are serialized: a second import waits until the first is both
    /// saved and in service. Store I/O runs on the blocking pool.
    pub async fn commit(&self, dataset: Dataset) -> boardroom_common::Result<Arc<Dataset>> {
        let _writer = self.writer.lock().await;
        let store = self.store.clone();
        let dataset = tokio::task::spawn_blocking(move || {
            store.save(&dataset.csv_text).map(|()| dataset)
        })
        .await
        .map_err(join_error)??;
        Ok(self.replace(dataset).await)
    }

    /// Forget the saved dataset and serve the built-in sample
    pub async fn reset(&self) -> boardroom_common::Result<Arc<Dataset>> {
        let _writer = self.writer.lock().await;
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.clear())
            .await
            .map_err(join_error)??;
        Ok(self.replace(Dataset::sample()).await)
    }

    async fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        *self.dataset.write().await = dataset.clone();
        dataset
    }
}

fn join_error(e: tokio::task::JoinError) -> boardroom_common::Error {
    boardroom_common::Error::Io(std::io::Error::other(format!("Task join error: {}", e)))
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/initiatives", get(api::list_initiatives))
        .route("/api/initiatives/:id", get(api::get_initiative))
        .route("/api/summary", get(api::get_summary))
        .route("/api/themes", get(api::get_themes))
        .route("/api/risks", get(api::get_risks))
        .route("/api/filters/options", get(api::get_filter_options))
        .route("/api/warnings", get(api::get_warnings))
        .route("/api/csv", get(api::get_csv))
        .route(
            "/api/import",
            post(api::import_csv).delete(api::reset_dataset),
        )
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_IMPORT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
