//! Integration tests for boardroom-api endpoints
//!
//! Every test builds the router over an in-memory store and drives it with
//! `oneshot`; no socket is opened.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use boardroom_api::{build_router, AppState, MAX_IMPORT_BYTES};
use boardroom_common::sample::SAMPLE_CSV;
use boardroom_common::store::{DatasetStore, FileStore, MemoryStore};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

const SMALL_CSV: &str = "ID,Strategic Initiative,Opportunity,Lead,Annual Status,Q1 Milestone,Q1 Due,Q1 Status\n\
SI-10,Warehouse Robotics,Operations,T. Okafor,Complete,Pilot,2026-02-01,Complete\n\
SI-11,Pricing Engine,Growth,L. Moreau,On Track,Model,2026-03-15,On Track\n";

/// Test helper: app over a memory store holding `initial` (None = empty)
fn setup_app(initial: Option<&str>) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(match initial {
        Some(text) => MemoryStore::with_text(text),
        None => MemoryStore::new(),
    });
    let state = AppState::load(store.clone()).unwrap();
    (build_router(state), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_csv(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/csv")
        .body(body.into())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = setup_app(None);
    let (status, body) = call(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "boardroom-api");
    assert!(body["version"].is_string());
    assert_eq!(body["initiatives"], 4);
    assert_eq!(body["isSample"], true);

    let (app, _) = setup_app(Some(SMALL_CSV));
    let (_, body) = call(&app, get("/health")).await;
    assert_eq!(body["initiatives"], 2);
    assert_eq!(body["isSample"], false);
}

// =============================================================================
// Read endpoints over the sample dataset
// =============================================================================

#[tokio::test]
async fn test_empty_store_serves_sample() {
    let (app, _) = setup_app(None);
    let (status, body) = call(&app, get("/api/initiatives?as_of=2026-10-19")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(body["count"], 4);
    assert_eq!(body["asOf"], "2026-10-19");

    let first = &body["initiatives"][0];
    assert_eq!(first["id"], "SI-001");
    assert_eq!(first["annualStatus"], "On Track");
    assert_eq!(first["annualTone"], "green");
    assert_eq!(first["progressPct"], 25.0);
    assert_eq!(first["daysUntilNextMilestone"], 42);
    // Earliest open milestone, even though it is overdue
    assert_eq!(first["nextDue"], "2026-04-15");
    assert_eq!(first["nextDueLabel"], "Apr 15, 2026");
    assert_eq!(first["overdueQuarters"], serde_json::json!(["Q2", "Q3"]));
    assert_eq!(first["quarters"]["Q1"]["due"], "2026-01-31");
}

#[tokio::test]
async fn test_filtering_by_query() {
    let (app, _) = setup_app(None);

    let (_, body) = call(&app, get("/api/initiatives?status=blocked")).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["initiatives"][0]["id"], "SI-003");

    let (_, body) = call(&app, get("/api/initiatives?opportunity=All&search=esg")).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["initiatives"][0]["id"], "SI-004");
    assert_eq!(body["total"], 4);

    let (_, body) = call(&app, get("/api/initiatives?lead=J.%20Kim&quarter=Q2")).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["initiatives"][0]["id"], "SI-002");
}

#[tokio::test]
async fn test_invalid_query_values_are_bad_requests() {
    let (app, _) = setup_app(None);

    for uri in [
        "/api/initiatives?status=green",
        "/api/initiatives?quarter=Q7",
        "/api/initiatives?as_of=yesterday",
        "/api/summary?as_of=2026-13-01",
    ] {
        let (status, body) = call(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_get_initiative_by_id() {
    let (app, _) = setup_app(None);

    let (status, body) = call(&app, get("/api/initiatives/SI-002?as_of=2026-10-19")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Cost-to-Serve Optimization");
    assert_eq!(body["riskQuarters"], serde_json::json!(["Q2"]));

    let (status, body) = call(&app, get("/api/initiatives/SI-999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Initiative not found: SI-999");
}

#[tokio::test]
async fn test_summary() {
    let (app, _) = setup_app(None);
    let (status, body) = call(&app, get("/api/summary?as_of=2026-10-19")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthLabel"], "Critical");
    assert_eq!(body["healthScore"], 25);
    assert_eq!(body["isSample"], true);
    assert_eq!(body["metrics"]["commencedCount"], 4);
    assert_eq!(body["metrics"]["atRiskCount"], 2);
    assert_eq!(body["currentQuarter"]["quarter"], "Q4");
    assert_eq!(body["currentQuarter"]["daysRemaining"], 73);

    let breakdown = body["statusBreakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 6);
    assert_eq!(breakdown[0]["status"], "On Track");
    assert_eq!(breakdown[0]["count"], 1);
}

#[tokio::test]
async fn test_themes_and_risks() {
    let (app, _) = setup_app(None);

    let (_, themes) = call(&app, get("/api/themes")).await;
    assert_eq!(themes.as_array().unwrap().len(), 4);
    assert_eq!(themes[0]["opportunity"], "Data & Analytics");
    assert_eq!(themes[0]["rollupStatus"], "Blocked");

    let (_, risks) = call(&app, get("/api/risks")).await;
    let ids: Vec<&str> = risks
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["SI-002", "SI-003"]);
    assert_eq!(risks[1]["notes"], "Platform choice unresolved; escalated to steering group • Scope creep risk");
}

#[tokio::test]
async fn test_filter_options() {
    let (app, _) = setup_app(None);
    let (_, body) = call(&app, get("/api/filters/options")).await;

    assert_eq!(body["leads"][0], "A. Patel");
    assert_eq!(
        body["statuses"],
        serde_json::json!(["At Risk", "Blocked", "In Progress", "On Track"])
    );
    assert_eq!(body["quarters"], serde_json::json!(["Q1", "Q2", "Q3", "Q4"]));
}

#[tokio::test]
async fn test_raw_csv_download() {
    let (app, _) = setup_app(None);
    let response = app.oneshot(get("/api/csv")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes, SAMPLE_CSV.as_bytes());
}

// =============================================================================
// Import and reset
// =============================================================================

#[tokio::test]
async fn test_import_replaces_dataset_and_persists() {
    let (app, store) = setup_app(None);

    let (status, body) = call(&app, post_csv("/api/import", SMALL_CSV)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["initiativeCount"], 2);
    assert_eq!(body["applied"], true);
    assert_eq!(body["warnings"], serde_json::json!([]));

    assert_eq!(store.load().unwrap().as_deref(), Some(SMALL_CSV));

    let (_, list) = call(&app, get("/api/initiatives")).await;
    assert_eq!(list["total"], 2);
    assert_eq!(list["initiatives"][0]["id"], "SI-10");

    let (_, summary) = call(&app, get("/api/summary")).await;
    assert_eq!(summary["isSample"], false);
}

#[tokio::test]
async fn test_dry_run_changes_nothing() {
    let (app, store) = setup_app(None);

    let (status, body) = call(&app, post_csv("/api/import?dry_run=true", "ID,Lead\nX-1,Someone\n")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dryRun"], true);
    assert_eq!(body["applied"], false);
    assert_eq!(body["initiativeCount"], 1);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);

    assert_eq!(store.load().unwrap(), None);
    let (_, list) = call(&app, get("/api/initiatives")).await;
    assert_eq!(list["total"], 4);
}

#[tokio::test]
async fn test_import_warnings_are_served() {
    let (app, _) = setup_app(None);
    call(&app, post_csv("/api/import", "ID,Strategic Initiative\nSI-1,Only\n")).await;

    let (_, body) = call(&app, get("/api/warnings")).await;
    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].as_str().unwrap().starts_with("Missing expected header(s): Opportunity, Lead, Annual Status."));
}

#[tokio::test]
async fn test_empty_import_rejected() {
    let (app, _) = setup_app(None);
    let (status, body) = call(&app, post_csv("/api/import", "  \n ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Import body is empty");
}

#[tokio::test]
async fn test_oversized_import_rejected() {
    let (app, _) = setup_app(None);
    let body = "x".repeat(MAX_IMPORT_BYTES + 1);
    let response = app.oneshot(post_csv("/api/import", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_reset_reverts_to_sample() {
    let (app, store) = setup_app(Some(SMALL_CSV));

    let (_, list) = call(&app, get("/api/initiatives")).await;
    assert_eq!(list["total"], 2);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/import")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["initiativeCount"], 4);
    assert_eq!(body["isSample"], true);

    assert_eq!(store.load().unwrap(), None);
    let (_, list) = call(&app, get("/api/initiatives")).await;
    assert_eq!(list["total"], 4);
}

#[tokio::test]
async fn test_file_store_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let store = Arc::new(FileStore::in_root_folder(temp_dir.path()));
    let app = build_router(AppState::load(store).unwrap());
    let (status, _) = call(&app, post_csv("/api/import", SMALL_CSV)).await;
    assert_eq!(status, StatusCode::OK);

    // Fresh state over the same folder
    let store = Arc::new(FileStore::in_root_folder(temp_dir.path()));
    let app = build_router(AppState::load(store).unwrap());
    let (_, list) = call(&app, get("/api/initiatives")).await;
    assert_eq!(list["total"], 2);
    assert_eq!(list["initiatives"][1]["lead"], "L. Moreau");
}

/// Memory store whose save stalls for text containing "SLOW"
#[derive(Default)]
struct StallingStore {
    inner: MemoryStore,
}

impl DatasetStore for StallingStore {
    fn load(&self) -> boardroom_common::Result<Option<String>> {
        self.inner.load()
    }

    fn save(&self, csv_text: &str) -> boardroom_common::Result<()> {
        self.inner.save(csv_text)?;
        if csv_text.contains("SLOW") {
            std::thread::sleep(Duration::from_millis(300));
        }
        Ok(())
    }

    fn clear(&self) -> boardroom_common::Result<()> {
        self.inner.clear()
    }
}

#[tokio::test]
async fn test_overlapping_imports_keep_saved_and_served_in_step() {
    let store = Arc::new(StallingStore::default());
    let state = AppState::load(store.clone()).unwrap();
    let app = build_router(state.clone());

    let slow = tokio::spawn(
        app.clone()
            .oneshot(post_csv("/api/import", "ID,Strategic Initiative\nSLOW-A,First\n")),
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = app
        .clone()
        .oneshot(post_csv("/api/import", "ID,Strategic Initiative\nFAST-B,Second\n"))
        .await
        .unwrap();
    let slow = slow.await.unwrap().unwrap();

    assert_eq!(slow.status(), StatusCode::OK);
    assert_eq!(fast.status(), StatusCode::OK);

    let served = state.snapshot().await.csv_text.clone();
    let saved = store.load().unwrap().unwrap();
    assert_eq!(served, saved);
    // The later import finished last
    assert!(served.contains("FAST-B"));
}

#[tokio::test]
async fn test_reset_waits_for_pending_import() {
    let store = Arc::new(StallingStore::default());
    let state = AppState::load(store.clone()).unwrap();
    let app = build_router(state.clone());

    let slow = tokio::spawn(
        app.clone()
            .oneshot(post_csv("/api/import", "ID,Strategic Initiative\nSLOW-A,First\n")),
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/import")
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slow.await.unwrap().unwrap().status(), StatusCode::OK);

    assert!(state.snapshot().await.is_sample);
    assert_eq!(store.load().unwrap(), None);
}
