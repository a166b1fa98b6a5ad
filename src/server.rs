use axum::{
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::salaries;
use crate::database::SqlRepository;
use crate::services::{RecordService, SalaryService};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub salaries: Arc<SalaryService>,
    pub records: Arc<RecordService>,
}

impl AppState {
    pub fn new(salaries: SalaryService, records: RecordService) -> Self {
        Self {
            salaries: Arc::new(salaries),
            records: Arc::new(records),
        }
    }

    /// Statistics and record services over one repository
    pub fn from_repository(repository: SqlRepository) -> Self {
        Self::new(
            SalaryService::from_repository(repository.clone()),
            RecordService::from_repository(repository),
        )
    }
}

pub fn app(state: AppState, api: &ApiConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(salary_routes(api.enable_diagnostics))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    if api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn salary_routes(enable_diagnostics: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/api/salaries", get(salaries::list_get).post(salaries::create_post))
        .route("/api/salaries/", get(salaries::list_get).post(salaries::create_post))
        .route("/api/salaries/average-salary", post(salaries::average_post))
        .route("/api/salaries/filters", get(salaries::filters_get))
        .route(
            "/api/salaries/:id",
            get(salaries::record_get)
                .put(salaries::update_put)
                .delete(salaries::record_delete),
        );

    if enable_diagnostics {
        router.route("/api/salaries/lookup/:dimension", get(salaries::lookup_get))
    } else {
        router
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Salary Survey API",
            "version": version,
            "description": "Filtered salary averages over normalized survey dimensions",
            "endpoints": {
                "health": "GET /health",
                "records": "GET|POST /api/salaries, GET|PUT|DELETE /api/salaries/:id",
                "average": "POST /api/salaries/average-salary",
                "filters": "GET /api/salaries/filters",
                "lookup": "GET /api/salaries/lookup/:dimension?q= (diagnostics only)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.salaries.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
