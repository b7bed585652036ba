//! Axum API server for the dashboard.
//!
//! The browser page owns the controls and the actual chart drawing; this
//! module exposes the option lists and the pipeline output as JSON. One
//! request triggers exactly one synchronous pipeline run over the shared
//! read-only record set.

use std::sync::Arc;

use axum::{
    extract::{Query as AxumQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::data::{DietData, DietGroup};
use crate::pipeline::{run_pipeline, ChartMode, Query};

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DietData>,
}

impl AppState {
    /// Load the dataset and build the shared state. A load failure here is
    /// fatal and aborts startup.
    pub fn new(data_path: &str) -> anyhow::Result<Self> {
        tracing::info!("Loading diet survey dataset: {}", data_path);
        let data = DietData::load(data_path)?;
        tracing::info!("Loaded {} records", data.records.len());

        Ok(Self {
            data: Arc::new(data),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Embedded dashboard page (controls + renderer)
        .route("/", get(index))
        // Health check
        .route("/health", get(health_check))
        // Option lists for the UI controls
        .route("/api/options", get(get_options))
        // Pipeline endpoint: one chart spec per interaction
        .route("/api/chart", get(get_chart))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy"
    }))
}

/// Option lists the UI needs to build its controls. Diet groups and modes
/// are fixed; sexes and age groups come from the loaded data.
async fn get_options(State(state): State<AppState>) -> impl IntoResponse {
    let diet_groups: Vec<&'static str> = DietGroup::ALL.iter().map(|g| g.label()).collect();

    Json(serde_json::json!({
        "diet_groups": diet_groups,
        "sexes": state.data.sexes(),
        "age_groups": state.data.age_groups(),
        "modes": ["radar", "treemap"],
    }))
}

/// Raw query parameters: comma-separated selection lists plus the mode.
#[derive(Debug, Deserialize)]
struct ChartParams {
    diets: Option<String>,
    sexes: Option<String>,
    age_groups: Option<String>,
    mode: String,
}

impl ChartParams {
    /// Build a pipeline query. Unknown diet labels are dropped (they can
    /// only come from a stale client); an unknown mode is a client error.
    fn into_query(self) -> Result<Query, AppError> {
        let mode = match self.mode.as_str() {
            "radar" => ChartMode::Radar,
            "treemap" => ChartMode::Treemap,
            other => {
                return Err(AppError::BadRequest(format!(
                    "unknown chart mode '{other}' (expected 'radar' or 'treemap')"
                )))
            }
        };

        let diets = split_list(&self.diets)
            .filter_map(DietGroup::from_label)
            .collect();
        let sexes = split_list(&self.sexes).map(String::from).collect();
        let age_groups = split_list(&self.age_groups).map(String::from).collect();

        Ok(Query {
            diets,
            sexes,
            age_groups,
            mode,
        })
    }
}

fn split_list(raw: &Option<String>) -> impl Iterator<Item = &str> {
    raw.as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

async fn get_chart(
    State(state): State<AppState>,
    AxumQuery(params): AxumQuery<ChartParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = params.into_query()?;

    tracing::debug!(
        "Running pipeline: {} diets, {} sexes, {} age groups, mode {:?}",
        query.diets.len(),
        query.sexes.len(),
        query.age_groups.len(),
        query.mode
    );

    let spec = run_pipeline(&state.data, &query);
    let value = serde_json::to_value(spec)
        .map_err(|e| AppError::Internal(format!("Chart serialization error: {e}")))?;

    Ok(Json(value))
}

pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
