//! HTTP service exposing the engines, one route per engine.
//!
//! The service is stateless beyond the loaded configuration: every request
//! body carries a complete input (spec structures in, derived structures
//! out), so calls can run concurrently without locking.

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use wlc_core::{AnalysisSnapshot, Config, DistributionResult, StakeholderTotal};
use wlc_engine::{ComparisonReport, EngineError};

use crate::cli::{GlobalArgs, ServeArgs};
use crate::commands::common::{load_config, AnalysisInput};

/// Shared state for all handlers
struct AppState {
    config: Config,
}

/// JSON error body returned for failed requests
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Engine errors as HTTP responses: invalid input is the client's fault.
struct ApiError(EngineError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        Self(e)
    }
}

/// Request body for the compare endpoint
#[derive(Debug, Deserialize)]
struct CompareRequest {
    current: AnalysisSnapshot,
    previous: AnalysisSnapshot,
    /// Override the configured tolerance
    #[serde(default)]
    tolerance: Option<f64>,
}

/// Response for the attribute endpoint
#[derive(Debug, Serialize)]
struct AttributeResponse {
    stakeholders: BTreeMap<String, StakeholderTotal>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let state = Arc::new(AppState { config });

    let app = Router::new()
        .route("/health", get(health))
        .route("/distribute", post(distribute_handler))
        .route("/attribute", post(attribute_handler))
        .route("/analyze", post(analyze_handler))
        .route("/compare", post(compare_handler))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host:port")?;

    println!("Serving WLC engines at http://{}:{}", args.host, args.port);
    println!("Press Ctrl+C to stop.\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}:{}", args.host, args.port))?;
    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn distribute_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AnalysisInput>,
) -> Result<Json<DistributionResult>, ApiError> {
    let components = input.component_map();
    let result =
        wlc_engine::distribute(&input.facts, &components, &input.project, &state.config)?;
    Ok(Json(result))
}

async fn attribute_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AnalysisInput>,
) -> Result<Json<AttributeResponse>, ApiError> {
    let components = input.component_map();
    let distribution =
        wlc_engine::distribute(&input.facts, &components, &input.project, &state.config)?;
    let stakeholders =
        wlc_engine::attribute(&input.rules, &components, &distribution.components)?;
    Ok(Json(AttributeResponse { stakeholders }))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AnalysisInput>,
) -> Result<Json<AnalysisSnapshot>, ApiError> {
    let components = input.component_map();
    let distribution =
        wlc_engine::distribute(&input.facts, &components, &input.project, &state.config)?;
    let stakeholders =
        wlc_engine::attribute(&input.rules, &components, &distribution.components)?;
    let snapshot = AnalysisSnapshot::build(&input.project, &distribution, stakeholders);
    Ok(Json(snapshot))
}

async fn compare_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompareRequest>,
) -> Json<ComparisonReport> {
    let tolerance = request
        .tolerance
        .unwrap_or(state.config.comparison_tolerance);
    let report = wlc_engine::compare(&request.current, &request.previous, tolerance);
    Json(report)
}
