//! HTTP query proxy in front of the external SPARQL engine.
//!
//! One synchronous forward per request with a bounded timeout; no retries,
//! no request queueing. Every failure is recovered into a structured JSON
//! payload -- a handler never takes the process down.

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{DEFAULT_BIND_ADDR, DEFAULT_SPARQL_ENDPOINT, QUERY_TIMEOUT_SECS};
use crate::shape::{shape, SparqlJson};

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub bind: String,
    pub endpoint: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR.to_string(),
            endpoint: DEFAULT_SPARQL_ENDPOINT.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    client: reqwest::Client,
    endpoint: String,
}

impl AppState {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(QUERY_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, endpoint })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/query", post(execute_query))
        .route("/api/health", get(health))
        .route("/api/examples", get(examples))
        .with_state(state)
}

pub async fn serve(config: ServeConfig) -> Result<()> {
    let state = AppState::new(config.endpoint)?;
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind: {}", config.bind))?;
    info!(bind = %config.bind, endpoint = %state.endpoint, "Query proxy listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    #[serde(default)]
    query: String,
}

async fn execute_query(State(state): State<AppState>, Json(request): Json<QueryRequest>) -> Response {
    let query = request.query.trim();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No query provided"})),
        )
            .into_response();
    }

    let sent = state
        .client
        .post(&state.endpoint)
        .form(&[("query", query)])
        .header(header::ACCEPT, "application/sparql-results+json")
        .send()
        .await;

    match sent {
        Ok(response) if response.status().is_success() => {
            match response.json::<serde_json::Value>().await {
                Ok(raw) => {
                    // A 200 body that is not SPARQL-results JSON still
                    // succeeds, with an empty shaped table.
                    let parsed: SparqlJson =
                        serde_json::from_value(raw.clone()).unwrap_or_default();
                    Json(json!({
                        "success": true,
                        "data": raw,
                        "results": shape(&parsed),
                    }))
                    .into_response()
                }
                Err(e) => internal_error(&e.to_string()),
            }
        }
        Ok(response) => {
            // Engine rejected the query: pass its status and body through.
            let status = response.status();
            let details = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Query engine returned an error");
            let code =
                StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                code,
                Json(json!({
                    "success": false,
                    "error": format!("Query engine error: {}", status.as_u16()),
                    "details": details,
                })),
            )
                .into_response()
        }
        Err(e) if e.is_connect() => {
            warn!(endpoint = %state.endpoint, "Query engine unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": format!(
                        "Cannot connect to the query engine at {}. Make sure it is running.",
                        state.endpoint
                    ),
                })),
            )
                .into_response()
        }
        Err(e) => internal_error(&e.to_string()),
    }
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "error": message})),
    )
        .into_response()
}

/// Lightweight reachability probe against the engine's base path. Any
/// answer below 5xx means the engine is there; a transport failure means it
/// is not.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let base = engine_base(&state.endpoint);
    let status = match state.client.get(base).send().await {
        Ok(response) if response.status().is_server_error() => "error",
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };
    Json(json!({"status": status, "endpoint": state.endpoint}))
}

/// Strip the trailing query segment from the endpoint URL, keeping the
/// scheme intact.
fn engine_base(endpoint: &str) -> String {
    if let Some((base, _)) = endpoint.rsplit_once('/') {
        if !base.is_empty() && !base.ends_with(':') && !base.ends_with('/') {
            return base.to_string();
        }
    }
    endpoint.to_string()
}

/// Fixed catalog of example queries; static, independent of the data.
async fn examples() -> Json<serde_json::Value> {
    Json(json!([
        {
            "name": "Student Enrollments",
            "description": "Get all student enrollments with course details",
            "query": "PREFIX uni: <http://example.org/university#>\nSELECT ?student ?courseTitle ?semester ?year\nWHERE {\n  ?student uni:hasEnrollment ?enrollment .\n  ?enrollment uni:enrolledInCourse ?course ;\n              uni:semester ?semester ;\n              uni:year ?year .\n  ?course uni:courseTitle ?courseTitle .\n}"
        },
        {
            "name": "Students with Contact Info",
            "description": "Retrieve student information from SQLite and CSV",
            "query": "PREFIX uni: <http://example.org/university#>\nSELECT ?student ?firstName ?lastName ?email ?phone ?major\nWHERE {\n  ?student uni:firstName ?firstName ;\n           uni:lastName ?lastName ;\n           uni:email ?email ;\n           uni:phone ?phone ;\n           uni:major ?major .\n}"
        },
        {
            "name": "Courses by Department",
            "description": "Get courses organized by department from XML",
            "query": "PREFIX uni: <http://example.org/university#>\nSELECT ?courseCode ?courseTitle ?deptName ?credits\nWHERE {\n  ?course uni:courseCode ?courseCode ;\n          uni:courseTitle ?courseTitle ;\n          uni:credits ?credits ;\n          uni:offeredByDepartment ?dept .\n  ?dept uni:departmentName ?deptName .\n}\nORDER BY ?deptName ?courseCode"
        },
        {
            "name": "Cross-Source Integration",
            "description": "Unified query across all three sources",
            "query": "PREFIX uni: <http://example.org/university#>\nSELECT ?studentName ?email ?courseTitle ?deptName ?semester ?year\nWHERE {\n  ?student uni:firstName ?first ;\n           uni:lastName ?last ;\n           uni:email ?email .\n  BIND(CONCAT(?first, \" \", ?last) AS ?studentName)\n  ?student uni:hasEnrollment ?enrollment .\n  ?enrollment uni:enrolledInCourse ?course ;\n              uni:semester ?semester ;\n              uni:year ?year .\n  ?course uni:courseTitle ?courseTitle ;\n          uni:offeredByDepartment ?dept .\n  ?dept uni:departmentName ?deptName .\n}\nORDER BY ?studentName ?semester"
        }
    ]))
}
