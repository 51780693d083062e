//! Health check and index handlers

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
    pub database: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

/// Sub-groups advertised by the API index
pub const KNOWN_SUB_GROUPS: [&str; 3] = ["Lobster", "Prawn", "Shrimp"];

/// Liveness probe: 200 while the process is up. A failing database ping is
/// reported in the body without changing the status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    let uptime = state.started_at.elapsed().as_secs();

    // Ping the database
    let db_start = Instant::now();
    let database = match state
        .db
        .execute(Statement::from_string(
            state.db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await
    {
        Ok(_) => ComponentHealth {
            status: "ok".to_string(),
            latency_ms: Some(db_start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            ComponentHealth {
                status: "error".to_string(),
                latency_ms: None,
            }
        }
    };

    Json(HealthResponse {
        success: true,
        message: "Crustaceans API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        timestamp: Utc::now(),
        database,
    })
}

/// API index at `GET /`
pub async fn index() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Welcome to the Crustaceans API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /health": "Health check",
            "GET /api/crustaceans": "List crustaceans (filters: group, subGroup; pagination: limit, page)",
            "GET /api/crustaceans/{id}": "Get crustacean by ID",
            "POST /api/crustaceans": "Create new crustacean",
            "PUT /api/crustaceans/{id}": "Update crustacean",
            "DELETE /api/crustaceans/{id}": "Delete crustacean",
            "GET /metrics": "Prometheus metrics",
            "GET /docs": "Swagger UI",
        },
        "availableSubGroups": KNOWN_SUB_GROUPS,
    }))
}
