use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Liveness probe for the to-do server
///
/// Runs a trivial query against the SQLite pool; the service reports
/// `unhealthy` when the store cannot answer.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            "disconnected"
        }
    };

    Json(json!({
        "status": if db_status == "connected" { "healthy" } else { "unhealthy" },
        "database": db_status,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
