use axum::Json;
use serde_json::{json, Value};

use crate::llm_client::MODEL;

const SERVICE_NAME: &str = "resume-screener";

/// GET /health
/// Liveness check for the screener. Never calls the model, so it reports
/// which model is configured rather than whether the provider is reachable.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "model": MODEL,
    }))
}
