use axum::response::Json;
use serde_json::{Value, json};

/// `GET /health`: liveness probe for the display and callback servers.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
