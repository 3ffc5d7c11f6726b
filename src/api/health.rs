use axum::response::Json;
use serde_json::{Value, json};

/// Liveness probe of the local callback server.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tunesync-auth",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
