use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr};

use crate::{api, youtube::auth::SharedAuthState};

/// Serves `/health` and the OAuth `/callback` on the configured address until the process ends.
pub async fn start_api_server(state: SharedAuthState) -> Result<(), String> {
    let addr = SocketAddr::from_str(&state.settings.server_addr)
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    axum::serve(listener, app).await.map_err(|e| e.to_string())
}
