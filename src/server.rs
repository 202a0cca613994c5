use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};

use crate::{api, api::CallbackState, context::AppContext, info};

/// Router of the display server.
pub fn display_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(api::now_playing))
        .route("/health", get(api::health))
        .with_state(ctx)
}

/// Serves the now playing page on `addr` until the process stops.
pub async fn start_display_server(ctx: Arc<AppContext>, addr: SocketAddr) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;

    info!("Now playing page available at http://{}/", addr);
    axum::serve(listener, display_router(ctx))
        .await
        .map_err(|e| e.to_string())
}

/// Serves the OAuth callback on the configured callback address.
pub async fn start_callback_server(state: CallbackState) -> Result<(), String> {
    let addr = state.oauth.callback_address;
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    axum::serve(listener, app).await.map_err(|e| e.to_string())
}
