//! HTTP API exposing extraction and screenshots.

mod routes;

pub use routes::{screenshot_handler, social_info_handler, ApiError, UrlQuery};

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::AppContext;

/// Build the router with all routes attached.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/api/social-info", get(social_info_handler))
        .route("/api/screenshot", get(screenshot_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(ctx: AppContext, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(ctx)).await
}
