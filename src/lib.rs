// Public API for integration tests and the server binary

pub mod api;
pub mod auth;
pub mod config;
pub mod presentation;
pub mod protocol;
pub mod reveal;
pub mod roster;
pub mod selection;
pub mod state;
pub mod types;
pub mod ws;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub use auth::AuthConfig;
use state::AppState;

/// Full application router: host console, beamer page, WebSocket, API and
/// static assets.
pub fn app(state: AppState, auth_config: Arc<AuthConfig>) -> Router {
    // Protected host routes (with HTTP Basic Auth)
    let host_routes = Router::new()
        .route("/host", get(auth::serve_host))
        .route("/host.html", get(auth::redirect_host_html))
        .layer(middleware::from_fn_with_state(
            auth_config.clone(),
            auth::host_auth_middleware,
        ));

    let ws_routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .layer(middleware::from_fn_with_state(
            auth_config.clone(),
            auth::host_ws_auth_middleware,
        ));

    Router::new()
        .merge(ws_routes)
        .merge(host_routes)
        .merge(api::router(auth_config))
        .route("/beamer", get(auth::serve_beamer))
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
