//! HTTP API endpoints for the host console.
//!
//! Winner history downloads, session export/import and the catalogue of
//! presentations. Everything here sits behind host authentication.

use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{host_auth_middleware, AuthConfig};
use crate::state::export::SessionExport;
use crate::state::history::{csv_filename, history_csv, history_text};
use crate::state::AppState;
use crate::types::*;

/// Routes under `/api`, wrapped in host auth
pub fn router(auth_config: Arc<AuthConfig>) -> Router<AppState> {
    Router::new()
        .route("/api/history.csv", get(history_csv_download))
        .route("/api/history.txt", get(history_clipboard_text))
        .route("/api/state/export", get(export_state))
        .route("/api/state/import", post(import_state))
        .route("/api/presentations", get(list_presentations))
        .layer(middleware::from_fn_with_state(
            auth_config,
            host_auth_middleware,
        ))
}

/// Download the winner history as CSV.
///
/// GET /api/history.csv
///
/// Times are rendered in the server's local time zone.
pub async fn history_csv_download(State(state): State<AppState>) -> Response {
    let history = state.get_history().await;
    let body = history_csv(&history, &Local);
    let filename = csv_filename(Local::now().date_naive());
    tracing::info!("Exporting {} winners as {}", history.len(), filename);

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// Winner history as plain text, for copying to the clipboard.
///
/// GET /api/history.txt
pub async fn history_clipboard_text(State(state): State<AppState>) -> Response {
    let history = state.get_history().await;
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        history_text(&history, &Local),
    )
        .into_response()
}

/// GET /api/state/export
pub async fn export_state(State(state): State<AppState>) -> Json<SessionExport> {
    Json(state.export_state().await)
}

/// Import a session snapshot.
///
/// POST /api/state/import
///
/// Replaces the roster, pool and history, cancels any draw on screen and
/// broadcasts the new session to all clients.
pub async fn import_state(
    State(state): State<AppState>,
    Json(export): Json<SessionExport>,
) -> Response {
    match state.import_state(export).await {
        Ok(()) => (StatusCode::OK, "State imported successfully").into_response(),
        Err(e) => {
            tracing::error!("State import failed: {}", e);
            (StatusCode::BAD_REQUEST, format!("Import failed: {}", e)).into_response()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnimationInfo {
    pub id: AnimationType,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresentationCatalogue {
    pub animations: Vec<AnimationInfo>,
    pub themes: Vec<ThemeConfig>,
    pub current_animation: AnimationType,
    pub current_theme: VisualTheme,
    pub settings: DrawSettings,
}

/// GET /api/presentations
pub async fn list_presentations(State(state): State<AppState>) -> Json<PresentationCatalogue> {
    let current = state.get_presentation().await;
    Json(PresentationCatalogue {
        animations: AnimationType::ALL
            .iter()
            .map(|a| AnimationInfo {
                id: *a,
                name: a.display_name(),
                description: a.description(),
            })
            .collect(),
        themes: VisualTheme::ALL.iter().map(|t| t.config()).collect(),
        current_animation: current.animation_type,
        current_theme: current.theme,
        settings: current.draw,
    })
}
