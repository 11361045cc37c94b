//! Host-only command handlers
//!
//! Authorization is checked in the main dispatch layer before calling these.
//! State changes reach every screen through the broadcast channel, so most
//! handlers have nothing to reply.

use crate::protocol::ServerMessage;
use crate::state::{AppState, DrawRejected, DrawStart};
use crate::types::*;

pub async fn handle_load_roster(state: &AppState, text: String) -> Option<ServerMessage> {
    tracing::info!("Host loading roster ({} bytes)", text.len());
    state.load_roster(&text).await;
    None
}

fn log_rejected(result: Result<DrawStart, DrawRejected>) -> Option<ServerMessage> {
    if let Err(e) = result {
        // Not a user error: the start button is disabled in these states
        tracing::debug!("Draw request ignored: {}", e);
    }
    None
}

pub async fn handle_start_draw(state: &AppState) -> Option<ServerMessage> {
    tracing::info!("Host starting draw");
    log_rejected(state.start_draw().await)
}

pub async fn handle_draw_again(state: &AppState) -> Option<ServerMessage> {
    tracing::info!("Host drawing again");
    log_rejected(state.draw_again().await)
}

pub async fn handle_reset_to_setup(state: &AppState) -> Option<ServerMessage> {
    tracing::info!("Host returning to setup");
    state.reset_to_setup().await;
    None
}

pub async fn handle_clear_history(state: &AppState) -> Option<ServerMessage> {
    tracing::info!("Host clearing winner history");
    state.clear_history().await;
    None
}

pub async fn handle_set_animation_type(
    state: &AppState,
    animation_type: AnimationType,
) -> Option<ServerMessage> {
    tracing::info!("Host selected animation {:?}", animation_type);
    state.set_animation_type(animation_type).await;
    state.broadcast_presentation().await;
    None
}

pub async fn handle_update_settings(
    state: &AppState,
    settings: DrawSettings,
) -> Option<ServerMessage> {
    let applied = state.update_draw_settings(settings).await;
    tracing::info!(
        "Host updated draw settings: {}s, {}",
        applied.draw.spin_duration_secs,
        applied.draw.speed_label()
    );
    state.broadcast_presentation().await;
    None
}

pub async fn handle_reset_settings(state: &AppState) -> Option<ServerMessage> {
    tracing::info!("Host reset draw settings");
    state.reset_draw_settings().await;
    state.broadcast_presentation().await;
    None
}

pub async fn handle_set_theme(state: &AppState, theme: VisualTheme) -> Option<ServerMessage> {
    tracing::info!("Host selected theme {:?}", theme);
    state.set_theme(theme).await;
    state.broadcast_presentation().await;
    None
}
