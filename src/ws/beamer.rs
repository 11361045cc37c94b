//! Completion reports from the screens that run the animation

use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::{DrawId, Role};

/// Several screens may report the same draw. The first report commits it and
/// the rest are dropped quietly.
pub async fn handle_presentation_complete(
    state: &AppState,
    role: &Role,
    draw_id: DrawId,
) -> Option<ServerMessage> {
    match state.complete_draw(draw_id).await {
        Ok(record) => {
            tracing::debug!(
                "{:?} reported end of draw {}, {} wins round {}",
                role,
                draw_id,
                record.name,
                record.round
            );
        }
        Err(e) => {
            tracing::debug!("Completion from {:?} ignored: {}", role, e);
        }
    }
    None
}
