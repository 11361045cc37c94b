use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::DrawId;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Spawn a background task that completes the draw if no screen has reported
/// completion by the time its presentation should be over.
pub fn spawn_reveal_timer(state: AppState, draw_id: DrawId, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        // Drop our own handle first so completion doesn't abort this task
        state.release_reveal_timer(draw_id).await;

        match state.complete_draw(draw_id).await {
            Ok(record) => {
                tracing::info!(
                    "Reveal timer completed draw {} after {:?} (round {})",
                    draw_id,
                    delay,
                    record.round
                );
                state.broadcast_to_host(ServerMessage::error(
                    "REVEAL_TIMEOUT",
                    format!(
                        "No screen reported the end of draw {}, winner revealed by server",
                        draw_id
                    ),
                ));
            }
            Err(e) => {
                tracing::debug!("Reveal timer for draw {} had nothing to do: {}", draw_id, e);
            }
        }
    })
}
