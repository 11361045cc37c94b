//! WebSocket message dispatch
//!
//! Authorization is checked here, then dispatched to role-specific handler
//! modules. Most handlers answer through the broadcast channels and return
//! `None`.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Role;

use super::{beamer, host};

/// Macro to check host authorization and return early if unauthorized
macro_rules! check_host {
    ($role:expr, $action:expr) => {
        if *$role != Role::Host {
            return Some(ServerMessage::error(
                "UNAUTHORIZED",
                format!("Only host can {}", $action),
            ));
        }
    };
}

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    role: &Role,
    state: &AppState,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::RequestState => Some(ServerMessage::Session {
            session: state.snapshot().await,
        }),

        ClientMessage::PresentationComplete { draw_id } => {
            if *role == Role::Audience {
                return Some(ServerMessage::error(
                    "UNAUTHORIZED",
                    "Only host or beamer can report presentation completion",
                ));
            }
            beamer::handle_presentation_complete(state, role, draw_id).await
        }

        // Host-only commands (authorization checked before dispatch)
        ClientMessage::HostLoadRoster { text } => {
            check_host!(role, "load the roster");
            host::handle_load_roster(state, text).await
        }

        ClientMessage::HostStartDraw => {
            check_host!(role, "start draws");
            host::handle_start_draw(state).await
        }

        ClientMessage::HostDrawAgain => {
            check_host!(role, "start draws");
            host::handle_draw_again(state).await
        }

        ClientMessage::HostResetToSetup => {
            check_host!(role, "reset to setup");
            host::handle_reset_to_setup(state).await
        }

        ClientMessage::HostClearHistory => {
            check_host!(role, "clear history");
            host::handle_clear_history(state).await
        }

        ClientMessage::HostSetAnimationType { animation_type } => {
            check_host!(role, "change the animation");
            host::handle_set_animation_type(state, animation_type).await
        }

        ClientMessage::HostUpdateSettings { settings } => {
            check_host!(role, "change draw settings");
            host::handle_update_settings(state, settings).await
        }

        ClientMessage::HostResetSettings => {
            check_host!(role, "change draw settings");
            host::handle_reset_settings(state).await
        }

        ClientMessage::HostSetTheme { theme } => {
            check_host!(role, "change the theme");
            host::handle_set_theme(state, theme).await
        }
    }
}
