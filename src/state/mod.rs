mod draw;
pub mod export;
pub mod history;
pub mod session;

use crate::config::ServerConfig;
use crate::protocol::ServerMessage;
use crate::types::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;

pub use draw::DrawStart;
pub use session::{CompletionIgnored, DrawRejected, DrawSession, DrawTicket, SessionSnapshot};

/// Presentation choices made by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationSettings {
    pub animation_type: AnimationType,
    pub theme: VisualTheme,
    pub draw: DrawSettings,
}

/// Reveal timer for the draw currently on screen
pub(crate) struct RevealTimer {
    pub draw_id: DrawId,
    pub handle: JoinHandle<()>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<DrawSession>>,
    pub presentation: Arc<RwLock<PresentationSettings>>,
    pub(crate) reveal_timer: Arc<Mutex<Option<RevealTimer>>>,
    /// Extra time past the plan's duration before the server completes a
    /// draw on its own
    pub completion_grace: Duration,
    /// Broadcast channel for sending messages to all clients
    pub broadcast: broadcast::Sender<ServerMessage>,
    /// Broadcast channel for sending messages to Host clients only
    pub host_broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(&ServerConfig::default())
    }

    pub fn with_config(config: &ServerConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(100);
        let (host_tx, _) = broadcast::channel(100);
        Self {
            session: Arc::new(RwLock::new(DrawSession::new(config.refill, config.seed))),
            presentation: Arc::new(RwLock::new(PresentationSettings {
                animation_type: config.animation_type,
                theme: config.theme,
                draw: config.draw_settings.clamped(),
            })),
            reveal_timer: Arc::new(Mutex::new(None)),
            completion_grace: config.completion_grace,
            broadcast: broadcast_tx,
            host_broadcast: host_tx,
        }
    }

    /// Broadcast a message to all connected clients
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        let _ = self.broadcast.send(msg);
    }

    /// Broadcast a message to Host clients only
    pub fn broadcast_to_host(&self, msg: ServerMessage) {
        let _ = self.host_broadcast.send(msg);
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.read().await.snapshot()
    }

    pub async fn get_presentation(&self) -> PresentationSettings {
        *self.presentation.read().await
    }

    pub async fn set_animation_type(&self, animation_type: AnimationType) -> PresentationSettings {
        let mut p = self.presentation.write().await;
        p.animation_type = animation_type;
        *p
    }

    pub async fn set_theme(&self, theme: VisualTheme) -> PresentationSettings {
        let mut p = self.presentation.write().await;
        p.theme = theme;
        *p
    }

    /// Store new draw settings, clamped into range
    pub async fn update_draw_settings(&self, settings: DrawSettings) -> PresentationSettings {
        let mut p = self.presentation.write().await;
        p.draw = settings.clamped();
        *p
    }

    pub async fn reset_draw_settings(&self) -> PresentationSettings {
        self.update_draw_settings(DrawSettings::default()).await
    }

    pub async fn broadcast_session(&self) {
        let session = self.snapshot().await;
        self.broadcast_to_all(ServerMessage::Session { session });
    }

    pub async fn broadcast_presentation(&self) {
        let p = self.get_presentation().await;
        self.broadcast_to_all(ServerMessage::Settings {
            animation_type: p.animation_type,
            theme: p.theme,
            accent_color: p.theme.accent_color().to_string(),
            settings: p.draw,
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_state_is_idle() {
        let state = AppState::new();
        let snap = state.snapshot().await;
        assert_eq!(snap.phase, SessionPhase::Idle);
        assert!(snap.roster.is_empty());
        assert!(!snap.can_start);
        assert_eq!(snap.round, 1);
    }

    #[tokio::test]
    async fn test_settings_are_clamped() {
        let state = AppState::new();
        let p = state
            .update_draw_settings(DrawSettings {
                spin_duration_secs: 99,
                spin_speed_ms: 0,
            })
            .await;
        assert_eq!(p.draw.spin_duration_secs, MAX_SPIN_DURATION_SECS);
        assert_eq!(p.draw.spin_speed_ms, MIN_SPIN_SPEED_MS);

        let p = state.reset_draw_settings().await;
        assert_eq!(p.draw, DrawSettings::default());
    }

    #[tokio::test]
    async fn test_presentation_choices() {
        let state = AppState::new();
        state.set_animation_type(AnimationType::Bingo).await;
        let p = state.set_theme(VisualTheme::Casino).await;
        assert_eq!(p.animation_type, AnimationType::Bingo);
        assert_eq!(p.theme, VisualTheme::Casino);
    }
}
