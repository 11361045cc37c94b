use crate::presentation::AnimationPlan;
use crate::state::SessionSnapshot;
use crate::types::*;
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    // Host-only messages
    /// Replace the roster with pasted text, one name per line
    HostLoadRoster {
        text: String,
    },
    HostStartDraw,
    /// Draw the next winner straight from the result screen
    HostDrawAgain,
    HostResetToSetup,
    HostClearHistory,
    HostSetAnimationType {
        animation_type: AnimationType,
    },
    HostUpdateSettings {
        settings: DrawSettings,
    },
    HostResetSettings,
    HostSetTheme {
        theme: VisualTheme,
    },
    /// Sent by the screen that ran the animation once it has finished
    PresentationComplete {
        draw_id: DrawId,
    },
    /// Ask for a fresh session snapshot, e.g. after reconnecting
    RequestState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        role: Role,
        session: SessionSnapshot,
        animation_type: AnimationType,
        theme: VisualTheme,
        accent_color: String,
        settings: DrawSettings,
        server_now: String,
    },
    RosterLoaded {
        entries: Vec<Entry>,
    },
    Session {
        session: SessionSnapshot,
    },
    /// A draw was accepted. `winner_index` points into `entries` and the
    /// plan tells every screen how to dramatize it.
    DrawStarted {
        draw_id: DrawId,
        round: u32,
        entries: Vec<Entry>,
        winner_index: usize,
        refilled: bool,
        plan: AnimationPlan,
    },
    WinnerRevealed {
        draw_id: DrawId,
        record: WinnerRecord,
        /// Entries left in the pool after this draw
        remaining: usize,
    },
    DrawCancelled {
        draw_id: DrawId,
    },
    HistoryCleared,
    Settings {
        animation_type: AnimationType,
        theme: VisualTheme,
        accent_color: String,
        settings: DrawSettings,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl ServerMessage {
    pub fn error(code: &str, msg: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            msg: msg.into(),
        }
    }
}
