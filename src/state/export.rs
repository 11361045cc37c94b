//! Session export/import for restoring a draw between restarts.
//!
//! A snapshot holds the roster, the pool and the winner history plus the
//! host's presentation choices. In-flight draws are never exported.

use super::{AppState, PresentationSettings};
use crate::protocol::ServerMessage;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Schema version for export format compatibility
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    /// Schema version for forward compatibility
    pub schema_version: u32,
    /// Export timestamp (ISO8601)
    pub exported_at: String,
    pub roster: Vec<Entry>,
    pub remaining: Vec<Entry>,
    pub history: Vec<WinnerRecord>,
    #[serde(default)]
    pub animation_type: AnimationType,
    #[serde(default)]
    pub theme: VisualTheme,
    #[serde(default)]
    pub settings: DrawSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error(
        "export schema version {found} is newer than supported version {supported}, please update the server"
    )]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("entry {id} has an empty name")]
    EmptyName { id: EntryId },

    #[error("entry id {id} appears twice in {list}")]
    DuplicateId { id: EntryId, list: &'static str },

    #[error("pool entry {id} ({name}) is not in the roster")]
    NotInRoster { id: EntryId, name: String },

    #[error("history record {index} has round {found}, expected {expected}")]
    RoundOutOfOrder { index: usize, found: u32, expected: u32 },

    #[error("winner {name} of round {round} is not in the roster")]
    UnknownWinner { name: String, round: u32 },
}

impl SessionExport {
    /// Validate the export before import
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.schema_version > EXPORT_SCHEMA_VERSION {
            return Err(ImportError::UnsupportedSchema {
                found: self.schema_version,
                supported: EXPORT_SCHEMA_VERSION,
            });
        }

        let mut ids = HashSet::new();
        for entry in &self.roster {
            if entry.name.trim().is_empty() {
                return Err(ImportError::EmptyName { id: entry.id });
            }
            if !ids.insert(entry.id) {
                return Err(ImportError::DuplicateId {
                    id: entry.id,
                    list: "roster",
                });
            }
        }

        let mut pool_ids = HashSet::new();
        for entry in &self.remaining {
            if !self.roster.contains(entry) {
                return Err(ImportError::NotInRoster {
                    id: entry.id,
                    name: entry.name.clone(),
                });
            }
            if !pool_ids.insert(entry.id) {
                return Err(ImportError::DuplicateId {
                    id: entry.id,
                    list: "pool",
                });
            }
        }

        // Rounds run 1..=n so the next draw continues the numbering
        for (index, record) in self.history.iter().enumerate() {
            let expected = index as u32 + 1;
            if record.round != expected {
                return Err(ImportError::RoundOutOfOrder {
                    index,
                    found: record.round,
                    expected,
                });
            }
            if !ids.contains(&record.entry_id) {
                return Err(ImportError::UnknownWinner {
                    name: record.name.clone(),
                    round: record.round,
                });
            }
        }

        Ok(())
    }
}

impl AppState {
    pub async fn export_state(&self) -> SessionExport {
        let presentation = self.get_presentation().await;
        let session = self.session.read().await;
        SessionExport {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: chrono::Utc::now().to_rfc3339(),
            roster: session.roster().to_vec(),
            remaining: session.remaining().to_vec(),
            history: session.history().to_vec(),
            animation_type: presentation.animation_type,
            theme: presentation.theme,
            settings: presentation.draw,
        }
    }

    /// Replace the session with an exported one. Any draw on screen is
    /// cancelled.
    pub async fn import_state(&self, export: SessionExport) -> Result<(), ImportError> {
        export.validate()?;

        {
            let mut session = self.session.write().await;
            let cancelled = session.in_flight();
            session.restore(export.roster, export.remaining, export.history);
            self.cancel_reveal_timer(None).await;
            if let Some(draw_id) = cancelled {
                tracing::info!("Draw {} cancelled by import", draw_id);
                self.broadcast_to_all(ServerMessage::DrawCancelled { draw_id });
            }
        }

        *self.presentation.write().await = PresentationSettings {
            animation_type: export.animation_type,
            theme: export.theme,
            draw: export.settings.clamped(),
        };

        tracing::info!("Session imported from export dated {}", export.exported_at);
        self.broadcast_presentation().await;
        self.broadcast_session().await;
        Ok(())
    }
}
