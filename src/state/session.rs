//! Draw session controller.
//!
//! Owns the roster, the remaining pool, the round counter and the winner
//! history, and is the only place those are mutated. Everything here is
//! synchronous; `AppState` wraps it in a lock and drives the reveal timer.

use chrono::Utc;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::roster::parse_roster;
use crate::selection::{pick_index, pool_for_draw, session_rng};
use crate::types::*;

/// Why a draw request was turned away. Neither case is a user-facing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawRejected {
    #[error("need at least 2 entries to draw, have {count}")]
    NotEnoughEntries { count: usize },

    #[error("draw {draw_id} is still in progress")]
    AlreadyDrawing { draw_id: DrawId },
}

/// Why a completion signal was discarded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionIgnored {
    #[error("no draw in progress")]
    NotDrawing,

    #[error("completion for draw {got} does not match in-flight draw {expected}")]
    StaleDraw { expected: DrawId, got: DrawId },
}

/// What the presentation needs to dramatize one draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawTicket {
    pub draw_id: DrawId,
    /// The pool the winner was picked from, in pool order
    pub pool: Vec<Entry>,
    /// Index into `pool`, not an entry id
    pub winner_index: usize,
    /// True when the pool was replenished from the full roster for this draw
    pub refilled: bool,
}

impl DrawTicket {
    pub fn winner(&self) -> &Entry {
        &self.pool[self.winner_index]
    }
}

#[derive(Debug, Clone)]
struct PendingDraw {
    draw_id: DrawId,
    winner: Entry,
}

/// Serializable view of the session for clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub roster: Vec<Entry>,
    pub remaining: Vec<Entry>,
    pub history: Vec<WinnerRecord>,
    /// Number the next completed draw will get
    pub round: u32,
    pub can_start: bool,
    pub current_winner: Option<Entry>,
    pub draw_id: Option<DrawId>,
}

pub struct DrawSession {
    session_id: SessionId,
    roster: Vec<Entry>,
    remaining: Vec<Entry>,
    history: Vec<WinnerRecord>,
    round: u32,
    phase: SessionPhase,
    /// Generation counter; every accepted draw gets the next value
    last_draw_id: DrawId,
    pending: Option<PendingDraw>,
    current_winner: Option<Entry>,
    refill: RefillThreshold,
    rng: StdRng,
}

impl DrawSession {
    pub fn new(refill: RefillThreshold, seed: Option<u64>) -> Self {
        Self {
            session_id: ulid::Ulid::new().to_string(),
            roster: Vec::new(),
            remaining: Vec::new(),
            history: Vec::new(),
            round: 1,
            phase: SessionPhase::Idle,
            last_draw_id: 0,
            pending: None,
            current_winner: None,
            refill,
            rng: session_rng(seed),
        }
    }

    /// Parse raw text and replace the roster. Clears history and cancels any
    /// in-flight draw. Returns the parsed entries (possibly empty).
    pub fn load_roster(&mut self, raw_text: &str) -> Vec<Entry> {
        let entries = parse_roster(raw_text);
        self.replace_roster(entries.clone());
        entries
    }

    fn replace_roster(&mut self, entries: Vec<Entry>) {
        if let Some(pending) = self.pending.take() {
            tracing::info!("Roster replaced, cancelling draw {}", pending.draw_id);
        }
        self.session_id = ulid::Ulid::new().to_string();
        self.remaining = entries.clone();
        self.roster = entries;
        self.history.clear();
        self.round = 1;
        self.phase = SessionPhase::Idle;
        self.current_winner = None;
    }

    pub fn start_draw(&mut self) -> Result<DrawTicket, DrawRejected> {
        if self.roster.len() < 2 {
            return Err(DrawRejected::NotEnoughEntries {
                count: self.roster.len(),
            });
        }
        if let Some(pending) = &self.pending {
            return Err(DrawRejected::AlreadyDrawing {
                draw_id: pending.draw_id,
            });
        }

        let (pool, refilled) = pool_for_draw(&self.remaining, &self.roster, self.refill);
        if refilled {
            tracing::info!(
                "Pool at {} entries, refilling from roster of {}",
                self.remaining.len(),
                self.roster.len()
            );
            self.remaining = pool.clone();
        }

        let winner_index = pick_index(pool.len(), &mut self.rng);
        self.last_draw_id += 1;
        let draw_id = self.last_draw_id;

        self.pending = Some(PendingDraw {
            draw_id,
            winner: pool[winner_index].clone(),
        });
        self.phase = SessionPhase::Drawing;
        self.current_winner = None;

        Ok(DrawTicket {
            draw_id,
            pool,
            winner_index,
            refilled,
        })
    }

    /// Commit the in-flight draw. Only the first completion for the current
    /// draw id has any effect.
    pub fn complete_draw(&mut self, draw_id: DrawId) -> Result<WinnerRecord, CompletionIgnored> {
        let pending = match &self.pending {
            Some(p) if p.draw_id == draw_id => p.clone(),
            Some(p) => {
                return Err(CompletionIgnored::StaleDraw {
                    expected: p.draw_id,
                    got: draw_id,
                })
            }
            None => return Err(CompletionIgnored::NotDrawing),
        };
        self.pending = None;

        let record = WinnerRecord {
            entry_id: pending.winner.id,
            name: pending.winner.name.clone(),
            timestamp: Utc::now(),
            round: self.history.len() as u32 + 1,
        };
        self.history.push(record.clone());
        self.remaining.retain(|e| e.id != pending.winner.id);
        self.round += 1;
        self.current_winner = Some(pending.winner);
        self.phase = SessionPhase::Revealed;

        Ok(record)
    }

    pub fn draw_again(&mut self) -> Result<DrawTicket, DrawRejected> {
        if self.pending.is_none() {
            self.current_winner = None;
        }
        self.start_draw()
    }

    /// Back to setup. Returns the id of the draw that was cancelled, if any.
    /// History and pool are untouched.
    pub fn reset_to_setup(&mut self) -> Option<DrawId> {
        let cancelled = self.pending.take().map(|p| p.draw_id);
        self.phase = SessionPhase::Idle;
        self.current_winner = None;
        cancelled
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.round = 1;
        self.remaining = self.roster.clone();
    }

    /// Restore roster, pool and history from an export. Any in-flight draw
    /// is dropped.
    pub fn restore(&mut self, roster: Vec<Entry>, remaining: Vec<Entry>, history: Vec<WinnerRecord>) {
        self.replace_roster(roster);
        self.remaining = remaining;
        self.round = history.len() as u32 + 1;
        self.history = history;
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn roster(&self) -> &[Entry] {
        &self.roster
    }

    pub fn remaining(&self) -> &[Entry] {
        &self.remaining
    }

    pub fn history(&self) -> &[WinnerRecord] {
        &self.history
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn refill_threshold(&self) -> RefillThreshold {
        self.refill
    }

    pub fn in_flight(&self) -> Option<DrawId> {
        self.pending.as_ref().map(|p| p.draw_id)
    }

    pub fn current_winner(&self) -> Option<&Entry> {
        self.current_winner.as_ref()
    }

    pub fn can_start(&self) -> bool {
        self.roster.len() >= 2 && self.pending.is_none()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            phase: self.phase,
            roster: self.roster.clone(),
            remaining: self.remaining.clone(),
            history: self.history.clone(),
            round: self.round,
            can_start: self.can_start(),
            current_winner: self.current_winner.clone(),
            draw_id: self.in_flight(),
        }
    }
}

impl Default for DrawSession {
    fn default() -> Self {
        Self::new(RefillThreshold::default(), None)
    }
}
