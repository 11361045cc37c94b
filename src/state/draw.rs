use super::{AppState, RevealTimer};
use crate::presentation::{plan_draw, AnimationPlan};
use crate::protocol::ServerMessage;
use crate::reveal::spawn_reveal_timer;
use crate::state::session::{CompletionIgnored, DrawRejected, DrawTicket};
use crate::types::*;
use std::time::Duration;

/// An accepted draw, as handed to the presentation layer
#[derive(Debug, Clone)]
pub struct DrawStart {
    pub ticket: DrawTicket,
    pub plan: AnimationPlan,
    /// Round number this draw will be recorded under
    pub round: u32,
}

impl AppState {
    /// Replace the roster from pasted text. Cancels any draw on screen.
    pub async fn load_roster(&self, text: &str) -> Vec<Entry> {
        let entries = {
            let mut session = self.session.write().await;
            let cancelled = session.in_flight();
            let entries = session.load_roster(text);
            self.cancel_reveal_timer(None).await;
            if let Some(draw_id) = cancelled {
                self.broadcast_to_all(ServerMessage::DrawCancelled { draw_id });
            }
            self.broadcast_to_all(ServerMessage::RosterLoaded {
                entries: entries.clone(),
            });
            entries
        };

        tracing::info!("Roster loaded with {} entries", entries.len());
        if entries.len() < 2 {
            tracing::debug!("Roster too small to draw from");
        }
        self.broadcast_session().await;
        entries
    }

    pub async fn start_draw(&self) -> Result<DrawStart, DrawRejected> {
        self.begin_draw(false).await
    }

    pub async fn draw_again(&self) -> Result<DrawStart, DrawRejected> {
        self.begin_draw(true).await
    }

    async fn begin_draw(&self, again: bool) -> Result<DrawStart, DrawRejected> {
        let presentation = self.get_presentation().await;

        // The session lock is held until the timer is armed and the start is
        // broadcast, so a concurrent reset can't slip in between.
        let mut session = self.session.write().await;
        let ticket = if again {
            session.draw_again()?
        } else {
            session.start_draw()?
        };
        let round = session.round();

        let plan = {
            let mut rng = rand::rng();
            plan_draw(
                presentation.animation_type,
                &ticket.pool,
                ticket.winner_index,
                &presentation.draw,
                presentation.theme.accent_color(),
                &mut rng,
            )
        };

        tracing::info!(
            "Draw {} started: round {}, pool of {}{}, {:?} for {}ms",
            ticket.draw_id,
            round,
            ticket.pool.len(),
            if ticket.refilled { " (refilled)" } else { "" },
            plan.animation_type,
            plan.duration_ms
        );

        let delay = Duration::from_millis(plan.duration_ms) + self.completion_grace;
        self.schedule_reveal(ticket.draw_id, delay).await;

        self.broadcast_to_all(ServerMessage::DrawStarted {
            draw_id: ticket.draw_id,
            round,
            entries: ticket.pool.clone(),
            winner_index: ticket.winner_index,
            refilled: ticket.refilled,
            plan: plan.clone(),
        });
        drop(session);

        Ok(DrawStart {
            ticket,
            plan,
            round,
        })
    }

    /// Commit the draw once its presentation has finished. The first signal
    /// for a draw wins; later or stale ones are ignored.
    pub async fn complete_draw(&self, draw_id: DrawId) -> Result<WinnerRecord, CompletionIgnored> {
        let (record, remaining) = {
            let mut session = self.session.write().await;
            let record = session.complete_draw(draw_id)?;
            let remaining = session.remaining().len();
            self.cancel_reveal_timer(Some(draw_id)).await;
            self.broadcast_to_all(ServerMessage::WinnerRevealed {
                draw_id,
                record: record.clone(),
                remaining,
            });
            (record, remaining)
        };

        tracing::info!(
            "Draw {} revealed: round {} won by {} (entry {}), {} left in pool",
            draw_id,
            record.round,
            record.name,
            record.entry_id,
            remaining
        );
        self.broadcast_session().await;
        Ok(record)
    }

    /// Return to setup, cancelling any draw in progress. History and pool
    /// are kept.
    pub async fn reset_to_setup(&self) -> Option<DrawId> {
        let cancelled = {
            let mut session = self.session.write().await;
            let cancelled = session.reset_to_setup();
            self.cancel_reveal_timer(None).await;
            if let Some(draw_id) = cancelled {
                self.broadcast_to_all(ServerMessage::DrawCancelled { draw_id });
            }
            cancelled
        };

        if let Some(draw_id) = cancelled {
            tracing::info!("Draw {} cancelled", draw_id);
        }
        self.broadcast_session().await;
        cancelled
    }

    pub async fn clear_history(&self) {
        self.session.write().await.clear_history();
        tracing::info!("Winner history cleared");
        self.broadcast_to_all(ServerMessage::HistoryCleared);
        self.broadcast_session().await;
    }

    pub async fn get_history(&self) -> Vec<WinnerRecord> {
        self.session.read().await.history().to_vec()
    }

    async fn schedule_reveal(&self, draw_id: DrawId, delay: Duration) {
        let handle = spawn_reveal_timer(self.clone(), draw_id, delay);
        let mut slot = self.reveal_timer.lock().await;
        if let Some(old) = slot.replace(RevealTimer { draw_id, handle }) {
            old.handle.abort();
        }
    }

    /// Abort the pending reveal timer. With `Some(draw_id)` only that draw's
    /// timer is touched. Callers hold the session write lock, so the timer
    /// slot always agrees with the controller's in-flight draw.
    pub(crate) async fn cancel_reveal_timer(&self, draw_id: Option<DrawId>) {
        let mut slot = self.reveal_timer.lock().await;
        let matches = match (&*slot, draw_id) {
            (Some(timer), Some(id)) => timer.draw_id == id,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if matches {
            if let Some(timer) = slot.take() {
                timer.handle.abort();
                tracing::debug!("Reveal timer for draw {} aborted", timer.draw_id);
            }
        }
    }

    /// Called by a firing timer so that completing its own draw does not
    /// abort the task doing the completing.
    pub(crate) async fn release_reveal_timer(&self, draw_id: DrawId) {
        let mut slot = self.reveal_timer.lock().await;
        if slot.as_ref().is_some_and(|t| t.draw_id == draw_id) {
            slot.take();
        }
    }

    pub async fn has_pending_reveal(&self) -> bool {
        self.reveal_timer.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    fn state() -> AppState {
        AppState::with_config(&ServerConfig {
            seed: Some(11),
            ..ServerConfig::default()
        })
    }

    #[tokio::test]
    async fn test_draw_round_trip() {
        let state = state();
        let entries = state.load_roster("Alice\nBob\nCarol").await;
        assert_eq!(entries.len(), 3);

        let start = state.start_draw().await.unwrap();
        assert_eq!(start.round, 1);
        assert_eq!(start.ticket.pool.len(), 3);
        assert!(state.has_pending_reveal().await);

        let record = state.complete_draw(start.ticket.draw_id).await.unwrap();
        assert_eq!(record.entry_id, start.ticket.winner().id);
        assert!(!state.has_pending_reveal().await);

        let snap = state.snapshot().await;
        assert_eq!(snap.phase, SessionPhase::Revealed);
        assert_eq!(snap.remaining.len(), 2);
        assert_eq!(snap.history.len(), 1);
    }

    #[tokio::test]
    async fn test_second_start_is_rejected() {
        let state = state();
        state.load_roster("A\nB").await;
        let first = state.start_draw().await.unwrap();
        assert!(matches!(
            state.start_draw().await,
            Err(DrawRejected::AlreadyDrawing { .. })
        ));
        state.complete_draw(first.ticket.draw_id).await.unwrap();
        assert!(state.complete_draw(first.ticket.draw_id).await.is_err());
        assert_eq!(state.get_history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_aborts_timer_and_drops_completion() {
        let state = state();
        state.load_roster("A\nB\nC").await;
        let start = state.start_draw().await.unwrap();

        assert_eq!(state.reset_to_setup().await, Some(start.ticket.draw_id));
        assert!(!state.has_pending_reveal().await);
        assert!(state.complete_draw(start.ticket.draw_id).await.is_err());
        assert!(state.get_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_draw_started_is_broadcast() {
        let state = state();
        let mut rx = state.broadcast.subscribe();
        state.load_roster("A\nB\nC").await;
        let start = state.start_draw().await.unwrap();

        let mut saw_start = false;
        while let Ok(msg) = rx.try_recv() {
            if let ServerMessage::DrawStarted {
                draw_id,
                winner_index,
                entries,
                ..
            } = msg
            {
                assert_eq!(draw_id, start.ticket.draw_id);
                assert_eq!(winner_index, start.ticket.winner_index);
                assert_eq!(entries, start.ticket.pool);
                saw_start = true;
            }
        }
        assert!(saw_start);
    }

    #[tokio::test]
    async fn test_load_roster_cancels_draw() {
        let state = state();
        state.load_roster("A\nB\nC").await;
        let start = state.start_draw().await.unwrap();
        state.load_roster("X\nY").await;
        assert!(!state.has_pending_reveal().await);
        assert!(state.complete_draw(start.ticket.draw_id).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reset_never_precedes_start() {
        let state = state();
        let mut rx = state.broadcast.subscribe();
        let mut started = std::collections::HashSet::new();

        for _ in 0..50 {
            state.load_roster("A\nB\nC").await;
            let starter = tokio::spawn({
                let state = state.clone();
                async move { state.start_draw().await.ok() }
            });
            let resetter = tokio::spawn({
                let state = state.clone();
                async move { state.reset_to_setup().await }
            });
            starter.await.unwrap();
            resetter.await.unwrap();

            // A dead draw never keeps a reveal timer
            let snap = state.snapshot().await;
            assert_eq!(snap.draw_id.is_some(), state.has_pending_reveal().await);
            state.reset_to_setup().await;

            while let Ok(msg) = rx.try_recv() {
                match msg {
                    ServerMessage::DrawStarted { draw_id, .. } => {
                        started.insert(draw_id);
                    }
                    ServerMessage::DrawCancelled { draw_id } => {
                        assert!(
                            started.contains(&draw_id),
                            "draw {} cancelled before it was announced",
                            draw_id
                        );
                    }
                    _ => {}
                }
            }
        }
    }

    #[tokio::test]
    async fn test_reload_announces_cancelled_draw() {
        let state = state();
        state.load_roster("A\nB\nC").await;
        let start = state.start_draw().await.unwrap();
        let mut rx = state.broadcast.subscribe();

        state.load_roster("X\nY").await;
        assert!(matches!(
            rx.try_recv(),
            Ok(ServerMessage::DrawCancelled { draw_id }) if draw_id == start.ticket.draw_id
        ));
    }
}
