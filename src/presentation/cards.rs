use rand::{Rng, RngCore};

use super::{secs_scaled, Choreography, PlanDetail, Presentation};
use crate::types::{AnimationType, DrawSettings, Entry};

const MAX_CARDS: usize = 6;
const SHUFFLE_COUNT: u32 = 10;
const SHUFFLE_INTERVAL_MS: u64 = 150;
const FLIP_DELAY_MS: u64 = 500;
const FLIP_HOLD_MS: u64 = 800;

/// Up to six face-down cards are shuffled, one is picked and flipped to
/// show the winner. The slot that gets flipped is cosmetic.
pub struct CardFlip;

impl Presentation for CardFlip {
    fn kind(&self) -> AnimationType {
        AnimationType::CardFlip
    }

    fn choreograph(
        &self,
        entries: &[Entry],
        _winner_index: usize,
        settings: &DrawSettings,
        rng: &mut dyn RngCore,
    ) -> Choreography {
        let card_count = entries.len().min(MAX_CARDS);
        let winner_slot = rng.random_range(0..card_count);
        let select_delay_ms = secs_scaled(settings, 300);

        let duration_ms = SHUFFLE_COUNT as u64 * SHUFFLE_INTERVAL_MS
            + select_delay_ms
            + FLIP_DELAY_MS
            + FLIP_HOLD_MS;

        Choreography {
            detail: PlanDetail::CardFlip {
                card_count,
                winner_slot,
                shuffle_count: SHUFFLE_COUNT,
                shuffle_interval_ms: SHUFFLE_INTERVAL_MS,
                select_delay_ms,
                flip_delay_ms: FLIP_DELAY_MS,
                hold_ms: FLIP_HOLD_MS,
            },
            duration_ms,
        }
    }
}
