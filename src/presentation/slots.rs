use rand::RngCore;

use super::{secs_scaled, Choreography, PlanDetail, Presentation, ReelPlan};
use crate::types::{AnimationType, DrawSettings, Entry};

const ITEM_HEIGHT_PX: u32 = 80;
const STRIP_REPEAT: u32 = 3;
const REEL_SPEEDS_PX: [f64; 3] = [15.0, 18.0, 21.0];
/// Per-reel stop delay, in ms per second of spin duration
const REEL_STOP_SCALE: [u64; 3] = [400, 600, 900];
const DECELERATION: f64 = 0.9;
const DECELERATION_TICK_MS: u64 = 30;
const SETTLE_MS: u64 = 300;

/// Three reels showing the pool three times over. Reels stop left to right
/// and each one settles with the winner in the center window.
pub struct SlotMachine;

impl Presentation for SlotMachine {
    fn kind(&self) -> AnimationType {
        AnimationType::SlotMachine
    }

    fn choreograph(
        &self,
        entries: &[Entry],
        winner_index: usize,
        settings: &DrawSettings,
        _rng: &mut dyn RngCore,
    ) -> Choreography {
        let target_offset_px = center_offset(entries.len(), winner_index);

        let reels: Vec<ReelPlan> = REEL_SPEEDS_PX
            .iter()
            .zip(REEL_STOP_SCALE)
            .map(|(&speed_px, scale)| ReelPlan {
                speed_px,
                stop_delay_ms: secs_scaled(settings, scale),
                decelerate_ms: deceleration_ms(speed_px),
                target_offset_px,
            })
            .collect();

        let last_stop = reels
            .iter()
            .map(|r| r.stop_delay_ms + r.decelerate_ms)
            .max()
            .unwrap_or(0);

        Choreography {
            detail: PlanDetail::SlotMachine {
                item_height_px: ITEM_HEIGHT_PX,
                strip_repeat: STRIP_REPEAT,
                reels,
                settle_ms: SETTLE_MS,
            },
            duration_ms: last_stop + SETTLE_MS,
        }
    }
}

/// The window shows the item one below the strip offset, so the middle copy
/// of the winner lands in the center at `(len + index - 1) * item height`.
fn center_offset(len: usize, winner_index: usize) -> u32 {
    (len + winner_index).saturating_sub(1) as u32 * ITEM_HEIGHT_PX
}

fn deceleration_ms(initial_speed: f64) -> u64 {
    let mut speed = initial_speed;
    let mut ticks = 0;
    while speed >= 1.0 {
        speed *= DECELERATION;
        ticks += 1;
    }
    ticks * DECELERATION_TICK_MS
}
