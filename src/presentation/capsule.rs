use rand::RngCore;

use super::{
    palette_color, secs_scaled, Choreography, PlanDetail, Presentation, FRAME_MS, REVEAL_HOLD_MS,
};
use crate::types::{AnimationType, DrawSettings, Entry};

const CAPSULE_COLORS: usize = 8;
const OPEN_MS: u64 = 500;

const DROP_START_Y: f64 = -100.0;
const GROUND_Y: f64 = 150.0;
const GRAVITY: f64 = 0.8;
const BOUNCE: f64 = 0.6;
const MAX_BOUNCES: u32 = 3;

/// The gacha machine spins, a capsule in the winner's color drops and
/// bounces, then pops open.
pub struct GachaCapsule;

impl Presentation for GachaCapsule {
    fn kind(&self) -> AnimationType {
        AnimationType::Gacha
    }

    fn choreograph(
        &self,
        _entries: &[Entry],
        winner_index: usize,
        settings: &DrawSettings,
        _rng: &mut dyn RngCore,
    ) -> Choreography {
        let spin_ms = secs_scaled(settings, 600);
        let drop_ms = (drop_frames() as f64 * FRAME_MS).round() as u64;

        Choreography {
            detail: PlanDetail::Gacha {
                capsule_color: palette_color(winner_index, CAPSULE_COLORS),
                spin_ms,
                drop_ms,
                open_ms: OPEN_MS,
                hold_ms: REVEAL_HOLD_MS,
            },
            duration_ms: spin_ms + drop_ms + OPEN_MS + REVEAL_HOLD_MS,
        }
    }
}

/// Frames until the capsule comes to rest: three bounces, or earlier once
/// a bounce is too weak to notice.
fn drop_frames() -> u32 {
    let mut y = DROP_START_Y;
    let mut velocity = 0.0_f64;
    let mut bounces = 0;
    let mut frames = 0;

    loop {
        frames += 1;
        velocity += GRAVITY;
        y += velocity;

        if y >= GROUND_Y {
            y = GROUND_Y;
            velocity = -velocity * BOUNCE;
            bounces += 1;
            if bounces >= MAX_BOUNCES || velocity.abs() < 2.0 {
                return frames;
            }
        }
    }
}
