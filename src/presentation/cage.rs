use rand::RngCore;

use super::{
    palette_color, secs_scaled, Choreography, PlanDetail, Presentation, FRAME_MS, PALETTE,
    REVEAL_HOLD_MS,
};
use crate::types::{AnimationType, DrawSettings, Entry};

const MAX_VISIBLE_BALLS: usize = 12;
const EJECT_DELAY_MS: u64 = 300;
const EJECT_START_Y: u32 = 140;
const EJECT_END_Y: u32 = 250;
const EJECT_STEP_PX: u32 = 3;

/// Festival-style bingo cage: balls churn, then the winner's ball rolls out
/// of the chute.
pub struct BingoCage;

impl Presentation for BingoCage {
    fn kind(&self) -> AnimationType {
        AnimationType::Bingo
    }

    fn choreograph(
        &self,
        entries: &[Entry],
        winner_index: usize,
        settings: &DrawSettings,
        _rng: &mut dyn RngCore,
    ) -> Choreography {
        let churn_ms = secs_scaled(settings, 700);
        let eject_frames = (EJECT_END_Y - EJECT_START_Y).div_ceil(EJECT_STEP_PX);
        let eject_ms = (eject_frames as f64 * FRAME_MS).round() as u64;

        Choreography {
            detail: PlanDetail::Bingo {
                ball_color: palette_color(winner_index, PALETTE.len()),
                visible_balls: entries.len().min(MAX_VISIBLE_BALLS),
                churn_ms,
                eject_delay_ms: EJECT_DELAY_MS,
                eject_ms,
                hold_ms: REVEAL_HOLD_MS,
            },
            duration_ms: churn_ms + EJECT_DELAY_MS + eject_ms + REVEAL_HOLD_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_bingo_timing() {
        let c = BingoCage.choreograph(&entries(20), 13, &DrawSettings::default(), &mut rng());
        match c.detail {
            PlanDetail::Bingo {
                ref ball_color,
                visible_balls,
                churn_ms,
                eject_ms,
                ..
            } => {
                assert_eq!(ball_color, "#4ECDC4");
                assert_eq!(visible_balls, 12);
                assert_eq!(churn_ms, 2800);
                // 37 frames at 60fps
                assert_eq!(eject_ms, 617);
                assert_eq!(c.duration_ms, 2800 + 300 + 617 + 500);
            }
            other => panic!("unexpected detail {:?}", other),
        }
    }
}
