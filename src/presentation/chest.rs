use rand::RngCore;

use super::{secs_scaled, Choreography, PlanDetail, Presentation, REVEAL_HOLD_MS};
use crate::types::{AnimationType, DrawSettings, Entry};

const SHUFFLE_INTERVAL_MS: u64 = 100;

/// The chest shakes while random names flash inside, then the lid opens on
/// the winner.
pub struct TreasureChest;

impl Presentation for TreasureChest {
    fn kind(&self) -> AnimationType {
        AnimationType::TreasureChest
    }

    fn choreograph(
        &self,
        _entries: &[Entry],
        _winner_index: usize,
        settings: &DrawSettings,
        _rng: &mut dyn RngCore,
    ) -> Choreography {
        let shake_ms = secs_scaled(settings, 600);
        let open_ms = secs_scaled(settings, 300);

        Choreography {
            detail: PlanDetail::TreasureChest {
                shuffle_interval_ms: SHUFFLE_INTERVAL_MS,
                shake_ms,
                open_ms,
                hold_ms: REVEAL_HOLD_MS,
            },
            duration_ms: shake_ms + open_ms + REVEAL_HOLD_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_chest_timing() {
        let settings = DrawSettings {
            spin_duration_secs: 10,
            spin_speed_ms: 50,
        };
        let c = TreasureChest.choreograph(&entries(3), 0, &settings, &mut rng());
        assert_eq!(c.duration_ms, 6000 + 3000 + 500);
    }
}
