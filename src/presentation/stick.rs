use rand::RngCore;

use super::{secs_scaled, Choreography, PlanDetail, Presentation, REVEAL_HOLD_MS};
use crate::types::{AnimationType, DrawSettings, Entry};

/// Omikuji box: shaken, then a numbered stick slides out with the winner's
/// name on it.
pub struct OmikujiStick;

impl Presentation for OmikujiStick {
    fn kind(&self) -> AnimationType {
        AnimationType::Omikuji
    }

    fn choreograph(
        &self,
        _entries: &[Entry],
        _winner_index: usize,
        settings: &DrawSettings,
        _rng: &mut dyn RngCore,
    ) -> Choreography {
        let shake_ms = secs_scaled(settings, 500);
        let draw_ms = secs_scaled(settings, 400);

        Choreography {
            detail: PlanDetail::Omikuji {
                shake_ms,
                draw_ms,
                hold_ms: REVEAL_HOLD_MS,
            },
            duration_ms: shake_ms + draw_ms + REVEAL_HOLD_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_omikuji_timing() {
        let c = OmikujiStick.choreograph(&entries(2), 1, &DrawSettings::default(), &mut rng());
        assert_eq!(c.duration_ms, 2000 + 1600 + 500);
    }
}
