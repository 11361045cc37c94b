use std::f64::consts::PI;

use rand::{Rng, RngCore};

use super::{secs_scaled, Choreography, PlanDetail, Presentation};
use crate::types::{AnimationType, DrawSettings, Entry};

const WHEEL_COLORS: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8B500", "#00CED1",
];

const MIN_EXTRA_TURNS: f64 = 8.0;
const EXTRA_TURN_JITTER: f64 = 4.0;

/// Canvas wheel with one segment per entry. The pointer sits at 12 o'clock
/// and the wheel eases out so the winner's segment center stops under it.
pub struct RouletteWheel;

impl Presentation for RouletteWheel {
    fn kind(&self) -> AnimationType {
        AnimationType::Wheel
    }

    fn choreograph(
        &self,
        entries: &[Entry],
        winner_index: usize,
        settings: &DrawSettings,
        rng: &mut dyn RngCore,
    ) -> Choreography {
        let segment_angle = 2.0 * PI / entries.len() as f64;
        let extra_turns = MIN_EXTRA_TURNS + rng.random::<f64>() * EXTRA_TURN_JITTER;
        let spin_ms = secs_scaled(settings, 1000);

        let segment_colors = (0..entries.len())
            .map(|i| WHEEL_COLORS[i % WHEEL_COLORS.len()].to_string())
            .collect();

        Choreography {
            detail: PlanDetail::Wheel {
                segment_angle,
                target_rotation: target_rotation(winner_index, segment_angle, extra_turns),
                spin_ms,
                segment_colors,
            },
            duration_ms: spin_ms,
        }
    }
}

/// Rotation that puts the center of segment `index` at -π/2, after
/// `extra_turns` full clockwise turns.
fn target_rotation(index: usize, segment_angle: f64, extra_turns: f64) -> f64 {
    let segment_center = index as f64 * segment_angle + segment_angle / 2.0;
    -PI / 2.0 - segment_center - 2.0 * PI * extra_turns
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn normalize(angle: f64) -> f64 {
        angle.rem_euclid(2.0 * PI)
    }

    #[test]
    fn test_winner_segment_lands_under_pointer() {
        let n = 6;
        let seg = 2.0 * PI / n as f64;
        for index in 0..n {
            let rotation = target_rotation(index, seg, 9.5);
            let center = index as f64 * seg + seg / 2.0;
            let pointer = normalize(rotation + center);
            assert!((pointer - normalize(-PI / 2.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_spins_at_least_eight_turns() {
        let c = RouletteWheel.choreograph(&entries(5), 4, &DrawSettings::default(), &mut rng());
        match c.detail {
            PlanDetail::Wheel {
                target_rotation,
                spin_ms,
                ref segment_colors,
                ..
            } => {
                assert!(target_rotation <= -2.0 * PI * MIN_EXTRA_TURNS);
                assert!(target_rotation > -2.0 * PI * (MIN_EXTRA_TURNS + EXTRA_TURN_JITTER + 2.0));
                assert_eq!(spin_ms, 4000);
                assert_eq!(c.duration_ms, 4000);
                assert_eq!(segment_colors.len(), 5);
            }
            other => panic!("unexpected detail {:?}", other),
        }
    }
}
