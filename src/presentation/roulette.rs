use rand::{Rng, RngCore};

use super::{Choreography, PlanDetail, Presentation};
use crate::types::{AnimationType, DrawSettings, Entry};

const BASE_TICKS: u32 = 40;
const TICK_JITTER: u32 = 20;
const SLOWDOWN_TICKS: u32 = 10;
const SLOWDOWN_STEP_MS: u64 = 50;
const CRAWL_TICKS: u32 = 5;
const CRAWL_STEP_MS: u64 = 100;

/// Names flicker past in pool order, slowing down over the last ten ticks,
/// and the final frame shows the winner.
pub struct NameRoulette;

impl Presentation for NameRoulette {
    fn kind(&self) -> AnimationType {
        AnimationType::NameRoulette
    }

    fn choreograph(
        &self,
        _entries: &[Entry],
        _winner_index: usize,
        settings: &DrawSettings,
        rng: &mut dyn RngCore,
    ) -> Choreography {
        let total_ticks = BASE_TICKS + rng.random_range(0..TICK_JITTER);
        let tick_delays_ms = tick_delays(total_ticks, settings.spin_speed_ms as u64);
        let duration_ms = tick_delays_ms.iter().sum();

        Choreography {
            detail: PlanDetail::NameRoulette {
                tick_delays_ms,
                start_index: 0,
            },
            duration_ms,
        }
    }
}

fn tick_delays(total_ticks: u32, base_ms: u64) -> Vec<u64> {
    let mut delay = base_ms;
    (1..total_ticks)
        .map(|tick| {
            if tick >= total_ticks - SLOWDOWN_TICKS {
                delay += SLOWDOWN_STEP_MS;
            }
            if tick >= total_ticks - CRAWL_TICKS {
                delay += CRAWL_STEP_MS;
            }
            delay
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_tick_delays_slow_down_at_the_end() {
        let delays = tick_delays(40, 50);
        assert_eq!(delays.len(), 39);
        assert!(delays[..29].iter().all(|d| *d == 50));
        assert_eq!(delays[29], 100);
        assert_eq!(delays[34], 50 + 6 * 50 + 100);
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_duration_is_sum_of_ticks() {
        let c = NameRoulette.choreograph(&entries(4), 2, &DrawSettings::default(), &mut rng());
        match c.detail {
            PlanDetail::NameRoulette {
                ref tick_delays_ms,
                start_index,
            } => {
                assert_eq!(start_index, 0);
                assert!(tick_delays_ms.len() >= 39 && tick_delays_ms.len() < 59);
                assert_eq!(c.duration_ms, tick_delays_ms.iter().sum::<u64>());
            }
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_faster_speed_is_shorter() {
        let fast = tick_delays(45, 30).iter().sum::<u64>();
        let slow = tick_delays(45, 80).iter().sum::<u64>();
        assert!(fast < slow);
    }
}
