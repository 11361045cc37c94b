//! Winner selection over the active pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Entry, RefillThreshold};

/// Build the random source for a session. A fixed seed makes rehearsals
/// reproducible; otherwise the generator is seeded from the OS.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform index into a pool of `len` entries. `len` must be non-zero.
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    debug_assert!(len > 0, "cannot pick from an empty pool");
    rng.random_range(0..len)
}

/// Returns the pool to draw from and whether it had to be refilled from
/// the roster.
pub fn pool_for_draw(
    remaining: &[Entry],
    roster: &[Entry],
    threshold: RefillThreshold,
) -> (Vec<Entry>, bool) {
    if threshold.should_refill(remaining.len()) {
        (roster.to_vec(), true)
    } else {
        (remaining.to_vec(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: u32) -> Vec<Entry> {
        (0..n)
            .map(|id| Entry {
                id,
                name: format!("P{}", id),
            })
            .collect()
    }

    #[test]
    fn test_pick_index_in_bounds() {
        let mut rng = session_rng(Some(7));
        for len in 1..20 {
            for _ in 0..50 {
                assert!(pick_index(len, &mut rng) < len);
            }
        }
    }

    #[test]
    fn test_pick_index_reaches_every_slot() {
        let mut rng = session_rng(Some(42));
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[pick_index(5, &mut rng)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = session_rng(Some(99));
        let mut b = session_rng(Some(99));
        let xs: Vec<usize> = (0..10).map(|_| pick_index(100, &mut a)).collect();
        let ys: Vec<usize> = (0..10).map(|_| pick_index(100, &mut b)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_pool_refills_when_empty() {
        let all = roster(3);
        let (pool, refilled) = pool_for_draw(&[], &all, RefillThreshold::Empty);
        assert!(refilled);
        assert_eq!(pool, all);

        let (pool, refilled) = pool_for_draw(&all[..1], &all, RefillThreshold::Empty);
        assert!(!refilled);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_pool_refills_on_last_one() {
        let all = roster(3);
        let (pool, refilled) = pool_for_draw(&all[2..], &all, RefillThreshold::LastOne);
        assert!(refilled);
        assert_eq!(pool.len(), 3);
    }
}
