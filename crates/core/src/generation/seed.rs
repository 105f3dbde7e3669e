//! Seed mixing and random-stream helpers for the placement driver.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// Derives an independent seed for the `dungeon_index`-th dungeon generated
/// from one base seed, such as one layout per team.
pub fn derive_dungeon_seed(base_seed: u64, dungeon_index: u32) -> u64 {
    let mut mixed = base_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(dungeon_index).wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Uniform-enough index into a non-empty collection of `len` items.
pub(super) fn pick_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Fisher-Yates shuffle driven by the run's random source.
pub(super) fn shuffle<T>(rng: &mut ChaCha8Rng, items: &mut [T]) {
    for upper in (1..items.len()).rev() {
        let swap_with = pick_index(rng, upper + 1);
        items.swap(upper, swap_with);
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn pick_index_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for len in 1..50 {
            assert!(pick_index(&mut rng, len) < len);
        }
    }

    #[test]
    fn shuffle_is_a_deterministic_permutation() {
        let mut left: Vec<u32> = (0..20).collect();
        let mut right = left.clone();
        shuffle(&mut ChaCha8Rng::seed_from_u64(7), &mut left);
        shuffle(&mut ChaCha8Rng::seed_from_u64(7), &mut right);
        assert_eq!(left, right);

        let mut sorted = left.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
        assert_ne!(left, sorted, "a 20-element shuffle should move something");
    }

    #[test]
    fn dungeon_seeds_change_when_inputs_change() {
        let baseline = derive_dungeon_seed(99, 2);
        assert_ne!(baseline, derive_dungeon_seed(98, 2));
        assert_ne!(baseline, derive_dungeon_seed(99, 3));
        assert_eq!(baseline, derive_dungeon_seed(99, 2));
    }
}
