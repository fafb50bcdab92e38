//! Conformance against the reference Showdown generator.
//!
//! Values were produced by the reference PRNG for the listed seeds; the
//! sequences must match bit for bit on every platform.

use pkmn_rng::{Psrng, Seed, jump, value_at};
use proptest::prelude::*;

const VECTORS: &[(u64, [u32; 5])] = &[
    (0, [0, 1904791564, 183838931, 176901684, 3359619440]),
    (1, [1566083941, 3820307428, 1031784986, 1072108706, 1969985952]),
    (35, [3273330397, 228370069, 4092147060, 1444376383, 1967087641]),
    (0x1234, [801731122, 3266676812, 242540194, 1428379834, 183283829]),
    (u64::MAX, [2728883354, 4284242996, 3630860173, 3576661958, 454285631]),
    (
        0x0001_0002_0003_0004,
        [2030470262, 3793892072, 2851743046, 574702432, 3620926519],
    ),
];

#[test]
fn test_sequential_vectors() {
    for (seed, expected) in VECTORS {
        let mut rng = Psrng::new(*seed);
        for (index, want) in expected.iter().enumerate() {
            assert_eq!(rng.next(), *want, "seed {seed:#x} index {index}");
        }
        assert_eq!(rng.call_count(), expected.len() as u64);
    }
}

#[test]
fn test_value_at_vectors() {
    for (seed, expected) in VECTORS {
        for (index, want) in expected.iter().enumerate() {
            assert_eq!(value_at(*seed, index as u64), *want);
        }
    }
}

#[test]
fn test_seed_35_first_value() {
    assert_eq!(value_at(35, 0), 3273330397);
}

#[test]
fn test_states_after_seed_35() {
    let mut rng = Psrng::new(35u64);
    let states: Vec<u64> = (0..3)
        .map(|_| {
            rng.next();
            rng.state()
        })
        .collect();
    assert_eq!(
        states,
        [0xc31b_0edd_c52e_6792, 0x0d9c_a695_0de0_9d5d, 0xf3e9_3574_3786_7974]
    );
}

#[test]
fn test_range_vectors() {
    let mut rng = Psrng::new(35u64);
    let rolls: Vec<u32> = (0..5).map(|_| rng.range(0, 256)).collect();
    assert_eq!(rolls, [195, 13, 243, 86, 117]);
}

#[test]
fn test_chance_uses_range_semantics() {
    // First draw for seed 35 scales to 195 out of 256.
    assert!(Psrng::new(35u64).chance(196, 256));
    assert!(!Psrng::new(35u64).chance(195, 256));
}

#[test]
fn test_word_seed_matches_integer_seed() {
    let words = Seed::from_words(&[1, 2, 3, 4]).unwrap();
    let mut a = Psrng::new(words);
    let mut b = Psrng::new(0x0001_0002_0003_0004u64);
    for _ in 0..16 {
        assert_eq!(a.next(), b.next());
    }
}

#[test]
fn test_checkpoint_resume() {
    let mut rng = Psrng::new(0x1234u64);
    for _ in 0..1000 {
        rng.next();
    }
    let checkpoint = serde_json::to_string(&rng).unwrap();
    let mut restored: Psrng = serde_json::from_str(&checkpoint).unwrap();
    assert_eq!(restored, rng);
    for _ in 0..50 {
        assert_eq!(restored.next(), rng.next());
    }
}

proptest! {
    #[test]
    fn test_jump_ahead_equals_stepping(seed in any::<u64>(), steps in 0u64..512) {
        let mut rng = Psrng::new(seed);
        for _ in 0..steps {
            rng.next();
        }
        prop_assert_eq!(jump(seed, steps), rng.state());
        prop_assert_eq!(value_at(seed, steps), rng.next());
    }

    #[test]
    fn test_resume_matches_fresh(seed in any::<u64>(), calls in 0u64..10_000) {
        let mut resumed = Psrng::resume(seed, calls);
        prop_assert_eq!(resumed.call_count(), calls);
        prop_assert_eq!(resumed.next(), value_at(seed, calls));
    }

    #[test]
    fn test_range_in_bounds(seed in any::<u64>(), from in 0u32..1000, span in 1u32..1000) {
        let mut rng = Psrng::new(seed);
        let v = rng.range(from, from + span);
        prop_assert!(v >= from && v < from + span);
    }
}
