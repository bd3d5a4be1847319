use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_uniform_weights_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let weights = uniform_weights(&mut rng, 1000);
    assert_eq!(weights.len(), 1000);
    assert!(weights.iter().all(|w| (-1.0..=1.0).contains(w)));
    // not degenerate
    assert!(weights.iter().any(|w| *w < 0.0));
    assert!(weights.iter().any(|w| *w > 0.0));
}

#[test]
fn test_seeded_initialisation_is_reproducible() {
    let a = uniform_weights(&mut StdRng::seed_from_u64(42), 16);
    let b = uniform_weights(&mut StdRng::seed_from_u64(42), 16);
    let c = uniform_weights(&mut StdRng::seed_from_u64(43), 16);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_uniform_custom_bounds() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..100 {
        let x = uniform(&mut rng, 2.0, 3.0);
        assert!((2.0..=3.0).contains(&x));
    }
    assert_eq!(uniform(&mut rng, 5.0, 5.0), 5.0);
}

#[test]
fn test_zero_fan_in() {
    assert!(uniform_weights(&mut StdRng::seed_from_u64(1), 0).is_empty());
    assert_eq!(zero_bias(), 0.0);
}
