//! Weight initialisation.
//!
//! Every function takes the random source as an argument so networks can be built
//! reproducibly from a seeded generator (`StdRng::seed_from_u64`), or from
//! `rand::thread_rng()` when reproducibility does not matter.

use rand::Rng;

/// Bounds of the default weight distribution, `U(-1, 1)`.
pub const DEFAULT_WEIGHT_RANGE: (f64, f64) = (-1.0, 1.0);

/// Draws one sample from the uniform distribution on `[low, high]`.
///
/// # Panics
/// If `low > high`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    rng.gen_range(low..=high)
}

/// Draws `fan_in` weights from [`DEFAULT_WEIGHT_RANGE`].
pub fn uniform_weights<R: Rng + ?Sized>(rng: &mut R, fan_in: usize) -> Vec<f64> {
    let (low, high) = DEFAULT_WEIGHT_RANGE;
    (0..fan_in).map(|_| uniform(rng, low, high)).collect()
}

/// Initial bias value.
pub fn zero_bias() -> f64 {
    0.0
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
