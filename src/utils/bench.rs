//! Shared benchmark utilities.
//!
//! By default (`cpu_cycles` feature), measurements use CPU cycle counters
//! for precise micro-benchmarking. Use `--features use_time` or
//! `--no-default-features` to use wall-clock time instead.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

// ============================================================================
// Measurement abstraction: cycles or time depending on feature flags
// ============================================================================

/// Measurement value type - cycles (u64) or Duration depending on feature
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub type Measurement = u64;

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub type Measurement = Duration;

/// Opaque start point returned by [`now`]
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub type Instant = u64;

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub type Instant = std::time::Instant;

/// Read current measurement (cycles or time)
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
#[inline(always)]
pub fn now() -> Instant {
    crate::utils::cycles::read_cycles()
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
#[inline(always)]
pub fn now() -> Instant {
    std::time::Instant::now()
}

/// Calculate elapsed measurement
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
#[inline(always)]
pub fn elapsed(start: Instant) -> Measurement {
    crate::utils::cycles::read_cycles().saturating_sub(start)
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
#[inline(always)]
pub fn elapsed(start: Instant) -> Measurement {
    start.elapsed()
}

/// Raw measurement as an integer (cycles, or nanoseconds)
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub fn to_nanos(m: Measurement) -> u64 {
    m
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub fn to_nanos(m: Measurement) -> u64 {
    m.as_nanos() as u64
}

/// Get the measurement unit name
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub const fn unit_name() -> &'static str {
    #[cfg(target_arch = "aarch64")]
    {
        "ticks"
    }
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        "cycles"
    }
    #[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64", target_arch = "x86")))]
    {
        "units"
    }
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub const fn unit_name() -> &'static str {
    "ns"
}

/// Format a stored measurement for display.
///
/// Results always carry a `Duration`; in cycle mode its nanosecond count
/// holds the raw cycle count.
pub fn format_measurement(d: Duration) -> String {
    #[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
    {
        format!("{} {}", d.as_nanos(), unit_name())
    }
    #[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
    {
        format!("{:?}", d)
    }
}

/// Time an expression, returning `(measurement, value)`.
///
/// The measurement uses the feature-selected clock.
#[macro_export]
macro_rules! measure {
    ($body:expr) => {{
        let start = $crate::utils::bench::now();
        let value = $body;
        ($crate::utils::bench::elapsed(start), value)
    }};
}

// ============================================================================
// Randomization
// ============================================================================

/// Get a fresh seed when the caller did not ask for a reproducible run
pub fn time_seed() -> u64 {
    rand::random()
}

/// Shuffle a schedule deterministically from `seed`
pub fn shuffle<T>(slice: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    slice.shuffle(&mut rng);
}

// ============================================================================
// Statistics
// ============================================================================

/// Drop the 1% extremes on both ends of a sorted sample set.
///
/// Sample sets too small to lose a point at 1% are returned unchanged.
pub fn trim_outliers(sorted: &[u64]) -> &[u64] {
    let cut = sorted.len() / 100;
    if cut == 0 {
        return sorted;
    }
    &sorted[cut..sorted.len() - cut]
}

/// Sample standard deviation of raw measurements around `mean`
pub fn calculate_std_dev(values: &[u64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let variance: f64 = values
        .iter()
        .map(|&v| {
            let diff = v as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;

    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_reproducible() {
        let mut a: Vec<usize> = (0..64).collect();
        let mut b = a.clone();
        shuffle(&mut a, 42);
        shuffle(&mut b, 42);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_trim_outliers() {
        let small: Vec<u64> = (0..30).collect();
        assert_eq!(trim_outliers(&small).len(), 30);

        let large: Vec<u64> = (0..200).collect();
        let trimmed = trim_outliers(&large);
        assert_eq!(trimmed.len(), 196);
        assert_eq!(trimmed.first(), Some(&2));
        assert_eq!(trimmed.last(), Some(&197));
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(calculate_std_dev(&[5], 5.0), 0.0);
        // Sample variance of [2, 4, 4, 4, 5, 5, 7, 9] is 32 / 7
        let values = [2, 4, 4, 4, 5, 5, 7, 9];
        let sd = calculate_std_dev(&values, 5.0);
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_measure_macro_returns_value() {
        let (_elapsed, value) = crate::measure!(std::hint::black_box(6 * 7));
        assert_eq!(value, 42);
    }
}
