//! Unified timing system for micro-benchmarks.
//!
//! - Support for both CPU cycles and wall-clock time (via features)
//! - CPU core pinning while measuring
//! - Randomized variant execution to avoid ordering bias

use std::hint::black_box;
use std::time::Duration;

use super::bench::{calculate_std_dev, shuffle, time_seed, to_nanos, trim_outliers, Measurement};
use super::cpu_affinity::CpuPinGuard;
use crate::registry::VariantClosure;

// ============================================================================
// Configuration
// ============================================================================

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements
    Global,
    /// Pin/unpin around each execution
    #[default]
    PerExecution,
    /// Never pin
    Disabled,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of warmup runs before measurement (default: 10)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: PerExecution)
    pub pin_strategy: PinStrategy,
    /// Trim the 1% extremes before computing statistics
    pub trim_outliers: bool,
    /// Seed for the execution schedule; `None` picks a fresh one per call
    pub seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
            trim_outliers: false,
            seed: None,
        }
    }
}

/// Result from measuring a single variant
#[derive(Clone, Debug)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    /// Average measurement (cycles are stored as nanoseconds in cycle mode)
    pub avg_time: Duration,
    /// Precise average as f64
    pub avg_nanos_f64: f64,
    pub median_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub std_dev: Duration,
    /// Number of samples the statistics were computed from
    pub runs: usize,
    /// Value produced by the last run, for cross-variant comparison
    pub result_sample: Option<f64>,
}

/// Measure multiple variants with randomized execution order.
///
/// Warms every variant up, then runs `runs_per_variant` samples of each in a
/// shuffled schedule. Results come back in the order the variants were given.
pub fn measure_variants(mut variants: Vec<VariantClosure<'_>>, config: &TimingConfig) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant;

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    let mut tasks: Vec<usize> = (0..variants.len())
        .flat_map(|v| std::iter::repeat(v).take(samples))
        .collect();
    shuffle(&mut tasks, config.seed.unwrap_or_else(time_seed));

    let mut measurements: Vec<Vec<Measurement>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_samples: Vec<Option<f64>> = vec![None; variants.len()];

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    for variant_idx in tasks {
        let variant = &mut variants[variant_idx];
        let _per_exec_pin = (config.pin_strategy == PinStrategy::PerExecution).then(CpuPinGuard::new);
        let (elapsed, result) = (variant.run)();

        measurements[variant_idx].push(elapsed);
        result_samples[variant_idx] = result;
    }

    variants
        .into_iter()
        .zip(measurements)
        .zip(result_samples)
        .map(|((variant, times), result_sample)| {
            compute_variant_result(variant.name, variant.description, &times, config.trim_outliers, result_sample)
        })
        .collect()
}

/// Compute statistics from raw measurements
fn compute_variant_result(
    name: &'static str,
    description: &'static str,
    measurements: &[Measurement],
    trim: bool,
    result_sample: Option<f64>,
) -> VariantResult {
    let mut sorted: Vec<u64> = measurements.iter().map(|m| to_nanos(*m)).collect();
    sorted.sort_unstable();
    let values = if trim { trim_outliers(&sorted) } else { &sorted[..] };

    let (Some(&min_ns), Some(&max_ns)) = (values.first(), values.last()) else {
        return VariantResult {
            name: name.to_string(),
            description: description.to_string(),
            avg_time: Duration::ZERO,
            avg_nanos_f64: 0.0,
            median_time: Duration::ZERO,
            min_time: Duration::ZERO,
            max_time: Duration::ZERO,
            std_dev: Duration::ZERO,
            runs: 0,
            result_sample: None,
        };
    };

    let median_ns = values[values.len() / 2];
    let avg_nanos_f64 = values.iter().sum::<u64>() as f64 / values.len() as f64;
    let std_dev_ns = calculate_std_dev(values, avg_nanos_f64);

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        avg_time: Duration::from_nanos(avg_nanos_f64 as u64),
        avg_nanos_f64,
        median_time: Duration::from_nanos(median_ns),
        min_time: Duration::from_nanos(min_ns),
        max_time: Duration::from_nanos(max_ns),
        std_dev: Duration::from_nanos(std_dev_ns as u64),
        runs: values.len(),
        result_sample,
    }
}
