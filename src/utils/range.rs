//! Geometric parameter ranges for parameterized benchmarks.

use crate::error::{BenchError, Result};

/// Expand `lo..=hi` into benchmark parameters with a geometric step.
///
/// The result is `lo`, every power of `multiplier` strictly between `lo` and
/// `hi`, then `hi`. `2..=8192` with a multiplier of 16 yields
/// `[2, 16, 256, 4096, 8192]`.
pub fn geometric_range(lo: usize, hi: usize, multiplier: usize) -> Result<Vec<usize>> {
    if multiplier < 2 || lo > hi {
        return Err(BenchError::InvalidRange { lo, hi, multiplier });
    }

    let mut values = vec![lo];
    let mut power = 1usize;
    while power < hi {
        if power > lo {
            values.push(power);
        }
        match power.checked_mul(multiplier) {
            Some(next) => power = next,
            None => break,
        }
    }
    if hi != lo {
        values.push(hi);
    }

    Ok(values)
}
