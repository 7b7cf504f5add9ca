//! Algorithm registry for dynamic benchmark discovery and execution.

use crate::error::{BenchError, Result};
use crate::utils::bench::Measurement;
use crate::utils::timer::VariantResult;

/// Result from running a variant benchmark (alias for VariantResult)
pub type BenchmarkResult = VariantResult;

/// A closure that runs one measured sample of a variant
pub struct VariantClosure<'a> {
    pub name: &'static str,
    pub description: &'static str,
    /// Returns (timing_measurement, optional_result_value).
    /// Timing happens inside the closure to eliminate Fn trait overhead.
    pub run: Box<dyn FnMut() -> (Measurement, Option<f64>) + 'a>,
}

/// Trait that all benchmarked algorithms implement
pub trait AlgorithmRunner: Send + Sync {
    /// Name of the algorithm (e.g., "expr_visitor")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category (e.g., "dispatch")
    fn category(&self) -> &'static str;

    /// What the size parameter means for this algorithm
    fn size_label(&self) -> &'static str {
        "Size"
    }

    fn available_variants(&self) -> Vec<&'static str>;

    /// Prepare one closure per variant for the given size.
    ///
    /// Input construction happens here, outside the measured region.
    fn get_variant_closures(&self, size: usize) -> Result<Vec<VariantClosure<'_>>>;

    /// Verify every variant agrees with the first (reference) variant
    fn verify(&self) -> Result<()>;
}

pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn AlgorithmRunner>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    pub fn register<A: AlgorithmRunner + 'static>(&mut self, algo: A) {
        self.algorithms.push(Box::new(algo));
    }

    pub fn all(&self) -> &[Box<dyn AlgorithmRunner>] {
        &self.algorithms
    }

    /// Find algorithm by name
    pub fn find(&self, name: &str) -> Result<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
            .ok_or_else(|| BenchError::UnknownAlgorithm {
                name: name.to_string(),
                available: self.list_names().join(", "),
            })
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .filter(|a| a.category() == category)
            .map(|a| a.as_ref())
            .collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all algorithms
pub fn build_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();

    registry.register(crate::dispatch::method_call::MethodCallRunner);
    registry.register(crate::dispatch::expr_visitor::ExprVisitorRunner);

    registry
}
