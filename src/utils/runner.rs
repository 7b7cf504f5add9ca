//! Running registered algorithms over a set of sizes.

use std::path::Path;

use tracing::debug;

use super::bench::{shuffle, time_seed};
use super::timer::{measure_variants, TimingConfig};
use crate::error::Result;
use crate::registry::{AlgorithmRunner, BenchmarkResult};

/// Results of one algorithm at one size
#[derive(Clone, Debug)]
pub struct SizeResults {
    pub size: usize,
    pub results: Vec<BenchmarkResult>,
}

/// Raw timing data for a single variant (used for CSV export)
#[derive(Clone, Debug)]
pub struct RawTimingData {
    pub algo_name: String,
    pub variant_name: String,
    pub input_size: usize,
    pub avg_nanos: u64,
    pub result_sample: Option<f64>,
}

/// Results of several algorithms, indexed `[algorithm][size]`
pub struct GroupedResults {
    pub results: Vec<Vec<SizeResults>>,
    pub raw_data: Vec<RawTimingData>,
}

fn measure_size(algo: &dyn AlgorithmRunner, size: usize, config: &TimingConfig) -> Result<SizeResults> {
    debug!(algorithm = algo.name(), size, runs = config.runs_per_variant, "measuring variants");
    let closures = algo.get_variant_closures(size)?;
    Ok(SizeResults {
        size,
        results: measure_variants(closures, config),
    })
}

/// Run one algorithm over every size, in order
pub fn run_algorithm(algo: &dyn AlgorithmRunner, sizes: &[usize], config: &TimingConfig) -> Result<Vec<SizeResults>> {
    sizes.iter().map(|&size| measure_size(algo, size, config)).collect()
}

/// Run several algorithms with the (algorithm, size) pairs in shuffled order.
///
/// Interleaving the pairs keeps slow drift (thermal, frequency scaling) from
/// always landing on the same algorithm.
pub fn run_all_algorithms_randomized(
    algorithms: &[&dyn AlgorithmRunner],
    sizes: &[usize],
    config: &TimingConfig,
) -> Result<GroupedResults> {
    let seed = config.seed.unwrap_or_else(time_seed);
    let mut tasks: Vec<(usize, usize)> = (0..algorithms.len())
        .flat_map(|a| (0..sizes.len()).map(move |s| (a, s)))
        .collect();
    shuffle(&mut tasks, seed);

    let mut slots: Vec<Vec<Option<SizeResults>>> = vec![vec![None; sizes.len()]; algorithms.len()];
    for (task_idx, (algo_idx, size_idx)) in tasks.into_iter().enumerate() {
        let task_config = TimingConfig {
            seed: Some(seed.wrapping_add(task_idx as u64)),
            ..config.clone()
        };
        let measured = measure_size(algorithms[algo_idx], sizes[size_idx], &task_config)?;
        slots[algo_idx][size_idx] = Some(measured);
    }

    let results: Vec<Vec<SizeResults>> = slots
        .into_iter()
        .map(|row| row.into_iter().flatten().collect())
        .collect();

    let raw_data = algorithms
        .iter()
        .zip(&results)
        .flat_map(|(algo, per_size)| raw_rows(algo.name(), per_size))
        .collect();

    Ok(GroupedResults { results, raw_data })
}

/// Flatten one algorithm's results into CSV rows
pub fn raw_rows(algo_name: &str, per_size: &[SizeResults]) -> Vec<RawTimingData> {
    per_size
        .iter()
        .flat_map(|sr| {
            sr.results.iter().map(move |r| RawTimingData {
                algo_name: algo_name.to_string(),
                variant_name: r.name.clone(),
                input_size: sr.size,
                avg_nanos: r.avg_nanos_f64 as u64,
                result_sample: r.result_sample,
            })
        })
        .collect()
}

/// Export timing data to CSV file
pub fn export_csv(path: &Path, data: &[RawTimingData]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), data)?;
    Ok(())
}

fn write_csv<W: std::io::Write>(mut out: W, data: &[RawTimingData]) -> std::io::Result<()> {
    writeln!(out, "algorithm,variant,compiler,input_size,avg_time_ns,result")?;

    for entry in data {
        let compiler = if entry.variant_name.starts_with("c-") {
            crate::utils::C_COMPILER_NAME.unwrap_or("Unknown")
        } else {
            ""
        };

        writeln!(
            out,
            "{},{},{},{},{},{}",
            entry.algo_name,
            entry.variant_name,
            compiler,
            entry.input_size,
            entry.avg_nanos,
            entry.result_sample.map(|v| v.to_string()).unwrap_or_default()
        )?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::build_registry;
    use crate::utils::timer::PinStrategy;
    use pretty_assertions::assert_eq;

    fn quick_config() -> TimingConfig {
        TimingConfig {
            runs_per_variant: 3,
            warmup_iterations: 1,
            pin_strategy: PinStrategy::Disabled,
            trim_outliers: false,
            seed: Some(1234),
        }
    }

    #[test]
    fn test_randomized_results_are_regrouped() {
        let registry = build_registry();
        let algos: Vec<&dyn AlgorithmRunner> = registry.all().iter().map(|a| a.as_ref()).collect();
        let sizes = [2, 16];

        let grouped = run_all_algorithms_randomized(&algos, &sizes, &quick_config()).unwrap();

        assert_eq!(grouped.results.len(), algos.len());
        for (algo, per_size) in algos.iter().zip(&grouped.results) {
            assert_eq!(per_size.iter().map(|s| s.size).collect::<Vec<_>>(), vec![2, 16]);
            for sr in per_size {
                assert_eq!(sr.results.len(), algo.available_variants().len());
            }
        }

        let expected_rows: usize = algos.iter().map(|a| a.available_variants().len() * sizes.len()).sum();
        assert_eq!(grouped.raw_data.len(), expected_rows);
    }

    #[test]
    fn test_expression_results_carry_value() {
        let registry = build_registry();
        let algo = registry.find("expr_visitor").unwrap();
        let per_size = run_algorithm(algo, &[3], &quick_config()).unwrap();
        for r in &per_size[0].results {
            assert_eq!(r.result_sample, Some(4.0), "{}", r.name);
        }
    }

    #[test]
    fn test_csv_layout() {
        let rows = vec![
            RawTimingData {
                algo_name: "expr_visitor".into(),
                variant_name: "static-match".into(),
                input_size: 16,
                avg_nanos: 120,
                result_sample: Some(121.0),
            },
            RawTimingData {
                algo_name: "method_call".into(),
                variant_name: "dynamic".into(),
                input_size: 2,
                avg_nanos: 7,
                result_sample: None,
            },
        ];

        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "algorithm,variant,compiler,input_size,avg_time_ns,result\n\
             expr_visitor,static-match,,16,120,121\n\
             method_call,dynamic,,2,7,\n"
        );
    }
}
