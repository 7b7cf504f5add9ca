//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use crate::registry::{AlgorithmRegistry, AlgorithmRunner, BenchmarkResult};
use crate::utils::bench::format_measurement;
use crate::utils::runner::SizeResults;
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

fn is_c_variant(name: &str) -> bool {
    name.starts_with("c-") || name.starts_with("c_")
}

/// Move native C variants after the Rust ones, keeping registration order
/// within each group. The reference variant stays first.
pub fn sort_variants(results: &mut [BenchmarkResult]) {
    results.sort_by_key(|r| is_c_variant(&r.name));
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print algorithm info box
pub fn print_algo_info_box(algo: &dyn AlgorithmRunner) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);

    let lines = [
        format!("Algorithm: {}", algo.name()),
        format!("Category:  {}", algo.category()),
        algo.description().to_string(),
        format!("Variants: {}", algo.available_variants().join(", ")),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);

    let border = "─".repeat(content_width + 2);
    let row = |s: &str| println!("│ {:<width$} │", truncate(s, content_width), width = content_width);

    println!("┌{}┐", border);
    for line in &lines[..3] {
        row(line);
    }
    println!("├{}┤", border);
    row(&lines[3]);
    println!("└{}┘", border);
    println!();
}

/// Relative difference of a sample from the baseline's. `None` when either
/// side produced no value.
fn relative_error(sample: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    let (res, base) = (sample?, baseline?);
    let diff = (res - base).abs();
    Some(if base.abs() > 1e-9 { diff / base.abs() } else { diff })
}

fn format_relative_error(error: Option<f64>) -> String {
    match error {
        Some(e) => format!("{:.2e}", e),
        None => "n/a".to_string(),
    }
}

/// Print results table for a single size
pub fn print_results_table(results: &[BenchmarkResult], size_label: &str, size: usize, filtered: bool) {
    let Some(baseline) = results.first() else {
        return;
    };

    let term_width = get_term_width();
    let fixed_width = 72;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = variant_col_width + 64 + 6;

    let baseline_time = baseline.avg_nanos_f64.max(f64::MIN_POSITIVE);
    let baseline_result = baseline.result_sample;

    let filter_note = if filtered { ", filtered" } else { "" };
    println!("  {}: {} ({} runs{})", size_label, size, baseline.runs, filter_note);
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>9} {:>10}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Speedup",
        "CV",
        "Rel. Error",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let speedup = if result.avg_nanos_f64 > 0.0 {
            baseline_time / result.avg_nanos_f64
        } else {
            0.0
        };

        let std_dev_ns = result.std_dev.as_nanos() as f64;
        let cv = if result.avg_nanos_f64 > 0.0 {
            std_dev_ns / result.avg_nanos_f64
        } else {
            0.0
        };

        let relative_error = format_relative_error(relative_error(result.result_sample, baseline_result));

        let display_name = match crate::utils::C_COMPILER_NAME {
            Some(c) if is_c_variant(&result.name) => format!("{} ({})", result.name, c),
            _ => result.name.clone(),
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>10}",
            truncate(&display_name, variant_col_width),
            format_measurement(result.avg_time),
            format_measurement(result.min_time),
            format_measurement(result.max_time),
            speedup,
            cv * 100.0,
            relative_error,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print every size table of one algorithm under its info box
pub fn print_algorithm_results(algo: &dyn AlgorithmRunner, per_size: &[SizeResults], filtered: bool) {
    print_algo_info_box(algo);

    for sr in per_size {
        let mut results = sr.results.clone();
        sort_variants(&mut results);
        print_results_table(&results, algo.size_label(), sr.size, filtered);
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Dispatch Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!("║{}{}{}║", " ".repeat(padding), title, " ".repeat(right_padding));
    println!("╚{}╝", border);
    println!();
}

/// Print the list of available algorithms
pub fn print_available_algorithms(registry: &AlgorithmRegistry) {
    println!("Available algorithms:");
    println!();
    for algo in registry.all() {
        println!("  {:<20} [{}] - {}", algo.name(), algo.category(), algo.description());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result(name: &str) -> BenchmarkResult {
        BenchmarkResult {
            name: name.to_string(),
            description: String::new(),
            avg_time: Duration::ZERO,
            avg_nanos_f64: 0.0,
            median_time: Duration::ZERO,
            min_time: Duration::ZERO,
            max_time: Duration::ZERO,
            std_dev: Duration::ZERO,
            runs: 0,
            result_sample: None,
        }
    }

    #[test]
    fn test_sort_keeps_reference_first_and_c_last() {
        let mut results: Vec<_> = ["static-match", "c-switch", "dynamic-vtable", "c-fnptr", "arena-index"]
            .into_iter()
            .map(result)
            .collect();
        sort_variants(&mut results);
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["static-match", "dynamic-vtable", "arena-index", "c-switch", "c-fnptr"]
        );
    }

    #[test]
    fn test_relative_error_missing_sample() {
        assert_eq!(relative_error(Some(110.0), Some(100.0)), Some(0.1));
        assert_eq!(relative_error(None, Some(100.0)), None);
        assert_eq!(relative_error(Some(1.0), None), None);
        assert_eq!(format_relative_error(None), "n/a");
        assert_eq!(format_relative_error(Some(0.0)), "0.00e0");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-variant", 8), "a-ver...");
    }
}
