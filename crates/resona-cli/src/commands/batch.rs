//! Batch analysis of many designs.

use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use resona_config::{DesignBatch, FilterDesign};
use resona_core::{CharacteristicSolver, FilterAnalysis, TimeDomainSimulator};
use serde::Serialize;

use super::common::{StrategyArg, hz};

#[derive(Args)]
pub struct BatchArgs {
    /// Batch TOML file with [[designs]] tables
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Cutoff derivation
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write the JSON report to a file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// One analyzed design.
#[derive(Debug, Serialize)]
struct BatchRow {
    name: String,
    kind: String,
    omega_0: Option<f64>,
    cutoffs: Vec<f64>,
    bandwidth: Option<f64>,
    quality_factor: Option<f64>,
    peak_omega: Option<f64>,
    peak_at_boundary: Option<bool>,
    diagnostics: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl BatchRow {
    fn failed(design: &FilterDesign, error: impl ToString) -> Self {
        Self {
            name: design.name.clone(),
            kind: design.kind.clone(),
            omega_0: None,
            cutoffs: Vec::new(),
            bandwidth: None,
            quality_factor: None,
            peak_omega: None,
            peak_at_boundary: None,
            diagnostics: 0,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchReport {
    name: Option<String>,
    designs: Vec<BatchRow>,
}

fn analyze(design: &FilterDesign, solver: CharacteristicSolver) -> anyhow::Result<BatchRow> {
    let spec = design.to_spec()?;
    let sim = TimeDomainSimulator::new(&spec.transfer_function()?);
    let report = FilterAnalysis::new()
        .with_solver(solver)
        .with_sweep(design.frequency_sweep()?)
        .with_step_time_base(design.time_base(&sim)?)
        .run(&spec)?;
    let cf = &report.characteristics;

    Ok(BatchRow {
        name: design.name.clone(),
        kind: spec.kind().name().to_string(),
        omega_0: Some(cf.omega_0),
        cutoffs: cf.cutoffs.to_vec(),
        bandwidth: cf.bandwidth,
        quality_factor: cf.quality_factor,
        peak_omega: Some(report.response.peak.omega),
        peak_at_boundary: Some(report.response.peak.is_at_boundary()),
        diagnostics: cf.diagnostics.len(),
        error: None,
    })
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let batch = DesignBatch::load(&args.file)?;
    if batch.is_empty() {
        anyhow::bail!("{} contains no [[designs]]", args.file.display());
    }
    let solver = CharacteristicSolver::new(args.strategy.into());

    let pb = ProgressBar::new(batch.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut rows = Vec::with_capacity(batch.len());
    for design in &batch {
        pb.set_message(design.name.clone());
        let row = analyze(design, solver).unwrap_or_else(|e| {
            tracing::warn!(design = %design.name, error = %e, "design failed");
            BatchRow::failed(design, e)
        });
        rows.push(row);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let failures = rows.iter().filter(|r| r.error.is_some()).count();
    let report = BatchReport {
        name: batch.name.clone(),
        designs: rows,
    };

    if let Some(path) = &args.output {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    if let Some(path) = &args.output {
        eprintln!("Wrote batch report to {}", path.display());
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {} designs failed", report.designs.len());
    }
    Ok(())
}

fn print_table(report: &BatchReport) {
    if let Some(name) = &report.name {
        println!("{name}");
    }
    println!(
        "  {:<24} {:<10} {:>14} {:>12} {:>14} {:>10}",
        "name", "kind", "ω0/ωc (rad/s)", "f (Hz)", "BW (rad/s)", "Q"
    );
    for row in &report.designs {
        match (&row.error, row.omega_0) {
            (Some(error), _) => println!("  {:<24} {:<10} error: {error}", row.name, row.kind),
            (None, Some(w0)) => println!(
                "  {:<24} {:<10} {:>14.4} {:>12.4} {:>14} {:>10}",
                row.name,
                row.kind,
                w0,
                hz(w0),
                optional(row.bandwidth, 4),
                optional(row.quality_factor, 6)
            ),
            (None, None) => {}
        }
        if row.peak_at_boundary == Some(true) {
            println!("  {:<24} warning: peak on a sweep boundary", "");
        }
        if row.diagnostics > 0 {
            println!(
                "  {:<24} warning: {} derivation disagreement(s)",
                "", row.diagnostics
            );
        }
    }
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use resona_config::get_factory_preset;

    #[test]
    fn analyze_reference_band_pass() {
        let design = get_factory_preset("bandpass-reference").unwrap();
        let row = analyze(&design, CharacteristicSolver::default()).unwrap();
        assert_eq!(row.kind, "band-pass");
        assert!((row.omega_0.unwrap() - 1e4).abs() < 1e-6);
        assert_eq!(row.cutoffs.len(), 2);
        assert!(row.error.is_none());
    }

    #[test]
    fn failed_row_serializes_error() {
        let design = FilterDesign::new(
            "bad",
            resona_core::FilterKind::LowPass,
            -1.0,
            None,
            1e-6,
        );
        let err = analyze(&design, CharacteristicSolver::default()).unwrap_err();
        let row = BatchRow::failed(&design, err);
        let json = serde_json::to_value(&row).unwrap();
        assert!(json["error"].as_str().unwrap().contains("resistance"));
        assert!(json["omega_0"].is_null());
    }

    #[test]
    fn optional_formatting() {
        assert_eq!(optional(None, 3), "-");
        assert_eq!(optional(Some(1.23456), 2), "1.23");
    }
}
