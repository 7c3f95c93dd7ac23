//! Step and impulse responses.

use std::path::PathBuf;

use clap::Args;
use resona_config::TransientConfig;
use resona_core::TimeDomainSimulator;
use resona_core::export::export_time_series_csv;

use super::common::{FilterArgs, describe_components, table_rows, to_spec};

#[derive(Args)]
pub struct StepArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Impulse response instead of step
    #[arg(long)]
    impulse: bool,

    /// Simulated span in seconds (default: seven dominant time constants)
    #[arg(long)]
    duration: Option<f64>,

    /// Number of samples
    #[arg(long)]
    points: Option<usize>,

    /// Output CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rows shown in the terminal table
    #[arg(long, default_value = "20")]
    rows: usize,
}

pub fn run(args: StepArgs) -> anyhow::Result<()> {
    let mut design = args.filter.load_design()?;
    let spec = to_spec(&design)?;
    let tf = spec.transfer_function()?;
    let sim = TimeDomainSimulator::new(&tf);

    if args.duration.is_some() || args.points.is_some() {
        let base = design.transient.unwrap_or_default();
        design.transient = Some(TransientConfig {
            duration: args.duration.or(base.duration),
            points: args.points.unwrap_or(base.points),
        });
    }
    let t = design.time_base(&sim)?;

    let (label, series) = if args.impulse {
        ("impulse", sim.impulse_response(&t)?)
    } else {
        ("step", sim.step_response(&t)?)
    };

    let (peak_t, peak) = series
        .iter()
        .fold((0.0, f64::NEG_INFINITY), |best, (ti, v)| {
            if v > best.1 { (ti, v) } else { best }
        });

    println!("{} ({}): {}", design.name, spec.kind(), describe_components(&spec));
    println!(
        "  {label} response, {} samples over {:.6e} s (τ dominant = {:.6e} s)",
        series.len(),
        series.t()[series.len() - 1],
        sim.dominant_time_constant()
    );
    println!("  peak {peak:.6} at t = {peak_t:.6e} s, final {:.6}", series.last_value());

    println!();
    println!("  {:>14}  {:>12}", "t (s)", label);
    for i in table_rows(series.len(), args.rows) {
        println!("  {:>14.6e}  {:>12.6}", series.t()[i], series.values()[i]);
    }

    if let Some(path) = args.output {
        export_time_series_csv(&series, label, &path)?;
        println!("\nWrote {label} response to {}", path.display());
    }

    Ok(())
}
