//! Frequency response sweep.

use std::path::PathBuf;

use clap::Args;
use resona_core::export::{export_frd, export_response_csv};
use resona_core::{FrequencyResponse, FrequencySweep, PeakPosition};

use super::common::{FilterArgs, describe_components, hz, table_rows, to_spec};

#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// First angular frequency (rad/s)
    #[arg(long, requires = "stop")]
    start: Option<f64>,

    /// Last angular frequency (rad/s)
    #[arg(long, requires = "start")]
    stop: Option<f64>,

    /// Number of log-spaced points
    #[arg(long)]
    points: Option<usize>,

    /// Unwrap phase and add group delay
    #[arg(long)]
    unwrap: bool,

    /// Output file (.csv, .json or .frd)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rows shown in the terminal table
    #[arg(long, default_value = "20")]
    rows: usize,
}

pub fn run(args: SweepArgs) -> anyhow::Result<()> {
    let design = args.filter.load_design()?;
    let spec = to_spec(&design)?;
    let tf = spec.transfer_function()?;

    let default = design.frequency_sweep()?;
    let sweep = match (args.start, args.stop) {
        (Some(start), Some(stop)) => {
            FrequencySweep::new(start, stop, args.points.unwrap_or(default.count()))?
        }
        _ => match args.points {
            Some(points) => FrequencySweep::new(default.start(), default.stop(), points)?,
            None => default,
        },
    };

    let response = FrequencyResponse::evaluate(&tf, &sweep)?;
    let peak = response.peak;

    println!("{} ({}): {}", design.name, spec.kind(), describe_components(&spec));
    println!(
        "  {} points from {:.4} to {:.4} rad/s",
        response.len(),
        sweep.start(),
        sweep.stop()
    );
    println!(
        "  peak |H| = {:.6} at {:.4} rad/s ({:.4} Hz)",
        peak.magnitude,
        peak.omega,
        hz(peak.omega)
    );
    match peak.position {
        PeakPosition::Interior => {}
        PeakPosition::LowerBoundary => println!(
            "  warning: peak on the first sample; the true maximum may lie below the sweep"
        ),
        PeakPosition::UpperBoundary => println!(
            "  warning: peak on the last sample; the true maximum may lie above the sweep"
        ),
    }

    let phase = if args.unwrap {
        response.unwrapped_phase_degrees()
    } else {
        response.phase_degrees.clone()
    };

    println!();
    println!(
        "  {:>14}  {:>12}  {:>10}  {:>10}  {:>9}",
        "ω (rad/s)", "f (Hz)", "|H| (dB)", "|H| norm", "φ (deg)"
    );
    for i in table_rows(response.len(), args.rows) {
        let w = response.omegas[i];
        println!(
            "  {:>14.4}  {:>12.4}  {:>10.3}  {:>10.6}  {:>9.2}",
            w,
            hz(w),
            response.magnitude_db[i],
            response.magnitude_linear_normalized[i],
            phase[i]
        );
    }

    if let Some(path) = args.output {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("json") => {
                let mut json = serde_json::json!({
                    "name": design.name,
                    "kind": spec.kind().name(),
                    "omega_rad_s": response.omegas,
                    "magnitude_db": response.magnitude_db,
                    "magnitude_normalized": response.magnitude_linear_normalized,
                    "phase_deg": phase,
                    "peak": {
                        "omega": peak.omega,
                        "magnitude": peak.magnitude,
                        "at_boundary": peak.is_at_boundary(),
                    },
                });
                if args.unwrap {
                    json["group_delay_s"] = serde_json::json!(response.group_delay());
                }
                std::fs::write(&path, serde_json::to_string_pretty(&json)?)?;
            }
            Some("frd") => export_frd(&response, &path)?,
            _ => export_response_csv(&response, &path, args.unwrap)?,
        }
        println!("\nWrote frequency response to {}", path.display());
    }

    Ok(())
}
