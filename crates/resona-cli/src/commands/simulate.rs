//! Time-domain simulation on arbitrary input signals.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use resona_core::export::{import_time_series_csv, write_time_series_csv};
use resona_core::{TimeDomainSimulator, Tone, multi_tone, tone_gains};

use super::common::{FilterArgs, describe_components, to_spec};

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Input tone as FREQ_HZ[:AMPLITUDE], repeatable (e.g. --tone 5:1.0 --tone 200:0.5)
    #[arg(long = "tone", value_name = "FREQ[:AMP]", conflicts_with = "input")]
    tones: Vec<Tone>,

    /// Input signal CSV (time, value)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Sample rate for tone inputs (Hz)
    #[arg(long, default_value = "20000")]
    sample_rate: f64,

    /// Duration for tone inputs (s)
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Output CSV file with input and output columns
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let design = args.filter.load_design()?;
    let spec = to_spec(&design)?;
    let tf = spec.transfer_function()?;
    let sim = TimeDomainSimulator::new(&tf);

    let input = match (&args.input, args.tones.is_empty()) {
        (Some(path), _) => import_time_series_csv(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?,
        (None, false) => multi_tone(args.duration, args.sample_rate, &args.tones)?,
        (None, true) => anyhow::bail!("Provide --tone or --input"),
    };

    let output = sim.simulate(&input)?;

    println!("{} ({}): {}", design.name, spec.kind(), describe_components(&spec));
    println!(
        "  {} samples, {:.6} s",
        input.len(),
        input.t()[input.len() - 1] - input.t()[0]
    );
    println!("  input  RMS {:.6}", rms(input.values()));
    println!("  output RMS {:.6}", rms(output.values()));

    if !args.tones.is_empty() {
        let frequencies: Vec<f64> = args.tones.iter().map(|t| t.frequency_hz).collect();
        let gains = tone_gains(&input, &output, &frequencies)?;

        println!();
        println!(
            "  {:>10}  {:>10}  {:>12}  {:>12}  {:>10}",
            "f (Hz)", "amplitude", "measured", "|H(jω)|", "error (dB)"
        );
        for (tone, gain) in args.tones.iter().zip(&gains) {
            let expected = tf.magnitude_at(tone.omega())?;
            println!(
                "  {:>10.3}  {:>10.4}  {:>12.6}  {:>12.6}  {:>10.4}",
                tone.frequency_hz,
                tone.amplitude,
                gain.gain,
                expected,
                gain.gain_db - 20.0 * expected.log10()
            );
        }
    }

    if let Some(path) = args.output {
        let mut file = BufWriter::new(File::create(&path)?);
        write_time_series_csv(
            &mut file,
            input.t(),
            &[("input", input.values()), ("output", output.values())],
        )?;
        file.flush()?;
        println!("\nWrote simulation to {}", path.display());
    }

    Ok(())
}

fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}
