//! Analyze the 100 Ω / 10 mH / 1 µF series RLC band-pass.
//!
//! Run with: cargo run -p resona-core --example bandpass_demo

use resona_core::{FilterAnalysis, FilterSpec, Result};

fn main() -> Result<()> {
    let spec = FilterSpec::band_pass(100.0, 10e-3, 1e-6)?;
    let report = FilterAnalysis::new().run(&spec)?;
    let cf = &report.characteristics;

    println!("{spec}");
    println!("H(s) = {}", report.transfer_function);
    println!("ω0   = {:.3} rad/s", cf.omega_0);
    for (name, value) in ["ωc1", "ωc2"].iter().zip(cf.cutoffs.to_vec()) {
        println!("{name:<4} = {value:.3} rad/s");
    }
    if let (Some(bw), Some(q)) = (cf.bandwidth, cf.quality_factor) {
        println!("BW   = {bw:.3} rad/s, Q = {q:.4}");
    }

    println!();
    println!("{:>14}  {:>10}  {:>9}", "ω (rad/s)", "|H| (dB)", "φ (deg)");
    let step = report.response.len() / 20;
    for i in (0..report.response.len()).step_by(step.max(1)) {
        println!(
            "{:>14.3}  {:>10.3}  {:>9.2}",
            report.response.omegas[i], report.response.magnitude_db[i], report.response.phase_degrees[i]
        );
    }

    println!();
    println!("step response peak: {:.4}", report.step.values().iter().fold(0.0f64, |m, v| m.max(*v)));
    Ok(())
}
