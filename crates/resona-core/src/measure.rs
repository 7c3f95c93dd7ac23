//! Spectral measurement of simulated signals.
//!
//! [`tone_gains`] compares input and output spectra of a multi-tone
//! simulation at each tone frequency. It is the time-domain counterpart of
//! [`FrequencyResponse`](crate::response::FrequencyResponse): for a settled
//! simulation the measured gain matches |H(j2πf)|.

use core::f64::consts::TAU;

use rustfft::{FftPlanner, num_complex::Complex};

use crate::error::{EngineError, Result};
use crate::transient::TimeSeries;

/// Gain measured at one tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneGain {
    /// Requested frequency (Hz).
    pub frequency_hz: f64,
    /// Centre frequency of the FFT bin used (Hz).
    pub bin_frequency_hz: f64,
    /// |Y| / |X| at that bin.
    pub gain: f64,
    /// 20·log10(gain).
    pub gain_db: f64,
}

/// Measure output/input gain at each of `frequencies_hz`.
///
/// Only the second half of the record is analyzed so start-up transients are
/// excluded. Both halves are Hann-windowed before the FFT.
///
/// # Errors
///
/// `InvalidInput` if the two series do not share a uniformly sampled time
/// base, the analysis window is shorter than 16 samples, a frequency lies
/// outside `(0, fs/2)`, or the input has no energy at a requested bin.
pub fn tone_gains(
    input: &TimeSeries,
    output: &TimeSeries,
    frequencies_hz: &[f64],
) -> Result<Vec<ToneGain>> {
    if input.t() != output.t() {
        return Err(EngineError::invalid_input(
            "input and output must share a time base",
        ));
    }
    let sample_rate = uniform_sample_rate(input.t())?;

    let start = input.len() / 2;
    let size = input.len() - start;
    if size < 16 {
        return Err(EngineError::invalid_input(format!(
            "analysis window of {size} samples is too short"
        )));
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(size);
    let spectrum = |samples: &[f64]| {
        let mut buffer: Vec<Complex<f64>> = samples
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let w = 0.5 * (1.0 - (TAU * i as f64 / size as f64).cos());
                Complex::new(x * w, 0.0)
            })
            .collect();
        fft.process(&mut buffer);
        buffer
    };
    let x = spectrum(&input.values()[start..]);
    let y = spectrum(&output.values()[start..]);

    let floor = 1e-9 * x.iter().map(|c| c.norm()).fold(0.0, f64::max);
    let nyquist = sample_rate / 2.0;
    frequencies_hz
        .iter()
        .map(|&f| {
            if !(f > 0.0 && f < nyquist) {
                return Err(EngineError::invalid_input(format!(
                    "tone at {f} Hz is outside (0, {nyquist}) Hz"
                )));
            }
            let bin = (f * size as f64 / sample_rate).round() as usize;
            let input_level = x[bin].norm();
            if input_level <= floor {
                return Err(EngineError::invalid_input(format!(
                    "input has no energy near {f} Hz"
                )));
            }
            let gain = y[bin].norm() / input_level;
            Ok(ToneGain {
                frequency_hz: f,
                bin_frequency_hz: bin as f64 * sample_rate / size as f64,
                gain,
                gain_db: 20.0 * gain.log10(),
            })
        })
        .collect()
}

fn uniform_sample_rate(t: &[f64]) -> Result<f64> {
    if t.len() < 2 {
        return Err(EngineError::invalid_input(
            "need at least two samples to infer a sample rate",
        ));
    }
    let dt = (t[t.len() - 1] - t[0]) / (t.len() - 1) as f64;
    let uniform = t
        .windows(2)
        .all(|w| ((w[1] - w[0]) - dt).abs() <= 1e-6 * dt);
    if !uniform {
        return Err(EngineError::invalid_input(
            "spectral measurement needs a uniformly sampled time base",
        ));
    }
    Ok(1.0 / dt)
}
