//! Time bases and test signals.

use core::f64::consts::TAU;
use core::fmt;
use core::str::FromStr;

use crate::error::{EngineError, Result};
use crate::transient::TimeSeries;

/// `points` evenly spaced values from `start` to `stop` inclusive.
///
/// # Errors
///
/// `InvalidInput` unless both bounds are finite, `start < stop` and
/// `points ≥ 2`.
pub fn linspace(start: f64, stop: f64, points: usize) -> Result<Vec<f64>> {
    if !(start.is_finite() && stop.is_finite()) || start >= stop {
        return Err(EngineError::invalid_input(format!(
            "time span [{start}, {stop}] must be finite and increasing"
        )));
    }
    if points < 2 {
        return Err(EngineError::invalid_input(format!(
            "a time base needs at least two points, got {points}"
        )));
    }

    let step = (stop - start) / (points - 1) as f64;
    let mut t: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
    t[points - 1] = stop;
    Ok(t)
}

/// Sample instants `k / sample_rate` covering `[0, duration)`.
///
/// # Errors
///
/// `InvalidInput` unless both arguments are finite and positive and the
/// duration holds at least two samples.
pub fn uniform_time_base(duration: f64, sample_rate: f64) -> Result<Vec<f64>> {
    if !(duration.is_finite() && duration > 0.0) {
        return Err(EngineError::invalid_input(format!(
            "duration must be finite and positive, got {duration}"
        )));
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(EngineError::invalid_input(format!(
            "sample rate must be finite and positive, got {sample_rate}"
        )));
    }

    let samples = (duration * sample_rate).round() as usize;
    if samples < 2 {
        return Err(EngineError::invalid_input(format!(
            "{duration} s at {sample_rate} Hz is fewer than two samples"
        )));
    }
    Ok((0..samples).map(|k| k as f64 / sample_rate).collect())
}

/// One sinusoidal component of a test signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in hertz.
    pub frequency_hz: f64,
    /// Peak amplitude.
    pub amplitude: f64,
}

impl Tone {
    /// Build a tone.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the frequency is negative or either value is not
    /// finite.
    pub fn new(frequency_hz: f64, amplitude: f64) -> Result<Self> {
        if !(frequency_hz.is_finite() && frequency_hz >= 0.0) {
            return Err(EngineError::invalid_input(format!(
                "tone frequency must be finite and non-negative, got {frequency_hz}"
            )));
        }
        if !amplitude.is_finite() {
            return Err(EngineError::invalid_input(format!(
                "tone amplitude must be finite, got {amplitude}"
            )));
        }
        Ok(Self {
            frequency_hz,
            amplitude,
        })
    }

    /// Angular frequency in rad/s.
    pub fn omega(&self) -> f64 {
        TAU * self.frequency_hz
    }

    /// A·sin(2πf·t).
    pub fn sample(&self, t: f64) -> f64 {
        self.amplitude * (self.omega() * t).sin()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.frequency_hz, self.amplitude)
    }
}

/// Parses `FREQ` or `FREQ:AMPLITUDE` (amplitude defaults to 1).
impl FromStr for Tone {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |field: &str, what: &str| {
            field.trim().parse::<f64>().map_err(|_| {
                EngineError::invalid_input(format!("invalid tone {what} '{field}' in '{s}'"))
            })
        };

        match s.split_once(':') {
            Some((freq, amp)) => Tone::new(parse(freq, "frequency")?, parse(amp, "amplitude")?),
            None => Tone::new(parse(s, "frequency")?, 1.0),
        }
    }
}

/// Sum of `tones` sampled at every instant of `t`.
pub fn sum_of_sines(t: &[f64], tones: &[Tone]) -> Vec<f64> {
    t.iter()
        .map(|&ti| tones.iter().map(|tone| tone.sample(ti)).sum())
        .collect()
}

/// Multi-tone input signal of `duration` seconds sampled at `sample_rate`.
pub fn multi_tone(duration: f64, sample_rate: f64, tones: &[Tone]) -> Result<TimeSeries> {
    let t = uniform_time_base(duration, sample_rate)?;
    let values = sum_of_sines(&t, tones);
    TimeSeries::new(t, values)
}

/// Unit step sampled on `t`.
pub fn unit_step(t: &[f64]) -> Vec<f64> {
    vec![1.0; t.len()]
}
