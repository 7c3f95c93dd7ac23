//! Frequency response evaluation (Bode sweep).

use rustfft::num_complex::Complex;

use crate::error::{EngineError, Result};
use crate::polynomial::PolynomialRatio;
use crate::sweep::FrequencySweep;

/// Where the swept magnitude maximum sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakPosition {
    /// Strictly inside the sweep.
    Interior,
    /// On the first sample; the true maximum may lie below `start`.
    LowerBoundary,
    /// On the last sample; the true maximum may lie above `stop`.
    UpperBoundary,
}

/// The largest |H| found in a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Sample index.
    pub index: usize,
    /// Angular frequency of the sample (rad/s).
    pub omega: f64,
    /// Linear magnitude |H(jω)|.
    pub magnitude: f64,
    /// Interior or boundary sample.
    pub position: PeakPosition,
}

impl Peak {
    /// True when the maximum is on a sweep boundary, in which case the
    /// normalized magnitude may understate the true peak gain.
    pub fn is_at_boundary(&self) -> bool {
        self.position != PeakPosition::Interior
    }
}

/// H(jω) sampled over a sweep.
///
/// All vectors are aligned by index with `omegas`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    /// Angular frequencies (rad/s), strictly increasing.
    pub omegas: Vec<f64>,
    /// Complex response H(jω).
    pub response: Vec<Complex<f64>>,
    /// 20·log10|H(jω)|.
    pub magnitude_db: Vec<f64>,
    /// |H(jω)| divided by the largest |H| in the sweep.
    pub magnitude_linear_normalized: Vec<f64>,
    /// atan2(Im, Re) in degrees, wrapped to (-180, 180] per sample.
    pub phase_degrees: Vec<f64>,
    /// Largest magnitude in the sweep.
    pub peak: Peak,
}

impl FrequencyResponse {
    /// Evaluate `tf` at every point of `sweep`.
    ///
    /// Normalization is against the swept maximum only: if the true peak lies
    /// outside `[start, stop]` the normalized curve overstates the relative
    /// level. Check [`Peak::is_at_boundary`] to detect this.
    ///
    /// # Errors
    ///
    /// `DegenerateSystem` if a sweep point lands on a pole,
    /// `InvalidPolynomial` if the response is zero at every point.
    pub fn evaluate(tf: &PolynomialRatio, sweep: &FrequencySweep) -> Result<Self> {
        let omegas = sweep.omegas();
        let response = omegas
            .iter()
            .map(|&w| tf.evaluate_at_omega(w))
            .collect::<Result<Vec<_>>>()?;

        let magnitudes: Vec<f64> = response.iter().map(|h| h.norm()).collect();

        let mut peak_index = 0;
        for (i, &m) in magnitudes.iter().enumerate() {
            if m > magnitudes[peak_index] {
                peak_index = i;
            }
        }
        let peak_magnitude = magnitudes[peak_index];
        if peak_magnitude <= 0.0 {
            return Err(EngineError::InvalidPolynomial(
                "response is identically zero over the sweep".to_string(),
            ));
        }

        let position = if peak_index == 0 {
            PeakPosition::LowerBoundary
        } else if peak_index == omegas.len() - 1 {
            PeakPosition::UpperBoundary
        } else {
            PeakPosition::Interior
        };

        #[cfg(feature = "tracing")]
        if position != PeakPosition::Interior {
            tracing::debug!(
                omega = omegas[peak_index],
                ?position,
                "sweep maximum on boundary; normalization is relative to the swept range only"
            );
        }

        let peak = Peak {
            index: peak_index,
            omega: omegas[peak_index],
            magnitude: peak_magnitude,
            position,
        };

        Ok(Self {
            magnitude_db: magnitudes.iter().map(|m| 20.0 * m.log10()).collect(),
            magnitude_linear_normalized: magnitudes.iter().map(|m| m / peak_magnitude).collect(),
            phase_degrees: response.iter().map(|h| h.arg().to_degrees()).collect(),
            omegas,
            response,
            peak,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.omegas.len()
    }

    /// True if the response holds no samples.
    pub fn is_empty(&self) -> bool {
        self.omegas.is_empty()
    }

    /// Linear magnitude |H(jω)| (not normalized).
    pub fn magnitude_linear(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.norm()).collect()
    }

    /// Phase with 360° jumps between neighbouring samples removed.
    pub fn unwrapped_phase_degrees(&self) -> Vec<f64> {
        unwrap_phase_degrees(&self.phase_degrees)
    }

    /// Group delay −dφ/dω in seconds at each sample.
    ///
    /// Central differences inside the sweep, one-sided at the ends.
    pub fn group_delay(&self) -> Vec<f64> {
        let n = self.omegas.len();
        if n < 2 {
            return vec![0.0; n];
        }

        let phase: Vec<f64> = self
            .unwrapped_phase_degrees()
            .iter()
            .map(|p| p.to_radians())
            .collect();
        let w = &self.omegas;

        let mut delay = Vec::with_capacity(n);
        delay.push(-(phase[1] - phase[0]) / (w[1] - w[0]));
        for i in 1..n - 1 {
            delay.push(-(phase[i + 1] - phase[i - 1]) / (w[i + 1] - w[i - 1]));
        }
        delay.push(-(phase[n - 1] - phase[n - 2]) / (w[n - 1] - w[n - 2]));
        delay
    }

    /// Magnitude in dB at `omega`, interpolated linearly in log-frequency.
    pub fn magnitude_db_at(&self, omega: f64) -> f64 {
        interpolate_log(&self.omegas, &self.magnitude_db, omega)
    }

    /// Phase in degrees at `omega`, interpolated linearly in log-frequency.
    pub fn phase_at(&self, omega: f64) -> f64 {
        interpolate_log(&self.omegas, &self.phase_degrees, omega)
    }

    /// Frequencies where the normalized magnitude crosses `level`.
    ///
    /// Each crossing is interpolated between the two bracketing samples in
    /// log-frequency, so its accuracy is bounded by the grid density. Use
    /// [`crate::CharacteristicSolver`] for exact half-power frequencies.
    pub fn crossings(&self, level: f64) -> Vec<f64> {
        let m = &self.magnitude_linear_normalized;
        let w = &self.omegas;
        let mut found = Vec::new();

        for i in 1..m.len() {
            let below_prev = m[i - 1] < level;
            let below_next = m[i] < level;
            if below_prev == below_next {
                continue;
            }
            let t = (level - m[i - 1]) / (m[i] - m[i - 1]);
            let log_w = w[i - 1].ln() + t * (w[i].ln() - w[i - 1].ln());
            found.push(log_w.exp());
        }
        found
    }
}

/// Unwrap a phase sequence in degrees.
///
/// Adds or subtracts multiples of 360° whenever neighbouring samples jump by
/// more than 180°.
pub fn unwrap_phase_degrees(phase: &[f64]) -> Vec<f64> {
    if phase.is_empty() {
        return Vec::new();
    }

    let mut unwrapped = Vec::with_capacity(phase.len());
    unwrapped.push(phase[0]);

    let mut correction = 0.0;
    for i in 1..phase.len() {
        let diff = phase[i] - phase[i - 1];
        if diff > 180.0 {
            correction -= 360.0;
        } else if diff < -180.0 {
            correction += 360.0;
        }
        unwrapped.push(phase[i] + correction);
    }

    unwrapped
}

/// Linear interpolation in log10(x), clamped to the end values.
fn interpolate_log(x: &[f64], y: &[f64], target_x: f64) -> f64 {
    let (Some(&first), Some(&last)) = (y.first(), y.last()) else {
        return 0.0;
    };

    if target_x <= x[0] {
        return first;
    }

    for i in 1..x.len() {
        if target_x <= x[i] {
            let t = (target_x.ln() - x[i - 1].ln()) / (x[i].ln() - x[i - 1].ln());
            return y[i - 1] + t * (y[i] - y[i - 1]);
        }
    }

    last
}
