//! Log-spaced angular frequency grids.

use crate::error::{EngineError, Result};
use crate::topology::{FilterKind, FilterSpec};

/// Descriptor for a logarithmic frequency sweep in rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySweep {
    start: f64,
    stop: f64,
    count: usize,
}

impl FrequencySweep {
    /// Create a sweep of `count` log-spaced points from `start` to `stop`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` unless `0 < start < stop`, both finite, and `count ≥ 2`,
    /// or when the range is too narrow to hold `count` strictly increasing
    /// values.
    pub fn new(start: f64, stop: f64, count: usize) -> Result<Self> {
        let invalid = |reason| EngineError::InvalidRange {
            start,
            stop,
            count,
            reason,
        };

        if !start.is_finite() || !stop.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if start <= 0.0 || stop <= 0.0 {
            return Err(invalid("bounds must be positive"));
        }
        if start >= stop {
            return Err(invalid("start must be below stop"));
        }
        if count < 2 {
            return Err(invalid("at least two points are required"));
        }
        if !log_grid(start, stop, count).windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid("range too narrow for the point count"));
        }

        Ok(Self { start, stop, count })
    }

    /// Sweep covering `decades_below` decades under `center` and
    /// `decades_above` decades over it.
    pub fn around(center: f64, decades_below: f64, decades_above: f64, count: usize) -> Result<Self> {
        Self::new(
            center * 10f64.powf(-decades_below),
            center * 10f64.powf(decades_above),
            count,
        )
    }

    /// Default grid for a filter.
    ///
    /// RC filters sweep two decades either side of ωc with 2000 points.
    /// Band-pass sweeps three decades either side of ω0 (never starting below
    /// 0.01 rad/s) with 4000 points; the notch sweeps two decades with 4000.
    pub fn for_spec(spec: &FilterSpec) -> Result<Self> {
        match spec.kind() {
            FilterKind::LowPass | FilterKind::HighPass => {
                Self::around(1.0 / spec.time_constant(), 2.0, 2.0, 2000)
            }
            FilterKind::BandPass | FilterKind::Notch => {
                let l = spec.inductance().ok_or_else(|| {
                    EngineError::invalid_spec("inductance", format!("is required for {} filters", spec.kind()))
                })?;
                let w0 = 1.0 / (l * spec.capacitance()).sqrt();
                if spec.kind() == FilterKind::BandPass {
                    Self::new((w0 * 1e-3).max(1e-2), w0 * 1e3, 4000)
                } else {
                    Self::around(w0, 2.0, 2.0, 4000)
                }
            }
        }
    }

    /// First frequency (rad/s).
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Last frequency (rad/s).
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Number of points.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Generate the grid.
    ///
    /// Points are uniform in log10(ω); the endpoints are exactly `start` and
    /// `stop`.
    pub fn omegas(&self) -> Vec<f64> {
        log_grid(self.start, self.stop, self.count)
    }
}

fn log_grid(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let log_start = start.log10();
    let step = (stop.log10() - log_start) / (count - 1) as f64;

    let mut omegas: Vec<f64> = (0..count)
        .map(|i| 10f64.powf(log_start + step * i as f64))
        .collect();
    omegas[0] = start;
    omegas[count - 1] = stop;
    omegas
}
