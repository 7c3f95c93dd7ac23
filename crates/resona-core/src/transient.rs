//! Time-domain simulation.
//!
//! [`TimeDomainSimulator`] realizes H(s) in state space and advances it one
//! sample interval at a time with an exact first-order-hold update (see
//! [`crate::state_space`]). The caller's time base is the step grid:
//!
//! - there is no internal step-size control, and none is needed, because each
//!   interval is integrated exactly whatever the stiffness;
//! - non-uniform grids are fine; a new update is built whenever the interval
//!   length changes;
//! - the system starts from rest at `t[0]`.

use nalgebra::DVector;
use rustfft::num_complex::Complex;

use crate::error::{EngineError, Result};
use crate::polynomial::PolynomialRatio;
use crate::signal::{linspace, unit_step};
use crate::state_space::{Discretized, StateSpace};

/// Samples of a signal on a time base.
///
/// `t` is finite, non-negative and strictly increasing; `values` has the
/// same length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    t: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Validate and build a series.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on length mismatch, an empty or malformed time base, or
    /// non-finite values.
    pub fn new(t: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        check_time_base(&t)?;
        if t.len() != values.len() {
            return Err(EngineError::invalid_input(format!(
                "time base has {} samples but signal has {}",
                t.len(),
                values.len()
            )));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(EngineError::invalid_input(format!(
                "signal value {} at index {i} is not finite",
                values[i]
            )));
        }
        Ok(Self { t, values })
    }

    /// Sample instants (s).
    pub fn t(&self) -> &[f64] {
        &self.t
    }

    /// Sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Always false for a validated series.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Final sample value.
    pub fn last_value(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// `(t, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.t.iter().copied().zip(self.values.iter().copied())
    }

    /// Linear interpolation at `time`, clamped to the end samples.
    pub fn value_at(&self, time: f64) -> f64 {
        let i = self.t.partition_point(|&ti| ti < time);
        if i == 0 {
            return self.values[0];
        }
        if i == self.t.len() {
            return self.last_value();
        }
        let (t0, t1) = (self.t[i - 1], self.t[i]);
        let (v0, v1) = (self.values[i - 1], self.values[i]);
        v0 + (v1 - v0) * (time - t0) / (t1 - t0)
    }

    /// Consume into `(t, values)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.t, self.values)
    }
}

fn check_time_base(t: &[f64]) -> Result<()> {
    if t.is_empty() {
        return Err(EngineError::invalid_input("time base is empty"));
    }
    if let Some(i) = t.iter().position(|x| !x.is_finite()) {
        return Err(EngineError::invalid_input(format!(
            "time {} at index {i} is not finite",
            t[i]
        )));
    }
    if t[0] < 0.0 {
        return Err(EngineError::invalid_input(format!(
            "time base starts at {} s; times must be non-negative",
            t[0]
        )));
    }
    if let Some(i) = t.windows(2).position(|w| w[1] <= w[0]) {
        return Err(EngineError::invalid_input(format!(
            "time base is not strictly increasing at index {}: {} then {}",
            i + 1,
            t[i],
            t[i + 1]
        )));
    }
    Ok(())
}

/// Simulates the response of a transfer function to time-domain inputs.
#[derive(Debug, Clone)]
pub struct TimeDomainSimulator {
    system: StateSpace,
    poles: Vec<Complex<f64>>,
}

impl TimeDomainSimulator {
    /// Build a simulator for `tf`.
    pub fn new(tf: &PolynomialRatio) -> Self {
        Self {
            system: StateSpace::from_transfer_function(tf),
            poles: tf.poles(),
        }
    }

    /// The underlying realization.
    pub fn state_space(&self) -> &StateSpace {
        &self.system
    }

    /// Slowest time constant 1/min|Re(p)|, or 1 s when there is no decaying
    /// pole.
    pub fn dominant_time_constant(&self) -> f64 {
        let slowest = self
            .poles
            .iter()
            .map(|p| p.re.abs())
            .fold(f64::INFINITY, f64::min);
        if slowest.is_finite() && slowest > 0.0 {
            1.0 / slowest
        } else {
            1.0
        }
    }

    /// `points` samples from 0 to seven dominant time constants.
    pub fn default_time_base(&self, points: usize) -> Result<Vec<f64>> {
        linspace(0.0, 7.0 * self.dominant_time_constant(), points)
    }

    /// Response to a unit step applied at `t[0]`.
    pub fn step_response(&self, t: &[f64]) -> Result<TimeSeries> {
        self.simulate_samples(t, &unit_step(t))
    }

    /// Response to a unit impulse at `t[0]`.
    ///
    /// The impulse sets the state to `B`; any direct feedthrough term (a
    /// Dirac at `t[0]` for bi-proper systems) is not representable and is
    /// omitted.
    pub fn impulse_response(&self, t: &[f64]) -> Result<TimeSeries> {
        check_time_base(t)?;

        let mut x = self.system.b().clone();
        let mut values = Vec::with_capacity(t.len());
        values.push(self.system.output(&x, 0.0));

        let mut cache = None;
        for w in t.windows(2) {
            let step = self.update_for(&mut cache, w[1] - w[0])?;
            x = step.advance(&x, 0.0, 0.0);
            values.push(self.system.output(&x, 0.0));
        }

        TimeSeries::new(t.to_vec(), values)
    }

    /// Response to an arbitrary input, starting from rest.
    pub fn simulate(&self, input: &TimeSeries) -> Result<TimeSeries> {
        self.simulate_samples(input.t(), input.values())
    }

    /// Response to input samples `u` on time base `t`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the lengths differ or `t` is not a valid time base.
    pub fn simulate_samples(&self, t: &[f64], u: &[f64]) -> Result<TimeSeries> {
        check_time_base(t)?;
        if t.len() != u.len() {
            return Err(EngineError::invalid_input(format!(
                "time base has {} samples but input has {}",
                t.len(),
                u.len()
            )));
        }

        let mut x = DVector::zeros(self.system.order());
        let mut values = Vec::with_capacity(t.len());
        values.push(self.system.output(&x, u[0]));

        let mut cache = None;
        for k in 1..t.len() {
            let step = self.update_for(&mut cache, t[k] - t[k - 1])?;
            x = step.advance(&x, u[k - 1], u[k]);
            values.push(self.system.output(&x, u[k]));
        }

        TimeSeries::new(t.to_vec(), values)
    }

    fn update_for<'a>(
        &self,
        cache: &'a mut Option<Discretized>,
        dt: f64,
    ) -> Result<&'a Discretized> {
        let stale = cache.as_ref().is_none_or(|d| !d.matches(dt));
        if stale {
            #[cfg(feature = "tracing")]
            tracing::debug!(dt, "discretizing interval");
            *cache = Some(self.system.discretize(dt)?);
        }
        cache
            .as_ref()
            .ok_or_else(|| EngineError::invariant("discretization cache is empty"))
    }
}
