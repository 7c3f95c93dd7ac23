//! One-call analysis of a filter.
//!
//! [`FilterAnalysis`] chains topology → frequency response → characteristic
//! frequencies → step response for one [`FilterSpec`].
//!
//! ```rust
//! use resona_core::{FilterAnalysis, FilterSpec};
//!
//! let spec = FilterSpec::band_pass(100.0, 10e-3, 1e-6)?;
//! let report = FilterAnalysis::new().run(&spec)?;
//! assert!((report.characteristics.omega_0 - 1e4).abs() < 1e-6);
//! # Ok::<(), resona_core::EngineError>(())
//! ```

use crate::characteristic::{CharacteristicFrequencies, CharacteristicSolver};
use crate::error::Result;
use crate::polynomial::PolynomialRatio;
use crate::response::FrequencyResponse;
use crate::sweep::FrequencySweep;
use crate::topology::FilterSpec;
use crate::transient::{TimeDomainSimulator, TimeSeries};

/// Everything derived from one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Analyzed filter.
    pub spec: FilterSpec,
    /// H(s).
    pub transfer_function: PolynomialRatio,
    /// Bode sweep.
    pub response: FrequencyResponse,
    /// ω0, cutoffs, bandwidth and Q.
    pub characteristics: CharacteristicFrequencies,
    /// Unit step response.
    pub step: TimeSeries,
}

/// Analysis settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterAnalysis {
    solver: CharacteristicSolver,
    sweep: Option<FrequencySweep>,
    step_points: usize,
    step_time_base: Option<Vec<f64>>,
}

impl Default for FilterAnalysis {
    fn default() -> Self {
        Self {
            solver: CharacteristicSolver::default(),
            sweep: None,
            step_points: 100,
            step_time_base: None,
        }
    }
}

impl FilterAnalysis {
    /// Default settings: automatic strategy, per-topology sweep, 100-point
    /// step over seven time constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `solver` for the characteristic frequencies.
    pub fn with_solver(mut self, solver: CharacteristicSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Sweep over `sweep` instead of the topology default.
    pub fn with_sweep(mut self, sweep: FrequencySweep) -> Self {
        self.sweep = Some(sweep);
        self
    }

    /// Number of points on the default step time base.
    pub fn with_step_points(mut self, points: usize) -> Self {
        self.step_points = points;
        self
    }

    /// Simulate the step on `t` instead of the default time base.
    pub fn with_step_time_base(mut self, t: Vec<f64>) -> Self {
        self.step_time_base = Some(t);
        self
    }

    /// Run every stage for `spec`.
    pub fn run(&self, spec: &FilterSpec) -> Result<AnalysisReport> {
        let transfer_function = spec.transfer_function()?;

        let sweep = match self.sweep {
            Some(sweep) => sweep,
            None => FrequencySweep::for_spec(spec)?,
        };
        let response = FrequencyResponse::evaluate(&transfer_function, &sweep)?;
        let characteristics = self.solver.solve_with(spec, &transfer_function)?;

        let simulator = TimeDomainSimulator::new(&transfer_function);
        let step = match &self.step_time_base {
            Some(t) => simulator.step_response(t)?,
            None => simulator.step_response(&simulator.default_time_base(self.step_points)?)?,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            kind = %spec.kind(),
            omega_0 = characteristics.omega_0,
            diagnostics = characteristics.diagnostics.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            spec: *spec,
            transfer_function,
            response,
            characteristics,
            step,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristic::{Cutoffs, SolverStrategy};
    use crate::response::PeakPosition;

    #[test]
    fn band_pass_reference_report() {
        let spec = FilterSpec::band_pass(100.0, 10e-3, 1e-6).unwrap();
        let report = FilterAnalysis::new().run(&spec).unwrap();

        assert_eq!(report.response.len(), 4000);
        assert_eq!(report.response.peak.position, PeakPosition::Interior);
        assert!((report.response.peak.omega - 1e4).abs() / 1e4 < 5e-3);
        assert_eq!(report.step.len(), 100);
        assert!(report.characteristics.is_consistent());
    }

    #[test]
    fn custom_sweep_and_time_base() {
        let spec = FilterSpec::low_pass(1000.0, 1e-6).unwrap();
        let report = FilterAnalysis::new()
            .with_solver(CharacteristicSolver::new(SolverStrategy::CrossChecked))
            .with_sweep(FrequencySweep::new(1.0, 1e6, 61).unwrap())
            .with_step_time_base(vec![0.0, 1e-3, 5e-3])
            .run(&spec)
            .unwrap();

        assert_eq!(report.response.len(), 61);
        assert_eq!(report.step.t(), &[0.0, 1e-3, 5e-3]);
        assert!(matches!(report.characteristics.cutoffs, Cutoffs::Single(_)));
        assert_eq!(report.characteristics.strategy, SolverStrategy::CrossChecked);
    }

    #[test]
    fn bad_time_base_propagates() {
        let spec = FilterSpec::low_pass(1000.0, 1e-6).unwrap();
        assert!(
            FilterAnalysis::new()
                .with_step_points(1)
                .run(&spec)
                .is_err()
        );
    }
}
