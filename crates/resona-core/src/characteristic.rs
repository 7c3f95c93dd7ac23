//! Characteristic frequencies: resonance, cutoffs, bandwidth and Q.
//!
//! Two derivations are available for the half-power (−3 dB) frequencies:
//!
//! - **Closed form** from the component values. For the series RLC circuits
//!   the cutoffs are the positive roots of ω² ∓ (R/L)·ω − 1/(LC) = 0:
//!
//!   ```text
//!   ωc1,2 = (R / 2L) · (√(1 + 4L / (R²C)) ∓ 1)
//!   ```
//!
//! - **Numeric** by bisection on |H(jω)| − H_ref/√2, one bracket below and
//!   one above ω0 (or around ωc for RC filters). The magnitude is monotonic on
//!   each side, so a sign change is guaranteed once the bracket is wide enough;
//!   brackets widen one decade at a time up to a fixed limit.
//!
//! Bandwidth and Q always come from the component values (R/L and ω0·L/R).
//! The numeric path only replaces the cutoffs, and records a [`Diagnostic`]
//! when their spacing disagrees with R/L.
//!
//! [`SolverStrategy::Auto`] uses the closed form for RC and band-pass filters
//! and the numeric path for the notch. [`SolverStrategy::CrossChecked`] runs
//! both and records any disagreement as a [`Diagnostic`].

use core::f64::consts::SQRT_2;
use core::fmt;

use crate::error::{EngineError, Result};
use crate::polynomial::PolynomialRatio;
use crate::roots::{RootOptions, find_root};
use crate::topology::{FilterKind, FilterSpec};

/// How half-power frequencies are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverStrategy {
    /// Closed form for low-pass, high-pass and band-pass; numeric for notch.
    #[default]
    Auto,
    /// Closed-form circuit formulas only.
    ClosedForm,
    /// Bracketed root finding on |H(jω)|.
    Numeric,
    /// Closed form, verified against the numeric path.
    CrossChecked,
}

impl SolverStrategy {
    /// Resolve [`SolverStrategy::Auto`] for a topology.
    pub fn resolve(self, kind: FilterKind) -> Self {
        match (self, kind) {
            (SolverStrategy::Auto, FilterKind::Notch) => SolverStrategy::Numeric,
            (SolverStrategy::Auto, _) => SolverStrategy::ClosedForm,
            (other, _) => other,
        }
    }

    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            SolverStrategy::Auto => "auto",
            SolverStrategy::ClosedForm => "closed-form",
            SolverStrategy::Numeric => "numeric",
            SolverStrategy::CrossChecked => "cross-checked",
        }
    }
}

impl fmt::Display for SolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Half-power frequencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoffs {
    /// RC filters: one cutoff ωc (rad/s).
    Single(f64),
    /// Band-pass and notch: ωc1 < ω0 < ωc2 (rad/s).
    Band {
        /// Lower half-power frequency ωc1.
        lower: f64,
        /// Upper half-power frequency ωc2.
        upper: f64,
    },
}

impl Cutoffs {
    /// Cutoffs in ascending order.
    pub fn to_vec(&self) -> Vec<f64> {
        match *self {
            Cutoffs::Single(w) => vec![w],
            Cutoffs::Band { lower, upper } => vec![lower, upper],
        }
    }
}

/// Two derivations of the same quantity that disagree beyond tolerance.
///
/// Diagnostics do not stop the analysis; the primary value is reported and the
/// alternative is kept for inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostic {
    /// Quantity being compared.
    pub quantity: &'static str,
    /// Value reported in the result.
    pub primary: f64,
    /// Value from the independent derivation.
    pub alternative: f64,
    /// |primary − alternative| / |primary|.
    pub relative_error: f64,
}

impl Diagnostic {
    /// Convert to the matching error variant.
    pub fn to_error(&self) -> EngineError {
        EngineError::DerivationInconsistency {
            quantity: self.quantity,
            primary: self.primary,
            alternative: self.alternative,
            relative_error: self.relative_error,
        }
    }
}

/// Scalar metrics of one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicFrequencies {
    /// Topology the values were derived for.
    pub kind: FilterKind,
    /// Resonance ω0 for band-pass/notch, cutoff ωc for RC filters (rad/s).
    pub omega_0: f64,
    /// Half-power frequencies.
    pub cutoffs: Cutoffs,
    /// Q = ω0 / bandwidth; band-pass and notch only.
    pub quality_factor: Option<f64>,
    /// −3 dB bandwidth (rad/s). For low-pass this is the pass band 0…ωc;
    /// absent for high-pass, whose pass band is unbounded.
    pub bandwidth: Option<f64>,
    /// Strategy that produced the cutoffs (never `Auto`).
    pub strategy: SolverStrategy,
    /// Disagreements found between independent derivations.
    pub diagnostics: Vec<Diagnostic>,
}

impl CharacteristicFrequencies {
    /// Lower cutoff ωc1 for two-sided filters.
    pub fn lower_cutoff(&self) -> Option<f64> {
        match self.cutoffs {
            Cutoffs::Band { lower, .. } => Some(lower),
            Cutoffs::Single(_) => None,
        }
    }

    /// Upper cutoff ωc2 for two-sided filters.
    pub fn upper_cutoff(&self) -> Option<f64> {
        match self.cutoffs {
            Cutoffs::Band { upper, .. } => Some(upper),
            Cutoffs::Single(_) => None,
        }
    }

    /// True when no derivation disagreed.
    pub fn is_consistent(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Fail on the first recorded diagnostic.
    pub fn ensure_consistent(&self) -> Result<()> {
        match self.diagnostics.first() {
            Some(d) => Err(d.to_error()),
            None => Ok(()),
        }
    }
}

/// Extracts [`CharacteristicFrequencies`] from a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicSolver {
    strategy: SolverStrategy,
    root_options: RootOptions,
    consistency_tolerance: f64,
    max_bracket_decades: u32,
}

impl Default for CharacteristicSolver {
    fn default() -> Self {
        Self {
            strategy: SolverStrategy::Auto,
            root_options: RootOptions::default(),
            consistency_tolerance: 1e-6,
            max_bracket_decades: 12,
        }
    }
}

impl CharacteristicSolver {
    /// Solver with the given strategy and default tolerances.
    pub fn new(strategy: SolverStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Replace the root-finder settings.
    pub fn with_root_options(mut self, options: RootOptions) -> Self {
        self.root_options = options;
        self
    }

    /// Relative tolerance above which derivations are flagged.
    pub fn with_consistency_tolerance(mut self, tolerance: f64) -> Self {
        self.consistency_tolerance = tolerance;
        self
    }

    /// How many decades a bracket may widen before giving up (at least 1).
    pub fn with_max_bracket_decades(mut self, decades: u32) -> Self {
        self.max_bracket_decades = decades.max(1);
        self
    }

    /// Configured strategy.
    pub fn strategy(&self) -> SolverStrategy {
        self.strategy
    }

    /// Derive the transfer function from `spec` and solve.
    pub fn solve(&self, spec: &FilterSpec) -> Result<CharacteristicFrequencies> {
        let tf = spec.transfer_function()?;
        self.solve_with(spec, &tf)
    }

    /// Solve using an already-built transfer function for `spec`.
    ///
    /// The numeric path evaluates `tf`; closed forms use the component values.
    pub fn solve_with(
        &self,
        spec: &FilterSpec,
        tf: &PolynomialRatio,
    ) -> Result<CharacteristicFrequencies> {
        let strategy = self.strategy.resolve(spec.kind());
        let closed = self.closed_form(spec)?;

        let result = match strategy {
            SolverStrategy::ClosedForm | SolverStrategy::Auto => closed,
            SolverStrategy::Numeric => {
                let cutoffs = self.numeric_cutoffs(spec.kind(), closed.omega_0, tf)?;
                let mut numeric = closed;
                if let (Some(bandwidth), Cutoffs::Band { lower, upper }) = (numeric.bandwidth, cutoffs) {
                    self.compare(&mut numeric.diagnostics, "bandwidth", bandwidth, upper - lower);
                }
                numeric.cutoffs = cutoffs;
                numeric.strategy = SolverStrategy::Numeric;
                numeric
            }
            SolverStrategy::CrossChecked => {
                let numeric = self.numeric_cutoffs(spec.kind(), closed.omega_0, tf)?;
                let mut checked = closed;
                checked.strategy = SolverStrategy::CrossChecked;
                let names: &[&'static str] = match checked.cutoffs {
                    Cutoffs::Single(_) => &["cutoff"],
                    Cutoffs::Band { .. } => &["lower cutoff", "upper cutoff"],
                };
                for ((&name, primary), alternative) in names
                    .iter()
                    .zip(checked.cutoffs.to_vec())
                    .zip(numeric.to_vec())
                {
                    self.compare(&mut checked.diagnostics, name, primary, alternative);
                }
                checked
            }
        };

        check_cutoffs(result.omega_0, &result.cutoffs)?;
        Ok(result)
    }

    fn closed_form(&self, spec: &FilterSpec) -> Result<CharacteristicFrequencies> {
        let r = spec.resistance();
        let c = spec.capacitance();

        match spec.kind() {
            FilterKind::LowPass | FilterKind::HighPass => {
                let wc = 1.0 / (r * c);
                Ok(CharacteristicFrequencies {
                    kind: spec.kind(),
                    omega_0: wc,
                    cutoffs: Cutoffs::Single(wc),
                    quality_factor: None,
                    bandwidth: (spec.kind() == FilterKind::LowPass).then_some(wc),
                    strategy: SolverStrategy::ClosedForm,
                    diagnostics: Vec::new(),
                })
            }
            FilterKind::BandPass | FilterKind::Notch => {
                let l = spec.inductance().ok_or_else(|| {
                    EngineError::invalid_spec(
                        "inductance",
                        format!("is required for {} filters", spec.kind()),
                    )
                })?;

                let w0 = 1.0 / (l * c).sqrt();
                let bandwidth = r / l;
                let q = w0 / bandwidth;

                let half = r / (2.0 * l);
                let x = 4.0 * l / (r * r * c);
                let root = (1.0 + x).sqrt();
                let upper = half * (root + 1.0);
                // √(1+x) − 1 rewritten as x / (√(1+x) + 1) to avoid cancellation at low Q
                let lower = half * x / (root + 1.0);

                let mut diagnostics = Vec::new();
                self.compare(&mut diagnostics, "bandwidth", bandwidth, upper - lower);
                self.compare(&mut diagnostics, "cutoff product", w0 * w0, lower * upper);

                Ok(CharacteristicFrequencies {
                    kind: spec.kind(),
                    omega_0: w0,
                    cutoffs: Cutoffs::Band { lower, upper },
                    quality_factor: Some(q),
                    bandwidth: Some(bandwidth),
                    strategy: SolverStrategy::ClosedForm,
                    diagnostics,
                })
            }
        }
    }

    fn numeric_cutoffs(&self, kind: FilterKind, anchor: f64, tf: &PolynomialRatio) -> Result<Cutoffs> {
        let reference = match kind {
            FilterKind::LowPass | FilterKind::Notch => tf.dc_gain()?,
            FilterKind::HighPass => tf.high_frequency_gain(),
            FilterKind::BandPass => tf.magnitude_at(anchor)?,
        };
        if !(reference.is_finite() && reference > 0.0) {
            return Err(EngineError::InvalidPolynomial(format!(
                "pass-band reference gain {reference} does not define a half-power level"
            )));
        }
        let target = reference / SQRT_2;
        let f = |w: f64| tf.magnitude_at(w).map(|m| m - target);

        if kind.is_two_sided() {
            let lower = self.solve_widening(&f, |k| (anchor / k, anchor))?;
            let upper = self.solve_widening(&f, |k| (anchor, anchor * k))?;
            Ok(Cutoffs::Band { lower, upper })
        } else {
            let wc = self.solve_widening(&f, |k| (anchor / k, anchor * k))?;
            Ok(Cutoffs::Single(wc))
        }
    }

    /// Widen `bracket(10^k)` for k = 1, 2, … until f changes sign, then bisect.
    fn solve_widening<F, B>(&self, f: &F, bracket: B) -> Result<f64>
    where
        F: Fn(f64) -> Result<f64>,
        B: Fn(f64) -> (f64, f64),
    {
        let mut last = (f64::NAN, f64::NAN, f64::NAN, f64::NAN);

        for k in 1..=self.max_bracket_decades {
            let (lo, hi) = bracket(10f64.powi(k as i32));
            let (f_lo, f_hi) = (f(lo)?, f(hi)?);

            if f_lo == 0.0 || f_hi == 0.0 || f_lo.signum() != f_hi.signum() {
                return find_root(f, lo, hi, &self.root_options);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(lo, hi, decades = k, "no sign change, widening bracket");
            last = (lo, hi, f_lo, f_hi);
        }

        Err(EngineError::UnbracketedRoot {
            lower: last.0,
            upper: last.1,
            f_lower: last.2,
            f_upper: last.3,
        })
    }

    fn compare(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
        quantity: &'static str,
        primary: f64,
        alternative: f64,
    ) {
        let relative_error = (primary - alternative).abs() / primary.abs();
        if relative_error > self.consistency_tolerance || relative_error.is_nan() {
            #[cfg(feature = "tracing")]
            tracing::debug!(quantity, primary, alternative, relative_error, "derivations disagree");
            diagnostics.push(Diagnostic {
                quantity,
                primary,
                alternative,
                relative_error,
            });
        }
    }
}

/// Enforce finite positive cutoffs and ωc1 < ω0 < ωc2.
pub fn check_cutoffs(omega_0: f64, cutoffs: &Cutoffs) -> Result<()> {
    match *cutoffs {
        Cutoffs::Single(wc) => {
            if wc.is_finite() && wc > 0.0 {
                Ok(())
            } else {
                Err(EngineError::invariant(format!(
                    "cutoff must be finite and positive, got {wc}"
                )))
            }
        }
        Cutoffs::Band { lower, upper } => {
            if lower > 0.0 && lower < omega_0 && omega_0 < upper && upper.is_finite() {
                Ok(())
            } else {
                Err(EngineError::invariant(format!(
                    "expected 0 < ωc1 < ω0 < ωc2, got ωc1 = {lower}, ω0 = {omega_0}, ωc2 = {upper}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        (a - b).abs() / b.abs()
    }

    #[test]
    fn band_pass_reference_values() {
        let spec = FilterSpec::band_pass(100.0, 10e-3, 1e-6).unwrap();
        let cf = CharacteristicSolver::default().solve(&spec).unwrap();

        assert_eq!(cf.strategy, SolverStrategy::ClosedForm);
        assert!(rel(cf.omega_0, 1e4) < 1e-12);
        assert!(rel(cf.bandwidth.unwrap(), 1e4) < 1e-12);
        assert!(rel(cf.quality_factor.unwrap(), 1.0) < 1e-12);

        let (lower, upper) = (cf.lower_cutoff().unwrap(), cf.upper_cutoff().unwrap());
        assert!(lower < cf.omega_0 && cf.omega_0 < upper);
        assert!(rel(lower * upper, 1e8) < 1e-6);
        assert!(rel(upper - lower, 1e4) < 1e-6);
        assert!(cf.is_consistent());
    }

    #[test]
    fn low_pass_cutoff_is_inverse_time_constant() {
        let spec = FilterSpec::low_pass(1000.0, 1e-6).unwrap();
        let cf = CharacteristicSolver::default().solve(&spec).unwrap();
        let Cutoffs::Single(wc) = cf.cutoffs else {
            panic!("expected a single cutoff");
        };
        assert!(rel(wc, 1000.0) < 1e-12);
        assert_eq!(cf.bandwidth, Some(wc));
        assert_eq!(cf.omega_0, wc);
        assert_eq!(cf.quality_factor, None);
        assert_eq!(cf.lower_cutoff(), None);
    }

    #[test]
    fn high_pass_has_no_bandwidth() {
        let spec = FilterSpec::high_pass(1000.0, 1e-6).unwrap();
        let cf = CharacteristicSolver::default().solve(&spec).unwrap();
        assert_eq!(cf.bandwidth, None);
    }

    #[test]
    fn numeric_matches_closed_form_for_rc() {
        for spec in [
            FilterSpec::low_pass(1000.0, 1e-6).unwrap(),
            FilterSpec::high_pass(1e5, 5.3e-9).unwrap(),
        ] {
            let cf = CharacteristicSolver::new(SolverStrategy::Numeric)
                .solve(&spec)
                .unwrap();
            let Cutoffs::Single(wc) = cf.cutoffs else {
                panic!("expected a single cutoff");
            };
            assert!(rel(wc, 1.0 / spec.time_constant()) < 1e-9, "{spec}: {wc}");
        }
    }

    #[test]
    fn notch_defaults_to_numeric_and_agrees_with_closed_form() {
        let spec = FilterSpec::notch(100.0, 1e-3, 1e-6).unwrap();
        let numeric = CharacteristicSolver::default().solve(&spec).unwrap();
        assert_eq!(numeric.strategy, SolverStrategy::Numeric);

        let closed = CharacteristicSolver::new(SolverStrategy::ClosedForm)
            .solve(&spec)
            .unwrap();
        assert!(rel(numeric.lower_cutoff().unwrap(), closed.lower_cutoff().unwrap()) < 1e-9);
        assert!(rel(numeric.upper_cutoff().unwrap(), closed.upper_cutoff().unwrap()) < 1e-9);
        assert!(rel(numeric.bandwidth.unwrap(), 1e5) < 1e-6);
    }

    #[test]
    fn very_high_q_notch_keeps_component_bandwidth() {
        // ω0 = 1e6 rad/s, R/L = 0.01 rad/s, so Q = 1e8
        let spec = FilterSpec::notch(1e-5, 1e-3, 1e-9).unwrap();
        let cf = CharacteristicSolver::default().solve(&spec).unwrap();
        assert_eq!(cf.strategy, SolverStrategy::Numeric);
        assert!(rel(cf.bandwidth.unwrap(), 1e-2) < 1e-14);
        assert!(rel(cf.quality_factor.unwrap(), 1e8) < 1e-12);

        // the bisected band is near ω0 but its spacing is only reported
        assert!(rel(cf.lower_cutoff().unwrap(), 1e6) < 1e-6);
        assert!(rel(cf.upper_cutoff().unwrap(), 1e6) < 1e-6);
        for d in &cf.diagnostics {
            assert_eq!(d.quantity, "bandwidth");
            assert_eq!(d.primary, cf.bandwidth.unwrap());
        }
    }

    #[test]
    fn numeric_band_spacing_disagreement_is_recorded() {
        let spec = FilterSpec::notch(100.0, 1e-3, 1e-6).unwrap();
        // same ω0, twice the resistance
        let tf = FilterSpec::notch(200.0, 1e-3, 1e-6)
            .unwrap()
            .transfer_function()
            .unwrap();
        let cf = CharacteristicSolver::new(SolverStrategy::Numeric)
            .solve_with(&spec, &tf)
            .unwrap();

        assert!(rel(cf.bandwidth.unwrap(), 1e5) < 1e-12);
        assert!(rel(cf.quality_factor.unwrap(), 1e-9f64.sqrt().recip() / 1e5) < 1e-12);
        assert_eq!(cf.diagnostics.len(), 1);
        let d = cf.diagnostics[0];
        assert_eq!(d.quantity, "bandwidth");
        assert!(rel(d.alternative, 2e5) < 1e-6);
        assert!(matches!(
            cf.ensure_consistent(),
            Err(EngineError::DerivationInconsistency { quantity: "bandwidth", .. })
        ));
    }

    #[test]
    fn cross_check_is_clean_for_consistent_inputs() {
        for spec in [
            FilterSpec::low_pass(220.0, 47e-9).unwrap(),
            FilterSpec::high_pass(10e3, 1e-6).unwrap(),
            FilterSpec::band_pass(10.0, 1e-3, 1e-6).unwrap(),
            FilterSpec::notch(1000.0, 50e-3, 10e-9).unwrap(),
        ] {
            let cf = CharacteristicSolver::new(SolverStrategy::CrossChecked)
                .solve(&spec)
                .unwrap();
            assert_eq!(cf.strategy, SolverStrategy::CrossChecked);
            assert!(cf.diagnostics.is_empty(), "{spec}: {:?}", cf.diagnostics);
            cf.ensure_consistent().unwrap();
        }
    }

    #[test]
    fn cross_check_flags_mismatched_transfer_function() {
        let spec = FilterSpec::low_pass(1000.0, 1e-6).unwrap();
        // transfer function of a filter twice as fast
        let tf = FilterSpec::low_pass(500.0, 1e-6)
            .unwrap()
            .transfer_function()
            .unwrap();
        let cf = CharacteristicSolver::new(SolverStrategy::CrossChecked)
            .solve_with(&spec, &tf)
            .unwrap();

        assert_eq!(cf.diagnostics.len(), 1);
        let d = cf.diagnostics[0];
        assert_eq!(d.quantity, "cutoff");
        assert!(rel(d.primary, 1000.0) < 1e-12);
        assert!(rel(d.alternative, 2000.0) < 1e-9);

        // closed-form value is reported, not an average
        assert_eq!(cf.cutoffs, Cutoffs::Single(d.primary));
        assert!(matches!(
            cf.ensure_consistent(),
            Err(EngineError::DerivationInconsistency { quantity: "cutoff", .. })
        ));
    }

    #[test]
    fn low_q_band_pass_needs_wide_brackets() {
        // Q = √(L/C) / R = 0.01, so ωc1 ≈ ω0 / 100
        let spec = FilterSpec::band_pass(100.0, 1e-4, 1e-4).unwrap();

        let narrow = CharacteristicSolver::new(SolverStrategy::Numeric).with_max_bracket_decades(1);
        assert!(matches!(
            narrow.solve(&spec),
            Err(EngineError::UnbracketedRoot { .. })
        ));

        let cf = CharacteristicSolver::new(SolverStrategy::CrossChecked)
            .solve(&spec)
            .unwrap();
        assert!(cf.is_consistent(), "{:?}", cf.diagnostics);
        assert!(rel(cf.lower_cutoff().unwrap() * cf.upper_cutoff().unwrap(), 1e8) < 1e-6);
    }

    #[test]
    fn high_q_band_pass_stays_consistent() {
        // ω0 = 1000 rad/s, R/L = 1 rad/s, so Q = 1000
        let spec = FilterSpec::band_pass(1.0, 1.0, 1e-6).unwrap();
        let cf = CharacteristicSolver::new(SolverStrategy::CrossChecked)
            .solve(&spec)
            .unwrap();
        assert!(cf.is_consistent(), "{:?}", cf.diagnostics);
        assert!(rel(cf.quality_factor.unwrap(), 1000.0) < 1e-9);
    }

    #[test]
    fn auto_resolution_per_topology() {
        assert_eq!(
            SolverStrategy::Auto.resolve(FilterKind::BandPass),
            SolverStrategy::ClosedForm
        );
        assert_eq!(
            SolverStrategy::Auto.resolve(FilterKind::Notch),
            SolverStrategy::Numeric
        );
        assert_eq!(
            SolverStrategy::CrossChecked.resolve(FilterKind::Notch),
            SolverStrategy::CrossChecked
        );
    }

    #[test]
    fn misordered_band_is_an_invariant_violation() {
        let bad = Cutoffs::Band {
            lower: 200.0,
            upper: 100.0,
        };
        assert!(matches!(
            check_cutoffs(150.0, &bad),
            Err(EngineError::InvariantViolation(_))
        ));

        let touching = Cutoffs::Band {
            lower: 150.0,
            upper: 300.0,
        };
        assert!(check_cutoffs(150.0, &touching).is_err());
        assert!(check_cutoffs(150.0, &Cutoffs::Band { lower: 100.0, upper: 200.0 }).is_ok());
        assert!(check_cutoffs(1.0, &Cutoffs::Single(f64::NAN)).is_err());
    }

    #[test]
    fn zero_reference_gain_is_rejected() {
        let spec = FilterSpec::low_pass(1000.0, 1e-6).unwrap();
        let silent = PolynomialRatio::new(vec![0.0], vec![1e-3, 1.0]).unwrap();
        let err = CharacteristicSolver::new(SolverStrategy::Numeric)
            .solve_with(&spec, &silent)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPolynomial(_)));
    }
}
