//! Filter topologies and their transfer functions.
//!
//! Each [`FilterKind`] maps component values to a [`PolynomialRatio`] through
//! the textbook circuit equation for that topology:
//!
//! | Kind      | Circuit                               | H(s)                                  |
//! |-----------|---------------------------------------|---------------------------------------|
//! | Low-pass  | series R, output across C             | 1 / (RC·s + 1)                        |
//! | High-pass | series C, output across R             | RC·s / (RC·s + 1)                     |
//! | Band-pass | series RLC, output across R           | (R/L)·s / (s² + (R/L)·s + 1/LC)       |
//! | Notch     | series R, output across the L–C branch | (s² + ω0²) / (s² + (ω0/Q)·s + ω0²)    |
//!
//! For the notch, ω0² = 1/(LC) and Q = √(L/C)/R, so ω0/Q = R/L.

use core::fmt;
use core::str::FromStr;

use crate::error::{EngineError, Result};
use crate::polynomial::PolynomialRatio;

/// Filter topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// First-order RC low-pass.
    LowPass,
    /// First-order RC high-pass.
    HighPass,
    /// Second-order series RLC band-pass.
    BandPass,
    /// Second-order series RLC band-reject.
    Notch,
}

impl FilterKind {
    /// All topologies, in display order.
    pub const ALL: [FilterKind; 4] = [
        FilterKind::LowPass,
        FilterKind::HighPass,
        FilterKind::BandPass,
        FilterKind::Notch,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::LowPass => "low-pass",
            FilterKind::HighPass => "high-pass",
            FilterKind::BandPass => "band-pass",
            FilterKind::Notch => "notch",
        }
    }

    /// Whether the topology needs an inductor.
    pub fn requires_inductance(self) -> bool {
        matches!(self, FilterKind::BandPass | FilterKind::Notch)
    }

    /// Whether the response has two half-power frequencies around ω0.
    pub fn is_two_sided(self) -> bool {
        self.requires_inductance()
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "low-pass" | "lowpass" | "lp" => Ok(FilterKind::LowPass),
            "high-pass" | "highpass" | "hp" => Ok(FilterKind::HighPass),
            "band-pass" | "bandpass" | "bp" => Ok(FilterKind::BandPass),
            "notch" | "band-reject" | "bandreject" | "band-stop" | "bandstop" | "br" => {
                Ok(FilterKind::Notch)
            }
            _ => Err(EngineError::invalid_spec(
                "kind",
                format!("'{s}' is not one of low-pass, high-pass, band-pass, notch"),
            )),
        }
    }
}

/// Validated component values for one filter.
///
/// Resistance and capacitance are always required; inductance only for
/// band-pass and notch. All present values are finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    kind: FilterKind,
    resistance: f64,
    inductance: Option<f64>,
    capacitance: f64,
}

impl FilterSpec {
    /// Validate and build a spec.
    ///
    /// # Errors
    ///
    /// `InvalidSpec` if any present value is non-finite or not positive, or if
    /// the topology needs an inductance and none is given. Values are never
    /// clamped or defaulted.
    pub fn new(
        kind: FilterKind,
        resistance: f64,
        inductance: Option<f64>,
        capacitance: f64,
    ) -> Result<Self> {
        check_positive("resistance", resistance, "Ω")?;
        check_positive("capacitance", capacitance, "F")?;
        match inductance {
            Some(l) => check_positive("inductance", l, "H")?,
            None if kind.requires_inductance() => {
                return Err(EngineError::invalid_spec(
                    "inductance",
                    format!("is required for {kind} filters"),
                ));
            }
            None => {}
        }

        Ok(Self {
            kind,
            resistance,
            inductance,
            capacitance,
        })
    }

    /// RC low-pass.
    pub fn low_pass(resistance: f64, capacitance: f64) -> Result<Self> {
        Self::new(FilterKind::LowPass, resistance, None, capacitance)
    }

    /// RC high-pass.
    pub fn high_pass(resistance: f64, capacitance: f64) -> Result<Self> {
        Self::new(FilterKind::HighPass, resistance, None, capacitance)
    }

    /// Series RLC band-pass.
    pub fn band_pass(resistance: f64, inductance: f64, capacitance: f64) -> Result<Self> {
        Self::new(FilterKind::BandPass, resistance, Some(inductance), capacitance)
    }

    /// Series RLC notch.
    pub fn notch(resistance: f64, inductance: f64, capacitance: f64) -> Result<Self> {
        Self::new(FilterKind::Notch, resistance, Some(inductance), capacitance)
    }

    /// Topology.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Inductance in henries, if present.
    pub fn inductance(&self) -> Option<f64> {
        self.inductance
    }

    /// Capacitance in farads.
    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    /// RC time constant τ = R·C in seconds.
    pub fn time_constant(&self) -> f64 {
        self.resistance * self.capacitance
    }

    /// Inductance for topologies that require one.
    fn required_inductance(&self) -> Result<f64> {
        self.inductance.ok_or_else(|| {
            EngineError::invalid_spec("inductance", format!("is required for {} filters", self.kind))
        })
    }

    /// Derive H(s) for this topology.
    ///
    /// # Errors
    ///
    /// `InvalidPolynomial` if the component values overflow the coefficient
    /// range (for example R·C = ∞).
    pub fn transfer_function(&self) -> Result<PolynomialRatio> {
        let (numerator, denominator) = match self.kind {
            FilterKind::LowPass => low_pass_coefficients(self.resistance, self.capacitance),
            FilterKind::HighPass => high_pass_coefficients(self.resistance, self.capacitance),
            FilterKind::BandPass => band_pass_coefficients(
                self.resistance,
                self.required_inductance()?,
                self.capacitance,
            ),
            FilterKind::Notch => notch_coefficients(
                self.resistance,
                self.required_inductance()?,
                self.capacitance,
            ),
        };
        PolynomialRatio::new(numerator, denominator)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (R = {} Ω", self.kind, self.resistance)?;
        if let Some(l) = self.inductance {
            write!(f, ", L = {l} H")?;
        }
        write!(f, ", C = {} F)", self.capacitance)
    }
}

fn check_positive(component: &'static str, value: f64, unit: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_spec(
            component,
            format!("must be a finite positive value, got {value} {unit}"),
        ))
    }
}

/// RC low-pass: N = [1], D = [RC, 1].
pub fn low_pass_coefficients(r: f64, c: f64) -> (Vec<f64>, Vec<f64>) {
    (vec![1.0], vec![r * c, 1.0])
}

/// RC high-pass: N = [RC, 0], D = [RC, 1].
pub fn high_pass_coefficients(r: f64, c: f64) -> (Vec<f64>, Vec<f64>) {
    (vec![r * c, 0.0], vec![r * c, 1.0])
}

/// Series RLC band-pass: N = [R/L, 0], D = [1, R/L, 1/(LC)].
pub fn band_pass_coefficients(r: f64, l: f64, c: f64) -> (Vec<f64>, Vec<f64>) {
    (vec![r / l, 0.0], vec![1.0, r / l, 1.0 / (l * c)])
}

/// Series RLC notch: N = [1, 0, ω0²], D = [1, ω0/Q, ω0²].
pub fn notch_coefficients(r: f64, l: f64, c: f64) -> (Vec<f64>, Vec<f64>) {
    let w0_sq = 1.0 / (l * c);
    let w0 = w0_sq.sqrt();
    let q = (l / c).sqrt() / r;
    (vec![1.0, 0.0, w0_sq], vec![1.0, w0 / q, w0_sq])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_pass_coefficients_match_circuit() {
        let h = FilterSpec::low_pass(1000.0, 1e-6)
            .unwrap()
            .transfer_function()
            .unwrap();
        assert_eq!(h.numerator(), &[1.0]);
        assert_eq!(h.denominator(), &[1000.0 * 1e-6, 1.0]);
    }

    #[test]
    fn high_pass_coefficients_match_circuit() {
        let h = FilterSpec::high_pass(1e5, 5.3e-9)
            .unwrap()
            .transfer_function()
            .unwrap();
        let rc = 1e5 * 5.3e-9;
        assert_eq!(h.numerator(), &[rc, 0.0]);
        assert_eq!(h.denominator(), &[rc, 1.0]);
    }

    #[test]
    fn band_pass_coefficients_match_circuit() {
        let h = FilterSpec::band_pass(100.0, 10e-3, 1e-6)
            .unwrap()
            .transfer_function()
            .unwrap();
        assert_eq!(h.numerator(), &[100.0 / 10e-3, 0.0]);
        assert_eq!(h.denominator(), &[1.0, 100.0 / 10e-3, 1.0 / (10e-3 * 1e-6)]);
    }

    #[test]
    fn notch_damping_term_equals_r_over_l() {
        let (num, den) = notch_coefficients(100.0, 1e-3, 1e-6);
        let w0_sq = 1.0 / (1e-3 * 1e-6);
        assert_eq!(num, vec![1.0, 0.0, w0_sq]);
        assert!((den[1] - 100.0 / 1e-3).abs() / (100.0 / 1e-3) < 1e-12);
        assert_eq!(den[2], w0_sq);
    }

    #[test]
    fn identical_inputs_give_identical_coefficients() {
        let a = FilterSpec::notch(47.0, 2.2e-3, 330e-9).unwrap();
        let b = FilterSpec::notch(47.0, 2.2e-3, 330e-9).unwrap();
        assert_eq!(a.transfer_function().unwrap(), b.transfer_function().unwrap());
    }

    #[test]
    fn band_pass_without_inductance_is_rejected() {
        let err = FilterSpec::new(FilterKind::BandPass, 100.0, None, 1e-6).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidSpec {
                component: "inductance",
                ..
            }
        ));
    }

    #[test]
    fn notch_without_inductance_is_rejected() {
        assert!(FilterSpec::new(FilterKind::Notch, 100.0, None, 1e-6).is_err());
    }

    #[test]
    fn non_positive_values_are_rejected() {
        for (r, l, c) in [
            (0.0, Some(1e-3), 1e-6),
            (-1.0, Some(1e-3), 1e-6),
            (100.0, Some(0.0), 1e-6),
            (100.0, Some(1e-3), -1e-6),
            (f64::NAN, Some(1e-3), 1e-6),
            (100.0, Some(f64::INFINITY), 1e-6),
        ] {
            let result = FilterSpec::new(FilterKind::BandPass, r, l, c);
            assert!(result.is_err(), "accepted R={r}, L={l:?}, C={c}");
        }
    }

    #[test]
    fn rc_filters_accept_optional_inductance() {
        let spec = FilterSpec::new(FilterKind::LowPass, 100.0, Some(1e-3), 1e-6).unwrap();
        assert_eq!(spec.inductance(), Some(1e-3));
        assert!(FilterSpec::new(FilterKind::LowPass, 100.0, Some(-1e-3), 1e-6).is_err());
    }

    #[test]
    fn overflowing_components_are_invalid_polynomials() {
        let spec = FilterSpec::low_pass(1e300, 1e300).unwrap();
        let err = spec.transfer_function().unwrap_err();
        assert!(matches!(err, EngineError::InvalidPolynomial(_)));
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("lowpass".parse::<FilterKind>().unwrap(), FilterKind::LowPass);
        assert_eq!("High-Pass".parse::<FilterKind>().unwrap(), FilterKind::HighPass);
        assert_eq!("band_pass".parse::<FilterKind>().unwrap(), FilterKind::BandPass);
        assert_eq!("band-reject".parse::<FilterKind>().unwrap(), FilterKind::Notch);
        assert!("comb".parse::<FilterKind>().is_err());
    }

    #[test]
    fn kind_round_trips_through_display() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.to_string().parse::<FilterKind>().unwrap(), kind);
        }
    }

    #[test]
    fn display_lists_components() {
        let spec = FilterSpec::band_pass(100.0, 0.01, 1e-6).unwrap();
        assert_eq!(spec.to_string(), "band-pass (R = 100 Ω, L = 0.01 H, C = 0.000001 F)");
    }
}
