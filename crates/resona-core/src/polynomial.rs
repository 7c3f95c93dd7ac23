//! Rational transfer functions in the Laplace variable.
//!
//! A [`PolynomialRatio`] stores H(s) = N(s) / D(s) as two coefficient
//! sequences ordered highest degree first, the same layout the circuit
//! equations are written in:
//!
//! ```text
//! H(s) = (b0·s^m + b1·s^(m-1) + ... + bm) / (a0·s^n + a1·s^(n-1) + ... + an)
//! ```
//!
//! Evaluation uses Horner's method, one complex multiply-add per coefficient.
//!
//! # Invariants
//!
//! - Every coefficient is finite
//! - The denominator is not the zero polynomial and its leading coefficient is nonzero
//! - degree(N) ≤ degree(D) (strictly proper or bi-proper)

use core::fmt;

use nalgebra::DMatrix;
use rustfft::num_complex::Complex;

use crate::error::{EngineError, Result};

/// Rational function N(s)/D(s) with real coefficients, highest degree first.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialRatio {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
}

impl PolynomialRatio {
    /// Build a rational function from numerator and denominator coefficients.
    ///
    /// Leading zeros are stripped from both sequences. A numerator of all
    /// zeros is kept as the zero polynomial.
    ///
    /// # Errors
    ///
    /// `InvalidPolynomial` if either sequence is empty, contains a non-finite
    /// value, the denominator is all zeros, or the numerator degree exceeds the
    /// denominator degree.
    pub fn new(numerator: impl Into<Vec<f64>>, denominator: impl Into<Vec<f64>>) -> Result<Self> {
        let numerator = numerator.into();
        let denominator = denominator.into();

        if denominator.is_empty() {
            return Err(EngineError::InvalidPolynomial(
                "denominator has no coefficients".to_string(),
            ));
        }
        if numerator.is_empty() {
            return Err(EngineError::InvalidPolynomial(
                "numerator has no coefficients".to_string(),
            ));
        }
        if let Some(c) = numerator
            .iter()
            .chain(denominator.iter())
            .find(|c| !c.is_finite())
        {
            return Err(EngineError::InvalidPolynomial(format!(
                "non-finite coefficient {c}"
            )));
        }

        let denominator = strip_leading_zeros(denominator);
        if denominator.is_empty() {
            return Err(EngineError::InvalidPolynomial(
                "denominator is the zero polynomial".to_string(),
            ));
        }

        let mut numerator = strip_leading_zeros(numerator);
        if numerator.is_empty() {
            numerator.push(0.0);
        }

        if numerator.len() > denominator.len() {
            return Err(EngineError::InvalidPolynomial(format!(
                "numerator degree {} exceeds denominator degree {}",
                numerator.len() - 1,
                denominator.len() - 1
            )));
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Numerator coefficients, highest degree first.
    pub fn numerator(&self) -> &[f64] {
        &self.numerator
    }

    /// Denominator coefficients, highest degree first.
    pub fn denominator(&self) -> &[f64] {
        &self.denominator
    }

    /// Degree of the denominator (the system order).
    pub fn degree(&self) -> usize {
        self.denominator.len() - 1
    }

    /// True when degree(N) < degree(D).
    pub fn is_strictly_proper(&self) -> bool {
        self.numerator.len() < self.denominator.len()
    }

    /// Evaluate H(s) at a complex point.
    ///
    /// # Errors
    ///
    /// `DegenerateSystem` if D(s) is exactly zero (a pole on the query point).
    pub fn evaluate(&self, s: Complex<f64>) -> Result<Complex<f64>> {
        let d = horner(&self.denominator, s);
        if d.re == 0.0 && d.im == 0.0 {
            return Err(EngineError::DegenerateSystem { point: s });
        }
        Ok(horner(&self.numerator, s) / d)
    }

    /// Evaluate H(jω).
    pub fn evaluate_at_omega(&self, omega: f64) -> Result<Complex<f64>> {
        self.evaluate(Complex::new(0.0, omega))
    }

    /// |H(jω)|.
    pub fn magnitude_at(&self, omega: f64) -> Result<f64> {
        self.evaluate_at_omega(omega).map(|h| h.norm())
    }

    /// |H(0)|, the gain for a constant input.
    pub fn dc_gain(&self) -> Result<f64> {
        self.magnitude_at(0.0)
    }

    /// lim |H(jω)| as ω → ∞.
    ///
    /// Zero for strictly proper systems, |b0/a0| for bi-proper ones.
    pub fn high_frequency_gain(&self) -> f64 {
        if self.is_strictly_proper() {
            0.0
        } else {
            (self.numerator[0] / self.denominator[0]).abs()
        }
    }

    /// Copy with the denominator scaled to be monic (a0 = 1).
    pub fn normalized(&self) -> Self {
        let a0 = self.denominator[0];
        Self {
            numerator: self.numerator.iter().map(|c| c / a0).collect(),
            denominator: self.denominator.iter().map(|c| c / a0).collect(),
        }
    }

    /// Roots of the denominator.
    pub fn poles(&self) -> Vec<Complex<f64>> {
        polynomial_roots(&self.denominator)
    }

    /// Roots of the numerator. Empty for a constant or zero numerator.
    pub fn zeros(&self) -> Vec<Complex<f64>> {
        polynomial_roots(&self.numerator)
    }
}

impl fmt::Display for PolynomialRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) / ({})",
            format_polynomial(&self.numerator),
            format_polynomial(&self.denominator)
        )
    }
}

/// Evaluate a real-coefficient polynomial at a complex point (Horner's method).
pub fn horner(coeffs: &[f64], s: Complex<f64>) -> Complex<f64> {
    coeffs
        .iter()
        .fold(Complex::new(0.0, 0.0), |acc, &c| acc * s + c)
}

/// Roots of a real polynomial, highest degree first.
///
/// Degrees 1 and 2 use closed forms (the quadratic uses the cancellation-free
/// variant). Higher degrees take the eigenvalues of the companion matrix.
pub fn polynomial_roots(coeffs: &[f64]) -> Vec<Complex<f64>> {
    let start = coeffs.iter().position(|&c| c != 0.0);
    let Some(start) = start else {
        return Vec::new();
    };
    let coeffs = &coeffs[start..];

    match coeffs.len() {
        0 | 1 => Vec::new(),
        2 => vec![Complex::new(-coeffs[1] / coeffs[0], 0.0)],
        3 => quadratic_roots(coeffs[0], coeffs[1], coeffs[2]),
        _ => companion_eigenvalues(coeffs),
    }
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<Complex<f64>> {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a);
        return vec![Complex::new(re, im), Complex::new(re, -im)];
    }

    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        // b = 0 and c = 0: double root at the origin
        return vec![Complex::new(0.0, 0.0), Complex::new(0.0, 0.0)];
    }
    vec![Complex::new(q / a, 0.0), Complex::new(c / q, 0.0)]
}

/// Eigenvalues of the companion matrix of a polynomial of degree ≥ 3.
fn companion_eigenvalues(coeffs: &[f64]) -> Vec<Complex<f64>> {
    let a0 = coeffs[0];
    let degree = coeffs.len() - 1;
    let companion = DMatrix::from_fn(degree, degree, |i, j| {
        if i == 0 {
            -coeffs[j + 1] / a0
        } else if i == j + 1 {
            1.0
        } else {
            0.0
        }
    });
    companion.complex_eigenvalues().iter().copied().collect()
}

fn strip_leading_zeros(mut coeffs: Vec<f64>) -> Vec<f64> {
    let first = coeffs.iter().position(|&c| c != 0.0).unwrap_or(coeffs.len());
    coeffs.drain(..first);
    coeffs
}

/// Render coefficients as `a·s^2 + b·s + c`, skipping zero terms.
pub fn format_polynomial(coeffs: &[f64]) -> String {
    let degree = coeffs.len().saturating_sub(1);
    let mut out = String::new();

    for (i, &c) in coeffs.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        let power = degree - i;
        let magnitude = c.abs();

        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
        }

        match power {
            0 => out.push_str(&format!("{magnitude}")),
            1 if magnitude == 1.0 => out.push('s'),
            1 => out.push_str(&format!("{magnitude}·s")),
            _ if magnitude == 1.0 => out.push_str(&format!("s^{power}")),
            _ => out.push_str(&format!("{magnitude}·s^{power}")),
        }
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}
