//! State-space realization and exact per-interval discretization.
//!
//! A proper transfer function
//!
//! ```text
//!        b0·sⁿ + b1·sⁿ⁻¹ + … + bn
//! H(s) = ------------------------
//!         sⁿ + a1·sⁿ⁻¹ + … + an
//! ```
//!
//! is realized in controllable canonical form: `A` has `−a1 … −an` on its
//! first row and ones on the subdiagonal, `B = e1`, `Cᵢ = bᵢ₊₁ − b0·aᵢ₊₁` and
//! `D = b0`.
//!
//! Discretization assumes the input varies linearly across each interval
//! (first-order hold). With the augmented matrix
//!
//! ```text
//!     | A·dt  B·dt  0 |
//! M = |  0     0    1 |
//!     |  0     0    0 |
//! ```
//!
//! `E = exp(M)` gives `Ad = E[..n, ..n]`, `Bd1 = E[..n, n+1]` and
//! `Bd0 = E[..n, n] − Bd1`, so that `x[k+1] = Ad·x[k] + Bd0·u[k] + Bd1·u[k+1]`
//! holds exactly for piecewise-linear inputs regardless of stiffness.

use nalgebra::{DMatrix, DVector};

use crate::error::{EngineError, Result};
use crate::polynomial::PolynomialRatio;

/// Continuous-time single-input single-output realization (A, B, C, D).
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    a: DMatrix<f64>,
    b: DVector<f64>,
    c: DVector<f64>,
    d: f64,
}

impl StateSpace {
    /// Controllable canonical realization of `tf`.
    ///
    /// A degree-0 denominator gives an order-0 system (pure gain `D`).
    pub fn from_transfer_function(tf: &PolynomialRatio) -> Self {
        let monic = tf.normalized();
        let den = monic.denominator();
        let n = den.len() - 1;

        let mut num = vec![0.0; n + 1 - monic.numerator().len()];
        num.extend_from_slice(monic.numerator());

        let a = DMatrix::from_fn(n, n, |i, j| {
            if i == 0 {
                -den[j + 1]
            } else if i == j + 1 {
                1.0
            } else {
                0.0
            }
        });
        let b = DVector::from_fn(n, |i, _| if i == 0 { 1.0 } else { 0.0 });

        let d = num[0];
        let c = DVector::from_fn(n, |i, _| num[i + 1] - d * den[i + 1]);

        Self { a, b, c, d }
    }

    /// Number of states.
    pub fn order(&self) -> usize {
        self.b.len()
    }

    /// State matrix.
    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// Input vector.
    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    /// Output vector.
    pub fn c(&self) -> &DVector<f64> {
        &self.c
    }

    /// Feedthrough.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// y = C·x + D·u.
    pub fn output(&self, x: &DVector<f64>, u: f64) -> f64 {
        self.c.dot(x) + self.d * u
    }

    /// Exact first-order-hold discretization for step `dt`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `dt` is finite and positive and `A·dt` has only
    /// finite entries.
    pub fn discretize(&self, dt: f64) -> Result<Discretized> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EngineError::invalid_input(format!(
                "time step must be finite and positive, got {dt}"
            )));
        }

        let n = self.order();
        let mut m = DMatrix::zeros(n + 2, n + 2);
        m.view_mut((0, 0), (n, n)).copy_from(&(&self.a * dt));
        m.view_mut((0, n), (n, 1)).copy_from(&(&self.b * dt));
        m[(n, n + 1)] = 1.0;

        if m.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::invalid_input(format!(
                "state matrix scaled by dt = {dt} has non-finite entries"
            )));
        }

        let e = m.exp();
        let ad = e.view((0, 0), (n, n)).into_owned();
        let bd1 = DVector::from_fn(n, |i, _| e[(i, n + 1)]);
        let bd0 = DVector::from_fn(n, |i, _| e[(i, n)] - e[(i, n + 1)]);

        Ok(Discretized { dt, ad, bd0, bd1 })
    }
}

/// Discrete update for one interval length.
#[derive(Debug, Clone, PartialEq)]
pub struct Discretized {
    dt: f64,
    ad: DMatrix<f64>,
    bd0: DVector<f64>,
    bd1: DVector<f64>,
}

impl Discretized {
    /// Interval length this update was built for.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Whether this update can be reused for an interval of length `dt`.
    pub fn matches(&self, dt: f64) -> bool {
        (dt - self.dt).abs() <= 1e-9 * self.dt
    }

    /// Advance `x` across one interval with input `u0` at its start and
    /// `u1` at its end.
    pub fn advance(&self, x: &DVector<f64>, u0: f64, u1: f64) -> DVector<f64> {
        &self.ad * x + &self.bd0 * u0 + &self.bd1 * u1
    }
}
