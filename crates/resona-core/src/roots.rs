//! Bracketed scalar root finding.
//!
//! Bisection on a sign-changing bracket. When both endpoints are positive the
//! bracket is split at its geometric mean, so convergence is uniform in
//! relative terms across many decades of frequency.

use crate::error::{EngineError, Result};

/// Convergence settings for [`find_root`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootOptions {
    /// Stop once (upper - lower) ≤ relative_tolerance · |upper|.
    pub relative_tolerance: f64,
    /// Hard iteration budget.
    pub max_iterations: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            relative_tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

/// Find x in `[lower, upper]` with f(x) = 0.
///
/// # Errors
///
/// `UnbracketedRoot` if f(lower) and f(upper) have the same sign (or either is
/// NaN); `NotConverged` if the budget runs out before the tolerance is met.
pub fn find_root<F>(mut f: F, lower: f64, upper: f64, options: &RootOptions) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    let (mut lo, mut hi) = if lower <= upper {
        (lower, upper)
    } else {
        (upper, lower)
    };

    let mut f_lo = f(lo)?;
    let f_hi = f(hi)?;

    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.is_nan() || f_hi.is_nan() || f_lo.signum() == f_hi.signum() {
        return Err(EngineError::UnbracketedRoot {
            lower: lo,
            upper: hi,
            f_lower: f_lo,
            f_upper: f_hi,
        });
    }

    let geometric = lo > 0.0;

    for _ in 0..options.max_iterations {
        if hi - lo <= options.relative_tolerance * hi.abs() {
            #[cfg(feature = "tracing")]
            tracing::debug!(root = 0.5 * (lo + hi), "root bracket converged");
            return Ok(0.5 * (lo + hi));
        }

        let mid = if geometric {
            (lo * hi).sqrt()
        } else {
            0.5 * (lo + hi)
        };
        let f_mid = f(mid)?;

        if f_mid == 0.0 {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Err(EngineError::NotConverged {
        iterations: options.max_iterations,
        lower: lo,
        upper: hi,
    })
}
