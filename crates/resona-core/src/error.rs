//! Error types for the analysis engine.

use rustfft::num_complex::Complex;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while building or analyzing a filter.
///
/// Every variant carries the offending values so callers can report the
/// problem without re-deriving it. The engine never clamps, swaps or retries
/// to make an error go away.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A component value is missing or non-positive for the requested topology.
    #[error("invalid filter spec: {component} {reason}")]
    InvalidSpec {
        /// Component name (`resistance`, `inductance`, `capacitance`).
        component: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Sweep bounds are non-positive, inverted, or the point count is too small.
    #[error("invalid frequency range [{start}, {stop}] with {count} points: {reason}")]
    InvalidRange {
        /// Requested start frequency (rad/s).
        start: f64,
        /// Requested stop frequency (rad/s).
        stop: f64,
        /// Requested number of points.
        count: usize,
        /// Violated constraint.
        reason: &'static str,
    },

    /// Coefficient sequences do not describe a usable rational function.
    #[error("invalid polynomial: {0}")]
    InvalidPolynomial(String),

    /// The transfer function is singular at the query point.
    #[error("degenerate system: denominator vanishes at s = {point}")]
    DegenerateSystem {
        /// Complex frequency where D(s) = 0.
        point: Complex<f64>,
    },

    /// No sign change was found between the bracket endpoints.
    #[error(
        "no root bracketed in [{lower}, {upper}]: f(lower) = {f_lower}, f(upper) = {f_upper}"
    )]
    UnbracketedRoot {
        /// Lower bracket endpoint.
        lower: f64,
        /// Upper bracket endpoint.
        upper: f64,
        /// Function value at the lower endpoint.
        f_lower: f64,
        /// Function value at the upper endpoint.
        f_upper: f64,
    },

    /// The root finder exhausted its iteration budget.
    #[error("root finder did not converge after {iterations} iterations (bracket [{lower}, {upper}])")]
    NotConverged {
        /// Iterations performed.
        iterations: usize,
        /// Final lower bracket endpoint.
        lower: f64,
        /// Final upper bracket endpoint.
        upper: f64,
    },

    /// An ordering or consistency invariant was broken.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Time-domain input is malformed (length mismatch, non-monotonic time).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Two independent closed-form derivations disagree beyond tolerance.
    #[error(
        "{quantity}: closed form gives {primary}, alternative derivation gives {alternative} (relative error {relative_error:.3e})"
    )]
    DerivationInconsistency {
        /// Quantity being cross-checked.
        quantity: &'static str,
        /// Value from the primary derivation.
        primary: f64,
        /// Value from the alternative derivation.
        alternative: f64,
        /// |primary - alternative| / |primary|.
        relative_error: f64,
    },
}

impl EngineError {
    /// Create an invalid spec error.
    pub fn invalid_spec(component: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidSpec {
            component,
            reason: reason.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput(reason.into())
    }

    /// Create an invariant violation error.
    pub fn invariant(reason: impl Into<String>) -> Self {
        EngineError::InvariantViolation(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_spec_display() {
        let err = EngineError::invalid_spec("inductance", "is required for band-pass filters");
        assert_eq!(
            err.to_string(),
            "invalid filter spec: inductance is required for band-pass filters"
        );
    }

    #[test]
    fn invalid_range_display_names_bounds() {
        let err = EngineError::InvalidRange {
            start: 10.0,
            stop: 1.0,
            count: 100,
            reason: "start must be below stop",
        };
        let msg = err.to_string();
        assert!(msg.contains("[10, 1]"), "got: {msg}");
        assert!(msg.contains("start must be below stop"), "got: {msg}");
    }

    #[test]
    fn degenerate_system_display_shows_point() {
        let err = EngineError::DegenerateSystem {
            point: Complex::new(0.0, 1000.0),
        };
        assert!(err.to_string().contains("1000"), "got: {err}");
    }

    #[test]
    fn unbracketed_root_display() {
        let err = EngineError::UnbracketedRoot {
            lower: 1.0,
            upper: 2.0,
            f_lower: 0.5,
            f_upper: 0.25,
        };
        let msg = err.to_string();
        assert!(msg.contains("f(lower) = 0.5"), "got: {msg}");
    }

    #[test]
    fn derivation_inconsistency_display() {
        let err = EngineError::DerivationInconsistency {
            quantity: "bandwidth",
            primary: 100.0,
            alternative: 101.0,
            relative_error: 0.01,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("bandwidth:"), "got: {msg}");
        assert!(msg.contains("1.000e-2"), "got: {msg}");
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            EngineError::invalid_input("x"),
            EngineError::InvalidInput("x".to_string())
        );
        assert_ne!(EngineError::invariant("a"), EngineError::invariant("b"));
    }
}
