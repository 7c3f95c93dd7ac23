//! Resona Core - Analysis engine for passive RC/RLC filters
//!
//! Turns component values into everything needed to understand a first- or
//! second-order passive filter:
//!
//! - [`topology`] - Filter kinds and component values → H(s)
//! - [`polynomial`] - Rational transfer functions, Horner evaluation, roots
//! - [`sweep`] - Log-spaced frequency grids
//! - [`response`] - Bode magnitude/phase, peak, group delay, crossings
//! - [`roots`] - Bracketed bisection
//! - [`characteristic`] - ω0, half-power cutoffs, bandwidth and Q
//! - [`state_space`] - Canonical realization and exact discretization
//! - [`transient`] - Step, impulse and arbitrary-input simulation
//! - [`signal`] - Time bases and multi-tone test inputs
//! - [`measure`] - FFT gain measurement of simulated tones
//! - [`analysis`] - All stages for one filter in a single call
//! - [`export`] - CSV/FRD writers and CSV signal import
//!
//! ## Example
//!
//! ```rust
//! use resona_core::{CharacteristicSolver, FilterSpec, FrequencyResponse, FrequencySweep};
//!
//! // 100 Ω, 10 mH, 1 µF series RLC, output across R
//! let spec = FilterSpec::band_pass(100.0, 10e-3, 1e-6)?;
//! let tf = spec.transfer_function()?;
//!
//! let response = FrequencyResponse::evaluate(&tf, &FrequencySweep::for_spec(&spec)?)?;
//! assert_eq!(response.magnitude_linear_normalized[response.peak.index], 1.0);
//!
//! let cf = CharacteristicSolver::default().solve(&spec)?;
//! let (lower, upper) = (cf.lower_cutoff().unwrap(), cf.upper_cutoff().unwrap());
//! assert!(lower < cf.omega_0 && cf.omega_0 < upper);
//! # Ok::<(), resona_core::EngineError>(())
//! ```
//!
//! ## Transient Response
//!
//! ```rust
//! use resona_core::{FilterSpec, TimeDomainSimulator};
//!
//! let tf = FilterSpec::low_pass(1e3, 1e-6)?.transfer_function()?;
//! let sim = TimeDomainSimulator::new(&tf);
//! let step = sim.step_response(&sim.default_time_base(200)?)?;
//! assert!(step.last_value() > 0.99);
//! # Ok::<(), resona_core::EngineError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing` - emit `tracing::debug!` events from the solver and simulator

pub mod analysis;
pub mod characteristic;
pub mod error;
pub mod export;
pub mod measure;
pub mod polynomial;
pub mod response;
pub mod roots;
pub mod signal;
pub mod state_space;
pub mod sweep;
pub mod topology;
pub mod transient;

// Re-export main types
pub use analysis::{AnalysisReport, FilterAnalysis};
pub use characteristic::{
    CharacteristicFrequencies, CharacteristicSolver, Cutoffs, Diagnostic, SolverStrategy,
};
pub use error::{EngineError, Result};
pub use measure::{ToneGain, tone_gains};
pub use polynomial::{PolynomialRatio, format_polynomial, horner, polynomial_roots};
pub use response::{FrequencyResponse, Peak, PeakPosition, unwrap_phase_degrees};
pub use roots::{RootOptions, find_root};
pub use signal::{Tone, linspace, multi_tone, sum_of_sines, uniform_time_base};
pub use state_space::StateSpace;
pub use sweep::FrequencySweep;
pub use topology::{FilterKind, FilterSpec};
pub use transient::{TimeDomainSimulator, TimeSeries};
