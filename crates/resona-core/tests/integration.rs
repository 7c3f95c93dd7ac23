//! Integration tests for resona-core.
//!
//! Exercise the public API end to end on the reference circuits: RC low/high
//! pass, the 100 Ω / 10 mH / 1 µF band-pass and the series RLC notch.

use core::f64::consts::{FRAC_1_SQRT_2, TAU};

use resona_core::{
    CharacteristicSolver, Cutoffs, EngineError, FilterAnalysis, FilterKind, FilterSpec,
    FrequencyResponse, FrequencySweep, PeakPosition, SolverStrategy, TimeDomainSimulator, Tone,
    linspace, multi_tone, tone_gains,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn rel(a: f64, b: f64) -> f64 {
    (a - b).abs() / b.abs()
}

/// Number of local maxima in a sequence, ignoring flat steps.
fn local_maxima(values: &[f64]) -> usize {
    let mut count = 0;
    let mut rising = false;
    for w in values.windows(2) {
        if w[1] > w[0] {
            rising = true;
        } else if w[1] < w[0] {
            if rising {
                count += 1;
            }
            rising = false;
        }
    }
    count + usize::from(rising)
}

fn reference_band_pass() -> FilterSpec {
    FilterSpec::band_pass(100.0, 10e-3, 1e-6).unwrap()
}

// ---------------------------------------------------------------------------
// Topology and frequency response
// ---------------------------------------------------------------------------

#[test]
fn rc_low_pass_half_power_at_cutoff() {
    let spec = FilterSpec::low_pass(1000.0, 1e-6).unwrap();
    let tf = spec.transfer_function().unwrap();
    let cf = CharacteristicSolver::default().solve(&spec).unwrap();

    let Cutoffs::Single(wc) = cf.cutoffs else {
        panic!("RC filter must have one cutoff");
    };
    assert!(rel(wc, 1.0 / (1000.0 * 1e-6)) < 1e-12);

    let h_max = tf.dc_gain().unwrap();
    assert!(rel(tf.magnitude_at(wc).unwrap(), h_max * FRAC_1_SQRT_2) < 1e-6);
}

#[test]
fn dc_gains_of_rc_filters() {
    let lp = FilterSpec::low_pass(4.7e3, 22e-9).unwrap().transfer_function().unwrap();
    let hp = FilterSpec::high_pass(4.7e3, 22e-9).unwrap().transfer_function().unwrap();
    assert!((lp.dc_gain().unwrap() - 1.0).abs() < 1e-12);
    assert!(hp.dc_gain().unwrap().abs() < 1e-12);
    assert!((hp.high_frequency_gain() - 1.0).abs() < 1e-12);
    assert_eq!(lp.high_frequency_gain(), 0.0);
}

#[test]
fn normalized_maximum_is_exactly_one() {
    for kind in FilterKind::ALL {
        let spec = FilterSpec::new(kind, 220.0, Some(4.7e-3), 100e-9).unwrap();
        let tf = spec.transfer_function().unwrap();
        let sweep = FrequencySweep::for_spec(&spec).unwrap();
        let response = FrequencyResponse::evaluate(&tf, &sweep).unwrap();

        let max = response
            .magnitude_linear_normalized
            .iter()
            .copied()
            .fold(f64::MIN, f64::max);
        assert_eq!(max, 1.0, "{kind}");
        assert!(
            response
                .magnitude_linear_normalized
                .iter()
                .all(|&m| (0.0..=1.0).contains(&m))
        );
    }
}

#[test]
fn band_pass_and_notch_are_unimodal() {
    let designs = [(100.0, 10e-3, 1e-6), (10.0, 1e-3, 1e-6), (1e3, 50e-3, 10e-9)];
    for (r, l, c) in designs {
        let bp = FilterSpec::band_pass(r, l, c).unwrap();
        let bp_response = FrequencyResponse::evaluate(
            &bp.transfer_function().unwrap(),
            &FrequencySweep::for_spec(&bp).unwrap(),
        )
        .unwrap();
        assert_eq!(local_maxima(&bp_response.magnitude_linear()), 1);

        let notch = FilterSpec::notch(r, l, c).unwrap();
        let notch_response = FrequencyResponse::evaluate(
            &notch.transfer_function().unwrap(),
            &FrequencySweep::for_spec(&notch).unwrap(),
        )
        .unwrap();
        let inverted: Vec<f64> = notch_response
            .magnitude_linear()
            .iter()
            .map(|m| -m)
            .collect();
        assert_eq!(local_maxima(&inverted), 1);
    }
}

#[test]
fn peak_on_sweep_boundary_is_reported() {
    let spec = FilterSpec::low_pass(1000.0, 1e-6).unwrap();
    let tf = spec.transfer_function().unwrap();
    let response = FrequencyResponse::evaluate(&tf, &FrequencySweep::new(10.0, 1e5, 200).unwrap())
        .unwrap();
    assert_eq!(response.peak.position, PeakPosition::LowerBoundary);
    assert!(response.peak.is_at_boundary());

    let bp = reference_band_pass();
    let response = FrequencyResponse::evaluate(
        &bp.transfer_function().unwrap(),
        &FrequencySweep::new(1e5, 1e6, 200).unwrap(),
    )
    .unwrap();
    assert_eq!(response.peak.position, PeakPosition::LowerBoundary);
}

#[test]
fn sampled_crossings_agree_with_solver() {
    let spec = reference_band_pass();
    let tf = spec.transfer_function().unwrap();
    let response = FrequencyResponse::evaluate(&tf, &FrequencySweep::for_spec(&spec).unwrap())
        .unwrap();
    let cf = CharacteristicSolver::default().solve(&spec).unwrap();

    let crossings = response.crossings(FRAC_1_SQRT_2);
    assert_eq!(crossings.len(), 2);
    assert!(rel(crossings[0], cf.lower_cutoff().unwrap()) < 1e-3);
    assert!(rel(crossings[1], cf.upper_cutoff().unwrap()) < 1e-3);
    assert!((response.magnitude_db_at(cf.omega_0)).abs() < 1e-3);
}

#[test]
fn phase_is_raw_atan2() {
    // band-pass phase goes from +90° below ω0 to −90° above
    let spec = reference_band_pass();
    let tf = spec.transfer_function().unwrap();
    let response = FrequencyResponse::evaluate(&tf, &FrequencySweep::new(10.0, 1e7, 601).unwrap())
        .unwrap();
    assert!((response.phase_degrees[0] - 90.0).abs() < 0.1);
    assert!((response.phase_degrees[600] + 90.0).abs() < 0.1);
    assert!(response.phase_at(1e4).abs() < 0.5);
}

// ---------------------------------------------------------------------------
// Characteristic frequencies
// ---------------------------------------------------------------------------

#[test]
fn reference_band_pass_values() {
    let cf = CharacteristicSolver::default()
        .solve(&reference_band_pass())
        .unwrap();
    assert!(rel(cf.omega_0, 1e4) < 1e-9);
    assert!(rel(cf.bandwidth.unwrap(), 1e4) < 1e-9);
    assert!(rel(cf.quality_factor.unwrap(), 1.0) < 1e-9);

    let (lower, upper) = (cf.lower_cutoff().unwrap(), cf.upper_cutoff().unwrap());
    assert!(lower < cf.omega_0 && cf.omega_0 < upper);
    assert!(rel(upper - lower, 100.0 / 10e-3) < 1e-6);
    assert!(rel(lower * upper, cf.omega_0 * cf.omega_0) < 1e-6);
    cf.ensure_consistent().unwrap();
}

#[test]
fn every_strategy_agrees_on_reference_designs() {
    let specs = [
        FilterSpec::low_pass(1e3, 1e-6).unwrap(),
        FilterSpec::high_pass(1e5, 5.3e-9).unwrap(),
        reference_band_pass(),
        FilterSpec::notch(100.0, 1e-3, 1e-6).unwrap(),
    ];
    for spec in specs {
        let closed = CharacteristicSolver::new(SolverStrategy::ClosedForm)
            .solve(&spec)
            .unwrap();
        let numeric = CharacteristicSolver::new(SolverStrategy::Numeric)
            .solve(&spec)
            .unwrap();
        let checked = CharacteristicSolver::new(SolverStrategy::CrossChecked)
            .solve(&spec)
            .unwrap();

        for (a, b) in closed.cutoffs.to_vec().iter().zip(numeric.cutoffs.to_vec()) {
            assert!(rel(b, *a) < 1e-9, "{spec}: {a} vs {b}");
        }
        assert!(checked.is_consistent(), "{spec}: {:?}", checked.diagnostics);
        assert_eq!(checked.cutoffs, closed.cutoffs);
    }
}

#[test]
fn notch_defaults_to_numeric() {
    let spec = FilterSpec::notch(100.0, 1e-3, 1e-6).unwrap();
    let cf = CharacteristicSolver::default().solve(&spec).unwrap();
    assert_eq!(cf.strategy, SolverStrategy::Numeric);
    assert!(cf.lower_cutoff().unwrap() < cf.omega_0);
}

#[test]
fn band_pass_without_inductance_is_invalid() {
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
fn non_positive_components_are_never_clamped() {
    assert!(FilterSpec::low_pass(-1.0, 1e-6).is_err());
    assert!(FilterSpec::low_pass(1.0, 0.0).is_err());
    assert!(FilterSpec::notch(1.0, -1e-3, 1e-6).is_err());
    assert!(FilterSpec::high_pass(f64::NAN, 1e-6).is_err());
}

// ---------------------------------------------------------------------------
// Time domain
// ---------------------------------------------------------------------------

#[test]
fn rc_step_response_time_constants() {
    let tau = 1e3 * 1e-6;
    let tf = FilterSpec::low_pass(1e3, 1e-6).unwrap().transfer_function().unwrap();
    let sim = TimeDomainSimulator::new(&tf);
    let t = linspace(0.0, 5.0 * tau, 1001).unwrap();
    let step = sim.step_response(&t).unwrap();

    assert!(rel(step.value_at(tau), 0.632) < 0.01);
    assert!(step.value_at(5.0 * tau) >= 0.99);
}

#[test]
fn band_pass_step_rings_down_to_zero() {
    let spec = reference_band_pass();
    let sim = TimeDomainSimulator::new(&spec.transfer_function().unwrap());
    let t = sim.default_time_base(500).unwrap();
    let step = sim.step_response(&t).unwrap();
    assert_eq!(step.values()[0], 0.0);
    assert!(step.values().iter().any(|&v| v > 0.3));
    assert!(step.last_value().abs() < 1e-2);
}

#[test]
fn high_pass_mixture_keeps_the_fast_tone() {
    // 5 Hz + 200 Hz through a 300 Hz RC high-pass, sampled at 20 kHz
    let spec = FilterSpec::high_pass(1e5, 5.3e-9).unwrap();
    let tf = spec.transfer_function().unwrap();
    let tones = [Tone::new(5.0, 1.0).unwrap(), Tone::new(200.0, 0.5).unwrap()];
    let input = multi_tone(0.8, 20_000.0, &tones).unwrap();
    let output = TimeDomainSimulator::new(&tf).simulate(&input).unwrap();

    let gains = tone_gains(&input, &output, &[5.0, 200.0]).unwrap();
    for (gain, tone) in gains.iter().zip(&tones) {
        let expected = tf.magnitude_at(tone.omega()).unwrap();
        assert!(
            rel(gain.gain, expected) < 2e-3,
            "{} Hz: measured {}, expected {expected}",
            tone.frequency_hz,
            gain.gain
        );
    }
    assert!(gains[0].gain < 0.02);
    assert!(gains[1].gain > 0.5);
}

#[test]
fn simulated_sine_matches_bode_magnitude() {
    let spec = reference_band_pass();
    let tf = spec.transfer_function().unwrap();
    let f = 1e4 / TAU;
    let input = multi_tone(0.2, 100_000.0, &[Tone::new(f, 1.0).unwrap()]).unwrap();
    let output = TimeDomainSimulator::new(&tf).simulate(&input).unwrap();
    let tail = &output.values()[output.len() / 2..];
    let peak = tail.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    assert!(rel(peak, tf.magnitude_at(1e4).unwrap()) < 2e-3);
}

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

#[test]
fn analysis_report_for_every_kind() {
    for kind in FilterKind::ALL {
        let spec = FilterSpec::new(kind, 100.0, Some(1e-3), 1e-6).unwrap();
        let report = FilterAnalysis::new().run(&spec).unwrap();
        assert_eq!(report.spec, spec);
        assert_eq!(report.characteristics.kind, kind);
        assert!(!report.response.is_empty());
        assert!(!report.step.is_empty());
    }
}
