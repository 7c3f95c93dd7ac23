//! Criterion benchmarks for resona-core components
//!
//! Run with: cargo bench -p resona-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use resona_core::{
    CharacteristicSolver, FilterSpec, FrequencyResponse, FrequencySweep, SolverStrategy,
    StateSpace, TimeDomainSimulator, Tone, linspace, multi_tone,
};

fn reference_band_pass() -> FilterSpec {
    FilterSpec::band_pass(100.0, 10e-3, 1e-6).unwrap()
}

// ============================================================================
// Frequency response benchmarks
// ============================================================================

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sweep");
    let tf = reference_band_pass().transfer_function().unwrap();

    for &points in &[100, 1000, 4000, 16000] {
        let sweep = FrequencySweep::new(10.0, 1e7, points).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| {
                let response = FrequencyResponse::evaluate(black_box(&tf), &sweep).unwrap();
                black_box(response)
            })
        });
    }

    group.finish();
}

// ============================================================================
// Solver benchmarks
// ============================================================================

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solver");
    let spec = reference_band_pass();

    let strategies = [
        ("ClosedForm", SolverStrategy::ClosedForm),
        ("Numeric", SolverStrategy::Numeric),
        ("CrossChecked", SolverStrategy::CrossChecked),
    ];

    for (name, strategy) in strategies {
        let solver = CharacteristicSolver::new(strategy);
        group.bench_function(name, |b| {
            b.iter(|| black_box(solver.solve(black_box(&spec)).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Time-domain benchmarks
// ============================================================================

fn bench_discretize(c: &mut Criterion) {
    let ss = StateSpace::from_transfer_function(&reference_band_pass().transfer_function().unwrap());

    c.bench_function("Discretize_SecondOrder", |b| {
        b.iter(|| black_box(ss.discretize(black_box(1e-5)).unwrap()))
    });
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("Step");
    let sim = TimeDomainSimulator::new(&reference_band_pass().transfer_function().unwrap());

    for &points in &[100, 1000, 10000] {
        let t = linspace(0.0, 2e-3, points).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| black_box(sim.step_response(black_box(&t)).unwrap()))
        });
    }

    group.finish();
}

fn bench_simulate_mixture(c: &mut Criterion) {
    let tf = FilterSpec::high_pass(1e5, 5.3e-9)
        .unwrap()
        .transfer_function()
        .unwrap();
    let sim = TimeDomainSimulator::new(&tf);
    let input = multi_tone(
        0.5,
        20_000.0,
        &[Tone::new(5.0, 1.0).unwrap(), Tone::new(200.0, 0.5).unwrap()],
    )
    .unwrap();

    c.bench_function("Simulate_HighPassMixture", |b| {
        b.iter(|| black_box(sim.simulate(black_box(&input)).unwrap()))
    });
}

criterion_group!(frequency, bench_sweep, bench_solver);
criterion_group!(time_domain, bench_discretize, bench_step, bench_simulate_mixture);
criterion_main!(frequency, time_domain);
