use RustedExprCalc::calculator::session::{Event, Session, derive_results};
use RustedExprCalc::calculator::solver_adapter::{MissingValues, solve_pair};
use RustedExprCalc::numerical::equation_system::SolverConfig;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn session_with(texts: &[&str]) -> Session {
    let mut session = Session::new();
    for (index, text) in texts.iter().enumerate() {
        if index > 0 {
            session = session.apply(Event::Add);
        }
        let id = session.store().ids()[index].clone();
        session = session.apply(Event::Edit(id, text.to_string()));
    }
    session
}

fn bench_linear_pair(c: &mut Criterion) {
    let config = SolverConfig::default();
    let values = MissingValues::new();
    c.bench_function("linear pair", |b| {
        b.iter(|| solve_pair(black_box("x+y=2"), black_box("x-y=0"), &values, &config))
    });
}

fn bench_nonlinear_pair(c: &mut Criterion) {
    let config = SolverConfig::default();
    let values = MissingValues::new();
    c.bench_function("nonlinear pair", |b| {
        b.iter(|| solve_pair(black_box("x^2+y^2=5"), black_box("x-y=1"), &values, &config))
    });
}

fn bench_derive_results(c: &mut Criterion) {
    let session = session_with(&["x+y=2", "x-y=0", "x+2y=3", "2x-y=1", "a x + y = 4"]);
    c.bench_function("derive results, 5 candidates", |b| {
        b.iter(|| derive_results(session.store(), session.missing_values(), session.config()))
    });
}

criterion_group!(benches, bench_linear_pair, bench_nonlinear_pair, bench_derive_results);
criterion_main!(benches);
