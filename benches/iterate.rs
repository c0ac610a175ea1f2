#[macro_use]
extern crate criterion;
extern crate quadattract;

use criterion::Criterion;
use quadattract::bounds;
use quadattract::map::step;
use quadattract::params::ParameterSet;

fn bench_step(c: &mut Criterion) {
    let params = *ParameterSet::builtin().get(0).unwrap();
    c.bench_function("step_1000", move |b| {
        b.iter(|| {
            let mut p = params.start;
            for _ in 0..1000 {
                p = step(p, &params.coefficients);
            }
            p
        })
    });
}

fn bench_estimate(c: &mut Criterion) {
    let params = *ParameterSet::builtin().get(2).unwrap();
    c.bench_function("estimate_bounds", move |b| {
        b.iter(|| bounds::estimate(&params).unwrap())
    });
}

criterion_group!(benches, bench_step, bench_estimate);
criterion_main!(benches);
