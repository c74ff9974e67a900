use criterion::{criterion_group, criterion_main, Criterion};
use num_complex::Complex64;
use std::hint::black_box;
use zs_core::locate::fast_eigenvalue;
use zs_core::scatter::fast_scatter;
use zs_types::config::Discretization;
use zs_types::signal::Signal;

fn sech_signal(d: usize) -> Signal {
    let (t0, t1) = (-12.0, 12.0);
    let samples: Vec<Complex64> = (0..d)
        .map(|n| {
            let t = t0 + n as f64 * (t1 - t0) / (d - 1) as f64;
            Complex64::new(2.2 / t.cosh(), 0.0)
        })
        .collect();
    Signal::new(samples, t0, t1).unwrap()
}

fn bench_fast_scatter(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_scatter");
    for &d in &[256usize, 1024, 4096] {
        let signal = sech_signal(d);
        group.bench_function(format!("split2a_{d}"), |b| {
            b.iter(|| black_box(fast_scatter(&signal, 1.0, Discretization::Split2A, true)))
        });
    }
    let signal = sech_signal(1024);
    group.bench_function("split2b_1024", |b| {
        b.iter(|| black_box(fast_scatter(&signal, 1.0, Discretization::Split2B, true)))
    });
    group.finish();
}

fn bench_localization(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_eigenvalue");
    group.sample_size(10);
    for &d in &[128usize, 256] {
        let signal = sech_signal(d);
        let poly = fast_scatter(&signal, 1.0, Discretization::Split2A, true);
        let eps = signal.step();
        group.bench_function(format!("sech_{d}"), |b| {
            b.iter(|| black_box(fast_eigenvalue(&poly, eps, 1).unwrap().len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fast_scatter, bench_localization);
criterion_main!(benches);
