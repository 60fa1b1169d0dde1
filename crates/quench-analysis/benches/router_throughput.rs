use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quench_analysis::presets::standard_pipeline;
use quench_analysis::ObservableRouter;
use quench_core::{AnalysisConfig, Event, Jet, Particle};

fn busy_event() -> Event {
    let mut jets = Vec::new();
    for k in 0..6 {
        let phi = k as f64 * PI / 3.0;
        let constituents = (0..8)
            .map(|i| Particle::new(211, 1.0, 4.0 + i as f64 * 3.0, 0.05 * i as f64, phi + 0.01 * i as f64))
            .collect();
        jets.push(
            Jet::bare(90.0 + 5.0 * k as f64, 0.1, 0.1, phi, 6.0).with_constituents(constituents),
        );
    }
    let particles = (0..40)
        .map(|i| Particle::new(211, 1.0, 0.5 + i as f64, 0.02 * i as f64 - 0.4, 0.15 * i as f64))
        .collect();
    Event::new(jets, particles)
}

fn bench_process_event(c: &mut Criterion) {
    let settings = standard_pipeline(AnalysisConfig::default());
    let mut router = ObservableRouter::from_settings(&settings).unwrap();
    let event = busy_event();
    c.bench_function("process_event_standard_pipeline", |b| {
        b.iter(|| router.process_event(black_box(&event)))
    });
}

criterion_group!(benches, bench_process_event);
criterion_main!(benches);
