use std::f32::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pulse_classifier::{analyze, analyze_detailed, DetectorConfig};

const SAMPLE_RATE: u32 = 48000;

/// 30 s capture: low hum plus a 50ms tone burst every 0.75 s
fn heartbeat_capture() -> Vec<f32> {
    let len = SAMPLE_RATE as usize * 30;
    let interval = SAMPLE_RATE as usize * 3 / 4;
    let burst = SAMPLE_RATE as usize / 20;

    (0..len)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let hum = 0.02 * (2.0 * PI * 100.0 * t).sin();
            if i % interval < burst {
                hum + 0.8 * (2.0 * PI * 1000.0 * t).sin()
            } else {
                hum
            }
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let samples = heartbeat_capture();
    let config = DetectorConfig::default();

    c.bench_function("analyze_30s_capture", |b| {
        b.iter(|| analyze(black_box(&samples), SAMPLE_RATE, &config))
    });

    c.bench_function("analyze_detailed_30s_capture", |b| {
        b.iter(|| analyze_detailed(black_box(&samples), SAMPLE_RATE, &config))
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
