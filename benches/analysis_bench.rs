//! Performance benchmarks for audio analysis

use cadence_dsp::{analyze_audio, AnalysisConfig, TransformEngine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// 30 seconds of a 120 BPM click track over a sustained tone.
fn synthetic_track(sample_rate: u32, seconds: f32) -> Vec<f32> {
    let total = (sample_rate as f32 * seconds) as usize;
    let beat_interval = (sample_rate as f32 / 2.0) as usize;
    (0..total)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let tone = 0.3 * (2.0 * std::f32::consts::PI * 220.0 * t).sin();
            let since_beat = i % beat_interval;
            let click = if since_beat < 512 {
                0.6 * (-(since_beat as f32) / 128.0).exp()
            } else {
                0.0
            };
            tone + click
        })
        .collect()
}

fn bench_analyze_audio(c: &mut Criterion) {
    let samples = synthetic_track(44100, 30.0);
    let config = AnalysisConfig::default();

    c.bench_function("analyze_audio_30s", |b| {
        b.iter(|| {
            let _ = analyze_audio(black_box(&samples), black_box(44100), black_box(&config));
        });
    });
}

fn bench_transform(c: &mut Criterion) {
    let engine = TransformEngine::new();
    let frame: Vec<f32> = (0..8192)
        .map(|i| (i as f32 * 0.01).sin())
        .collect();
    // Warm the plan cache so the benchmark measures the transform itself
    engine.plan(8192).unwrap();

    c.bench_function("forward_8192", |b| {
        b.iter(|| {
            let _ = engine.forward_real(black_box(&frame));
        });
    });
}

criterion_group!(benches, bench_analyze_audio, bench_transform);
criterion_main!(benches);
