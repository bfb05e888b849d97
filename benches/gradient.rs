use criterion::criterion_main;
use routers_overlay::gradient::{CongestionColors, CongestionLevel, Segment, compile_gradient};
use std::hint::black_box;
use strum::IntoEnumIterator;

struct GradientScenario {
    name: &'static str,
    segments: usize,
    is_soft: bool,
}

const GRADIENT_CASES: [GradientScenario; 4] = [
    GradientScenario {
        name: "short hard",
        segments: 50,
        is_soft: false,
    },
    GradientScenario {
        name: "short soft",
        segments: 50,
        is_soft: true,
    },
    GradientScenario {
        name: "long hard",
        segments: 5_000,
        is_soft: false,
    },
    GradientScenario {
        name: "long soft",
        segments: 5_000,
        is_soft: true,
    },
];

fn segments(count: usize) -> Vec<Segment> {
    let colors = CongestionColors::MAIN;
    let levels = CongestionLevel::iter().collect::<Vec<_>>();

    (0..count)
        .map(|index| {
            let level = levels[(index * 7 / 3) % levels.len()];
            Segment::new(10.0 + (index % 13) as f64 * 25.0, colors.color(level))
        })
        .collect()
}

fn gradient_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("gradient");
    group.significance_level(0.1).sample_size(50);

    GRADIENT_CASES.into_iter().for_each(|sc| {
        let segments = segments(sc.segments);
        let base = CongestionColors::MAIN.unknown;

        group.bench_function(format!("compile: {}", sc.name), |b| {
            b.iter(|| black_box(compile_gradient(&segments, sc.is_soft, base)))
        });

        let stops = compile_gradient(&segments, sc.is_soft, base);
        group.bench_function(format!("expression: {}", sc.name), |b| {
            b.iter(|| black_box(stops.to_expression(base, sc.is_soft)))
        });
    });

    group.finish();
}

criterion::criterion_group!(gradient_benches, gradient_benchmark);
criterion_main!(gradient_benches);
