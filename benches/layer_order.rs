use criterion::criterion_main;
use routers_overlay::engine::{LayerInfo, LayerKind};
use routers_overlay::order::{LayerOrder, LegacyPlacement, PlacementMode};
use routers_overlay::style::{default_rules, legacy_bands};
use std::hint::black_box;

struct OrderScenario {
    name: &'static str,
    legacy: bool,
    base_layers: usize,
}

const ORDER_CASES: [OrderScenario; 2] = [
    OrderScenario {
        name: "slotted",
        legacy: false,
        base_layers: 120,
    },
    OrderScenario {
        name: "legacy",
        legacy: true,
        base_layers: 120,
    },
];

fn base_stack(count: usize) -> Vec<LayerInfo> {
    (0..count)
        .map(|index| match index % 4 {
            0 => LayerInfo::new(format!("land-{index}"), LayerKind::Fill).with_source_layer("landuse"),
            1 => LayerInfo::new(format!("road-{index}"), LayerKind::Line).with_source_layer("road"),
            2 => LayerInfo::new(format!("road-label-{index}"), LayerKind::Symbol).with_source_layer("road"),
            _ => LayerInfo::new(format!("poi-label-{index}"), LayerKind::Symbol).with_source_layer("poi"),
        })
        .collect()
}

fn managed_ids() -> Vec<String> {
    legacy_bands().all().map(str::to_string).rev().collect()
}

fn order_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("layer_order");
    group.significance_level(0.1).sample_size(50);

    ORDER_CASES.into_iter().for_each(|sc| {
        let stack = base_stack(sc.base_layers);
        let ids = managed_ids();
        let mode = || {
            if sc.legacy {
                PlacementMode::Legacy(LegacyPlacement::new(legacy_bands()))
            } else {
                PlacementMode::Slotted
            }
        };

        group.bench_function(format!("insert: {}", sc.name), |b| {
            b.iter(|| {
                let mut order = LayerOrder::new(default_rules(), mode());
                order.set_base_ids(stack.iter().map(|layer| layer.id.clone()));
                for id in &ids {
                    order.insert(id);
                }
                black_box(order)
            })
        });

        let mut order = LayerOrder::new(default_rules(), mode());
        order.set_base_ids(stack.iter().map(|layer| layer.id.clone()));
        for id in &ids {
            order.insert(id);
        }

        group.bench_function(format!("position: {}", sc.name), |b| {
            b.iter(|| {
                for id in &ids {
                    black_box(order.position(id, &stack));
                }
            })
        });
    });

    group.finish();
}

criterion::criterion_group!(order_benches, order_benchmark);
criterion_main!(order_benches);
