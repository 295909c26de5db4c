//! Benchmarks for the responsive engine.
//!
//! These benchmarks measure:
//! - Breakpoint classification lookup
//! - A full width-tick resync (markers + visibility) over trees of
//!   increasing size, both inside one band and across a band transition

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reflow::headless::HeadlessWindow;
use reflow::{BreakpointTable, ResponsiveConfig, ResponsiveController};

/// Build a window with roughly `node_count` nodes in a fanout-8 tree.
fn build_window(node_count: usize) -> HeadlessWindow {
    let mut w = HeadlessWindow::new(350.0);
    let mut parents = vec![w.root_id()];
    let mut next_parent = 0;
    let mut fanout = 0;
    for _ in 1..node_count {
        let node = w.add_node(parents[next_parent]);
        parents.push(node);
        fanout += 1;
        if fanout == 8 {
            fanout = 0;
            next_parent += 1;
        }
    }
    w
}

fn classification(c: &mut Criterion) {
    let table = BreakpointTable::five_tier();
    c.bench_function("classify", |b| {
        b.iter(|| {
            for width in [0.0, 350.0, 500.0, 900.0, 1200.0, 1500.0, 2000.0] {
                black_box(table.classify(black_box(width)));
            }
        })
    });
}

fn width_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("width_tick");
    for node_count in [100usize, 1_000, 5_000] {
        group.bench_with_input(
            BenchmarkId::new("in_band", node_count),
            &node_count,
            |b, &node_count| {
                let mut w = build_window(node_count);
                let mut ctl = ResponsiveController::new(ResponsiveConfig::new());
                ctl.start(&mut w).unwrap();
                let mut flip = false;
                b.iter(|| {
                    flip = !flip;
                    w.set_width(if flip { 360.0 } else { 350.0 });
                    ctl.width_changed(&mut w).unwrap();
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("cross_band", node_count),
            &node_count,
            |b, &node_count| {
                let mut w = build_window(node_count);
                let mut ctl = ResponsiveController::new(ResponsiveConfig::new());
                ctl.start(&mut w).unwrap();
                let mut flip = false;
                b.iter(|| {
                    flip = !flip;
                    w.set_width(if flip { 900.0 } else { 350.0 });
                    ctl.width_changed(&mut w).unwrap();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, classification, width_tick);
criterion_main!(benches);
