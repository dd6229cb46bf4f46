//! Per-frame query benchmarks for bw_core.
//!
//! Run with: `cargo bench -p bw_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use bw_core::catalog::UnitType;
use bw_core::pathfinding::{bresenham_line, ground_distance, AreaGraph};
use bw_core::position::{Position, TilePosition};
use bw_core::spatial::filters;
use bw_test_utils::fixtures::{protoss_base, terran_base};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Placement checks and the build-site search.
pub fn placement_benchmark(c: &mut Criterion) {
    let game = terran_base().game();

    c.bench_function("can_build_here barracks", |b| {
        b.iter(|| game.can_build_here(black_box(TilePosition::new(20, 20)), UnitType::TerranBarracks, None, true))
    });

    c.bench_function("build_location command center", |b| {
        b.iter(|| game.build_location(UnitType::TerranCommandCenter, black_box(TilePosition::new(10, 10)), 32))
    });
}

/// Spatial, power and damage lookups.
pub fn lookup_benchmark(c: &mut Criterion) {
    let terran = terran_base().game();
    let protoss = protoss_base().game();

    c.bench_function("units_in_radius", |b| {
        b.iter(|| terran.units_in_radius(black_box(Position::new(320, 320)), 256, filters::is_resource).len())
    });

    c.bench_function("has_power gateway", |b| {
        b.iter(|| protoss.has_power(black_box(TilePosition::new(22, 20)), Some(UnitType::ProtossGateway)))
    });

    c.bench_function("damage_from dragoon", |b| {
        b.iter(|| terran.damage_from(black_box(UnitType::ProtossDragoon), UnitType::TerranMarine, None, None))
    });
}

/// Line tracing and area routing.
pub fn pathfinding_benchmark(c: &mut Criterion) {
    let snapshot = terran_base().build();
    let graph = AreaGraph::from_snapshot(&snapshot).expect("fixture topology");

    c.bench_function("bresenham_line diagonal", |b| {
        b.iter(|| bresenham_line(black_box(TilePosition::new(0, 0)), black_box(TilePosition::new(63, 40))).len())
    });

    c.bench_function("ground_distance same area", |b| {
        b.iter(|| {
            ground_distance(&graph, black_box(TilePosition::new(2, 2)), black_box(TilePosition::new(60, 60)))
        })
    });
}

criterion_group!(benches, placement_benchmark, lookup_benchmark, pathfinding_benchmark);
criterion_main!(benches);
