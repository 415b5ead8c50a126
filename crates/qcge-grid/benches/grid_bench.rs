//! Benchmarks for grid editing and compilation
//!
//! Run with: cargo bench -p qcge-grid

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qcge_grid::{Action, ControlDirection, Direction, GateKind, PlacementEngine, compile};
use std::f64::consts::PI;

/// Fill every column with a CX whose control sits two wires below the target,
/// plus fixed gates on the remaining wires.
fn dense_engine(num_qubits: usize, num_columns: usize) -> PlacementEngine {
    let mut engine = PlacementEngine::new(num_qubits, num_columns).unwrap();
    for column in 0..num_columns {
        for _ in 0..num_qubits {
            engine.move_cursor(Direction::Up);
        }
        engine.apply(Action::Place(GateKind::X)).unwrap();
        let _ = engine.apply(Action::AddControl);
        let _ = engine.apply(Action::MoveControl(ControlDirection::Down));
        if column % 2 == 0 {
            let _ = engine.apply(Action::Rotate(PI / 8.0));
        }
        for _ in 0..3 {
            engine.move_cursor(Direction::Down);
        }
        for _ in 3..num_qubits {
            let _ = engine.apply(Action::Place(GateKind::T));
            engine.move_cursor(Direction::Down);
        }
        engine.move_cursor(Direction::Right);
    }
    engine
}

/// Benchmark compiling dense grids
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for size in &[4, 16, 64] {
        let engine = dense_engine(*size, *size);
        group.bench_with_input(BenchmarkId::new("dense", size), &engine, |b, engine| {
            b.iter(|| compile(black_box(engine.grid())).unwrap());
        });
    }

    group.finish();
}

/// Benchmark clearing dense grids
fn bench_clear_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear_all");

    for size in &[4, 16, 64] {
        let engine = dense_engine(*size, *size);
        group.bench_with_input(BenchmarkId::new("dense", size), &engine, |b, engine| {
            b.iter(|| {
                let mut engine = engine.clone();
                engine.apply(black_box(Action::ClearAll)).unwrap();
                engine
            });
        });
    }

    group.finish();
}

/// Benchmark derived marker lookups
fn bench_displayed_kind(c: &mut Criterion) {
    let engine = dense_engine(64, 64);

    c.bench_function("displayed_kind_full_scan", |b| {
        b.iter(|| {
            let grid = engine.grid();
            let mut controls = 0;
            for wire in 0..grid.num_qubits() {
                for column in 0..grid.num_columns() {
                    if grid.displayed_kind(black_box(wire), black_box(column)).unwrap()
                        == GateKind::Ctrl
                    {
                        controls += 1;
                    }
                }
            }
            controls
        });
    });
}

criterion_group!(benches, bench_compile, bench_clear_all, bench_displayed_kind);
criterion_main!(benches);
