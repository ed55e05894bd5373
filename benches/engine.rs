//! Engine hot-path benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hexpop::core::cascade::resolve_once;
use hexpop::core::factory::TileFactory;
use hexpop::core::grid::{Coord, HexGrid, Tile};
use hexpop::core::matching::{find_pops, has_legal_moves};

/// A full 8x9 grid with a varied but fixed color layout.
fn bench_grid() -> HexGrid {
    let mut factory = TileFactory::new(42, 5, 5);
    HexGrid::from_fn(9, 8, |_| Some(factory.spawn()))
}

/// The same grid with a guaranteed matched triangle planted in the middle.
fn grid_with_pop() -> HexGrid {
    let mut grid = bench_grid();
    let center = Coord::new(4, 4);
    for c in [
        center,
        HexGrid::neighbor(center, 0),
        HexGrid::neighbor(center, 1),
    ] {
        grid.set(c, Some(Tile::normal(0)));
    }
    grid
}

fn bench_find_pops(c: &mut Criterion) {
    let grid = bench_grid();
    c.bench_function("find_pops_full_grid", |b| {
        b.iter(|| find_pops(black_box(&grid)))
    });
}

fn bench_has_legal_moves(c: &mut Criterion) {
    let grid = bench_grid();
    c.bench_function("has_legal_moves_full_grid", |b| {
        b.iter(|| has_legal_moves(black_box(&grid)))
    });
}

fn bench_cascade_step(c: &mut Criterion) {
    let grid = grid_with_pop();
    c.bench_function("cascade_resolve_step", |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            let mut factory = TileFactory::new(7, 5, 5);
            resolve_once(black_box(&mut grid), &mut factory)
        })
    });
}

criterion_group!(
    benches,
    bench_find_pops,
    bench_has_legal_moves,
    bench_cascade_step
);
criterion_main!(benches);
