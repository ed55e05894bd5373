//! Pop / compact / refill resolution
//!
//! One resolution step takes a whole-grid snapshot of matches, clears them,
//! slides every column's survivors down without reordering, and refills from
//! the factory. The grid is updated logically in full each step; the
//! returned outcome describes what moved so the session can schedule the
//! matching visuals. Cascades are driven by calling `resolve_once` again
//! after the previous step's animations drain.

use std::collections::VecDeque;

use glam::Vec2;

use crate::core::factory::TileFactory;
use crate::core::grid::{Coord, HexGrid, Tile};
use crate::core::matching::find_pops;

/// A surviving tile sliding down within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub from: Coord,
    pub to: Coord,
}

/// A fresh tile entering from above the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpawn {
    pub at: Coord,
    pub tile: Tile,
    /// World position the tile visually falls from.
    pub from_world: Vec2,
}

/// What one resolution step did.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// No matches; the grid is stable.
    Settled,
    /// Matches were cleared; survivors slid and refills were placed.
    Step {
        popped: Vec<(Coord, Tile)>,
        moves: Vec<TileMove>,
        spawns: Vec<TileSpawn>,
    },
}

/// Run one pop / compact / refill step.
pub fn resolve_once(grid: &mut HexGrid, factory: &mut TileFactory) -> ResolveOutcome {
    let pops = find_pops(grid);
    if pops.is_empty() {
        return ResolveOutcome::Settled;
    }

    let mut popped = Vec::with_capacity(pops.len());
    for &coord in &pops {
        if let Some(tile) = grid.take(coord) {
            popped.push((coord, tile));
        }
    }

    let mut moves = Vec::new();
    let mut spawns = Vec::new();
    for col in 0..grid.cols() as i8 {
        compact_column(grid, col, &mut moves, &mut spawns, factory);
    }

    debug_assert!(grid.is_full(), "refill must leave no gaps");
    ResolveOutcome::Step {
        popped,
        moves,
        spawns,
    }
}

/// Slide one column's tiles down and refill the vacancies from above.
///
/// Bottom-to-top single pass with a queue of empty rows: the oldest queued
/// (lowest) empty row receives the next surviving tile, so relative order
/// within the column is preserved. Whatever remains queued after the pass is
/// the contiguous run of empty rows at the top, bottom-most first, and those
/// become the refill targets.
fn compact_column(
    grid: &mut HexGrid,
    col: i8,
    moves: &mut Vec<TileMove>,
    spawns: &mut Vec<TileSpawn>,
    factory: &mut TileFactory,
) {
    let mut empties: VecDeque<i8> = VecDeque::new();
    for row in (0..grid.rows() as i8).rev() {
        let here = Coord::new(row, col);
        if grid.get(here).is_none() {
            empties.push_back(row);
        } else if let Some(dest_row) = empties.pop_front() {
            let to = Coord::new(dest_row, col);
            let tile = grid.take(here);
            grid.set(to, tile);
            moves.push(TileMove { from: here, to });
            empties.push_back(row);
        }
    }

    for (k, dest_row) in empties.into_iter().enumerate() {
        let tile = factory.spawn();
        let at = Coord::new(dest_row, col);
        grid.set(at, Some(tile));
        spawns.push(TileSpawn {
            at,
            tile,
            from_world: Vec2::new(HexGrid::column_x(col), -(1.0 + k as f32)),
        });
    }
}

/// Settle a freshly built grid: re-roll the color of every matched tile in
/// place until no matches remain. No scoring, no column movement.
pub fn settle_in_place(grid: &mut HexGrid, factory: &mut TileFactory) {
    // A re-roll can introduce a new match; loop until clean. The cap only
    // guards against a palette too small to ever settle.
    for _ in 0..10_000 {
        let pops = find_pops(grid);
        if pops.is_empty() {
            return;
        }
        for coord in pops {
            if let Some(tile) = grid.get_mut(coord) {
                factory.reroll(tile);
            }
        }
    }
    debug_assert!(false, "grid failed to settle; palette too small?");
}
