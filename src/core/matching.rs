//! Match detection over the hex grid
//!
//! Two pure scans: `find_pops` locates every same-colored mutually adjacent
//! triple that must pop, and `has_legal_moves` answers whether any rotation
//! could still produce one.

use arrayvec::ArrayVec;

use crate::core::grid::{Coord, HexGrid};
use crate::types::ColorId;

/// All cells that belong to at least one same-colored adjacent triple,
/// deduplicated, in row-major scan order.
///
/// A triple is a center cell plus two consecutive entries of its neighbor
/// table (consecutive neighbors are always mutually adjacent). Pairs with an
/// out-of-bounds or empty member are skipped.
pub fn find_pops(grid: &HexGrid) -> Vec<Coord> {
    let mut marked = vec![false; grid.rows() * grid.cols()];
    let mark = |marked: &mut Vec<bool>, grid: &HexGrid, c: Coord| {
        marked[c.row as usize * grid.cols() + c.col as usize] = true;
    };

    for center in grid.coords() {
        let Some(center_tile) = grid.get(center) else {
            continue;
        };
        for i in 0..6 {
            let a = HexGrid::neighbor(center, i);
            let b = HexGrid::neighbor(center, (i + 1) % 6);
            let (Some(ta), Some(tb)) = (grid.get(a), grid.get(b)) else {
                continue;
            };
            if ta.color == center_tile.color && tb.color == center_tile.color {
                mark(&mut marked, grid, center);
                mark(&mut marked, grid, a);
                mark(&mut marked, grid, b);
            }
        }
    }

    grid.coords()
        .filter(|c| marked[c.row as usize * grid.cols() + c.col as usize])
        .collect()
}

/// Whether any cell's neighborhood still admits a match by rotation.
///
/// This is a positional heuristic, not an exhaustive rotation search: for
/// each cell, walk the cyclic sequence of its six neighbor colors in
/// canonical order. A consecutive equal pair records its color; a second
/// consecutive pair of an already-recorded color answers yes immediately,
/// and after the pair pass, any neighbor *outside* a recorded pair whose
/// color matches a recorded one also answers yes. The center's own color is
/// never consulted.
pub fn has_legal_moves(grid: &HexGrid) -> bool {
    for center in grid.coords() {
        let mut ring: [Option<ColorId>; 6] = [None; 6];
        for (i, slot) in ring.iter_mut().enumerate() {
            *slot = grid.get(HexGrid::neighbor(center, i)).map(|t| t.color);
        }

        let mut recorded: ArrayVec<ColorId, 6> = ArrayVec::new();
        let mut in_pair = [false; 6];

        for i in 0..6 {
            let j = (i + 1) % 6;
            let (Some(a), Some(b)) = (ring[i], ring[j]) else {
                continue;
            };
            if a != b {
                continue;
            }
            if recorded.contains(&a) {
                return true;
            }
            recorded.push(a);
            in_pair[i] = true;
            in_pair[j] = true;
        }

        for i in 0..6 {
            if in_pair[i] {
                continue;
            }
            if let Some(color) = ring[i] {
                if recorded.contains(&color) {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Tile;

    /// Grid where every cell's color is its scan index mod 7, so no two
    /// adjacent cells ever share a color.
    fn rainbow_grid() -> HexGrid {
        HexGrid::from_fn(9, 8, |c| {
            Some(Tile::normal(
                ((c.row as usize * 8 + c.col as usize) % 7) as ColorId,
            ))
        })
    }

    #[test]
    fn test_no_pops_on_rainbow_grid() {
        let grid = rainbow_grid();
        assert!(find_pops(&grid).is_empty());
    }

    #[test]
    fn test_empty_grid_has_no_pops_and_no_moves() {
        let grid = HexGrid::new(9, 8);
        assert!(find_pops(&grid).is_empty());
        assert!(!has_legal_moves(&grid));
    }

    #[test]
    fn test_triple_pops() {
        // Center (4,4) plus its first two canonical neighbors, all red.
        let center = Coord::new(4, 4);
        let a = HexGrid::neighbor(center, 0);
        let b = HexGrid::neighbor(center, 1);
        let mut grid = rainbow_grid();
        for c in [center, a, b] {
            grid.set(c, Some(Tile::normal(10)));
        }
        let pops = find_pops(&grid);
        assert_eq!(pops.len(), 3);
        for c in [center, a, b] {
            assert!(pops.contains(&c), "missing {:?}", c);
        }
    }

    #[test]
    fn test_pop_set_is_deduped_across_overlapping_triples() {
        // Four cells forming two overlapping triangles of the same color
        // must be reported once each.
        let center = Coord::new(4, 4);
        let cells = [
            center,
            HexGrid::neighbor(center, 0),
            HexGrid::neighbor(center, 1),
            HexGrid::neighbor(center, 2),
        ];
        let mut grid = rainbow_grid();
        for c in cells {
            grid.set(c, Some(Tile::normal(10)));
        }
        let pops = find_pops(&grid);
        assert_eq!(pops.len(), 4);
    }

    #[test]
    fn test_degenerate_column_no_pop() {
        // [Red, Red, Blue] in a single column: two reds are adjacent but no
        // third mutually adjacent red exists.
        let grid = HexGrid::from_fn(3, 1, |c| {
            Some(Tile::normal(if c.row < 2 { 0 } else { 1 }))
        });
        assert!(find_pops(&grid).is_empty());
    }

    #[test]
    fn test_two_pairs_of_same_color_means_legal_move() {
        // Around one center, two separate consecutive pairs of the same
        // color: a rotation can bring a third tile of that color in.
        let center = Coord::new(4, 4);
        let mut grid = rainbow_grid();
        // Pairs (0,1) and (3,4) of the ring, same color, separated so they
        // are distinct pairs.
        for i in [0usize, 1, 3, 4] {
            grid.set(HexGrid::neighbor(center, i), Some(Tile::normal(10)));
        }
        assert!(has_legal_moves(&grid));
    }

    #[test]
    fn test_pair_plus_lone_neighbor_means_legal_move() {
        let center = Coord::new(4, 4);
        let mut grid = rainbow_grid();
        // Consecutive pair at (0,1) and a lone matching tile at position 3.
        for i in [0usize, 1, 3] {
            grid.set(HexGrid::neighbor(center, i), Some(Tile::normal(10)));
        }
        assert!(has_legal_moves(&grid));
    }

    #[test]
    fn test_rainbow_grid_has_no_legal_moves() {
        // No two adjacent cells share a color anywhere, so no neighborhood
        // can ever produce a pair.
        assert!(!has_legal_moves(&rainbow_grid()));
    }

    #[test]
    fn test_lone_pair_without_third_is_not_a_legal_move() {
        // A single consecutive pair and nothing else of that color: the
        // heuristic reports no move.
        let center = Coord::new(4, 4);
        let mut grid = rainbow_grid();
        for i in [0usize, 1] {
            grid.set(HexGrid::neighbor(center, i), Some(Tile::normal(10)));
        }
        // Color 10 appears nowhere else in the rainbow grid; the pair needs
        // a third somewhere in some neighborhood. Every other neighborhood
        // sees at most these two as non-consecutive singles of a color that
        // never forms a pair there.
        assert!(!has_legal_moves(&grid));
    }
}
