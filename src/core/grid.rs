//! Hex grid module - cell storage and honeycomb geometry
//!
//! The grid is a `rows x cols` array of cells in column-offset coordinates:
//! row 0 is the top, rows grow downward, and odd columns sit half a cell
//! lower than even columns. Uses a flat array for cache locality.
//!
//! Neighbor lookups at the edges legitimately land out of bounds; callers
//! skip those silently rather than treat them as errors.

use glam::Vec2;

use crate::types::{ColorId, COLUMN_PITCH};

/// Grid coordinate (row 0 at the top, rows grow downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// What a tile is beyond its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Normal,
    /// Counts down once per completed move; at zero the game ends.
    /// `fresh` marks a bomb that has not yet survived the move it arrived on.
    Bomb { countdown: u8, fresh: bool },
}

/// A tile occupying one cell. Moving a tile between cells always clears the
/// old cell before setting the new one (exclusive ownership).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub color: ColorId,
    pub kind: TileKind,
}

impl Tile {
    pub const fn normal(color: ColorId) -> Self {
        Self {
            color,
            kind: TileKind::Normal,
        }
    }

    pub const fn bomb(color: ColorId, countdown: u8) -> Self {
        Self {
            color,
            kind: TileKind::Bomb {
                countdown,
                fresh: true,
            },
        }
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self.kind, TileKind::Bomb { .. })
    }
}

/// Relative neighbor offsets `(d_row, d_col)` in a fixed clockwise order
/// starting north. The two parity tables describe the same hexagon; they
/// differ because odd columns are shifted down half a cell.
///
/// Consecutive entries are mutually adjacent, which is what makes the
/// triangle pairing in the match finder work. Do not reorder.
pub const EVEN_COL_NEIGHBORS: [(i8, i8); 6] =
    [(-1, 0), (-1, 1), (0, 1), (1, 0), (0, -1), (-1, -1)];
pub const ODD_COL_NEIGHBORS: [(i8, i8); 6] = [(-1, 0), (0, 1), (1, 1), (1, 0), (1, -1), (0, -1)];

/// The honeycomb: a fixed-size field of cells, each empty or holding one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct HexGrid {
    rows: usize,
    cols: usize,
    /// Flat row-major storage (row * cols + col).
    cells: Vec<Option<Tile>>,
}

impl HexGrid {
    /// Create an empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a grid by evaluating `f` at every coordinate.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(Coord) -> Option<Tile>) -> Self {
        let mut grid = Self::new(rows, cols);
        for coord in grid.coords() {
            let tile = f(coord);
            grid.set(coord, tile);
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat index for a coordinate, or `None` when out of bounds.
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row < 0
            || coord.col < 0
            || coord.row as usize >= self.rows
            || coord.col as usize >= self.cols
        {
            return None;
        }
        Some(coord.row as usize * self.cols + coord.col as usize)
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Tile at `coord`; `None` for empty cells *and* out-of-range lookups.
    pub fn get(&self, coord: Coord) -> Option<Tile> {
        self.index(coord).and_then(|idx| self.cells[idx])
    }

    /// Set or clear a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, coord: Coord, tile: Option<Tile>) {
        if let Some(idx) = self.index(coord) {
            self.cells[idx] = tile;
        }
    }

    /// Remove and return the tile at `coord`.
    pub fn take(&mut self, coord: Coord) -> Option<Tile> {
        match self.index(coord) {
            Some(idx) => self.cells[idx].take(),
            None => None,
        }
    }

    /// Mutable access to a tile in place (bomb countdowns).
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        match self.index(coord) {
            Some(idx) => self.cells[idx].as_mut(),
            None => None,
        }
    }

    /// Neighbor offset table for the given column's parity.
    #[inline]
    pub fn neighbor_offsets(col: i8) -> &'static [(i8, i8); 6] {
        if col.rem_euclid(2) == 1 {
            &ODD_COL_NEIGHBORS
        } else {
            &EVEN_COL_NEIGHBORS
        }
    }

    /// The `i`-th neighbor (0..6, canonical clockwise order). May be out of
    /// bounds; that is an expected edge condition, not an error.
    #[inline]
    pub fn neighbor(coord: Coord, i: usize) -> Coord {
        let (dr, dc) = Self::neighbor_offsets(coord.col)[i];
        Coord::new(coord.row + dr, coord.col + dc)
    }

    /// True when `b` is one of `a`'s six hex neighbors.
    pub fn are_adjacent(a: Coord, b: Coord) -> bool {
        (0..6).any(|i| Self::neighbor(a, i) == b)
    }

    /// All coordinates in row-major scan order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        let rows = self.rows;
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Coord::new(row as i8, col as i8)))
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// World-space center of a cell. Columns are `COLUMN_PITCH` apart; odd
    /// columns sit half a row lower. y grows downward.
    pub fn cell_center(coord: Coord) -> Vec2 {
        Vec2::new(
            coord.col as f32 * COLUMN_PITCH,
            coord.row as f32 + 0.5 * coord.col.rem_euclid(2) as f32,
        )
    }

    /// World x of a column (used for refill spawn points).
    pub fn column_x(col: i8) -> f32 {
        col as f32 * COLUMN_PITCH
    }
}
