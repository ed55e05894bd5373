//! Tile generation
//!
//! All randomness in the engine flows through `SimpleRng`, a small seeded
//! LCG, so a session replays identically for a given seed. The factory rolls
//! uniform colors and substitutes a bomb tile when one has been armed by the
//! score check.

use crate::core::grid::Tile;
use crate::types::ColorId;

/// Linear congruential generator (Numerical Recipes constants).
/// Not cryptographic; plenty for shuffling tile colors.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        (self.state >> 16) as u32
    }

    /// Uniform value in `0..bound`.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// Rolls new tiles for refills and initial construction.
#[derive(Debug, Clone)]
pub struct TileFactory {
    rng: SimpleRng,
    n_colors: u8,
    bomb_countdown: u8,
    /// When set, the next spawned tile is a bomb instead of a normal tile.
    bomb_armed: bool,
}

impl TileFactory {
    pub fn new(seed: u64, n_colors: u8, bomb_countdown: u8) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            n_colors,
            bomb_countdown,
            bomb_armed: false,
        }
    }

    fn roll_color(&mut self) -> ColorId {
        self.rng.next_below(self.n_colors as u32) as ColorId
    }

    /// A fresh tile. Consumes the armed-bomb flag if set.
    pub fn spawn(&mut self) -> Tile {
        let color = self.roll_color();
        if self.bomb_armed {
            self.bomb_armed = false;
            Tile::bomb(color, self.bomb_countdown)
        } else {
            Tile::normal(color)
        }
    }

    /// Re-roll a tile's color in place, keeping its kind. Used when settling
    /// a freshly built grid.
    pub fn reroll(&mut self, tile: &mut Tile) {
        tile.color = self.roll_color();
    }

    /// The next `spawn` produces a bomb.
    pub fn arm_bomb(&mut self) {
        self.bomb_armed = true;
    }

    pub fn bomb_armed(&self) -> bool {
        self.bomb_armed
    }
}
