//! Core types shared across the application
//! This module contains pure data types and tuning constants with no external dependencies

/// Default grid dimensions
pub const GRID_ROWS: usize = 9;
pub const GRID_COLS: usize = 8;

/// Number of tile colors in the palette
pub const N_COLORS: u8 = 5;

/// Fixed timestep (milliseconds per engine tick)
pub const TICK_MS: u32 = 16;

/// Handle rotation: degrees advanced per tick, degrees per completed turn
pub const SPIN_STEP_DEG: f32 = 10.0;
pub const TURN_DEG: f32 = 120.0;

/// Turn budget for a single spin sequence
pub const MAX_TURNS: u8 = 3;

/// Horizontal distance between adjacent columns, in row units.
/// This is sqrt(3)/2, the width ratio of a unit hexagon.
pub const COLUMN_PITCH: f32 = 0.866_025_4;

/// Gesture thresholds (world units)
pub const MIN_SWIPE_DISTANCE: f32 = 0.15;
pub const OVERLAP_RADIUS: f32 = 0.63;

/// Animation budgets (ticks)
pub const POP_TICKS: u32 = 18;
pub const MIGRATE_TICKS: u32 = 20;

/// Points per popped tile
pub const SCORE_PER_POP: u32 = 5;

/// Bomb tiles: one is armed every `BOMB_SCORE_INTERVAL` points and starts
/// with `BOMB_COUNTDOWN` moves on its fuse.
pub const BOMB_SCORE_INTERVAL: u32 = 1000;
pub const BOMB_COUNTDOWN: u8 = 5;

/// Index into the fixed color palette
pub type ColorId = u8;

/// Spin direction for the selection handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDirection {
    Clockwise,
    CounterClockwise,
}

impl SpinDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpinDirection::Clockwise => "cw",
            SpinDirection::CounterClockwise => "ccw",
        }
    }
}

/// Session configuration.
///
/// Everything here is static for the lifetime of a playthrough; the grid is
/// never resized and the turn budget never changes mid-game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub n_colors: u8,
    pub max_turns: u8,
    pub min_swipe_distance: f32,
    pub overlap_radius: f32,
    pub spin_step_deg: f32,
    pub score_per_pop: u32,
    pub bomb_score_interval: u32,
    pub bomb_countdown: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            n_colors: N_COLORS,
            max_turns: MAX_TURNS,
            min_swipe_distance: MIN_SWIPE_DISTANCE,
            overlap_radius: OVERLAP_RADIUS,
            spin_step_deg: SPIN_STEP_DEG,
            score_per_pop: SCORE_PER_POP,
            bomb_score_interval: BOMB_SCORE_INTERVAL,
            bomb_countdown: BOMB_COUNTDOWN,
        }
    }
}

/// Events dispatched synchronously by the session at well-defined quiescence
/// points and drained by the embedder. This replaces the original's delegate
/// multicast (`scoreChanged`, `moveCountIncreased`, `gameOverTrigger`) with
/// an explicit queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A pop set was found; the tiles are shrinking out.
    TilesPopped { count: u32 },
    /// Score changed (fires once the pop animations complete).
    ScoreChanged { score: u32 },
    /// A full player move registered: the handle sequence ended and the grid
    /// reached quiescence.
    MoveCompleted { moves: u32 },
    /// No legal rotation remains, or a bomb fuse ran out.
    GameOver,
    /// The grid was destroyed and regenerated.
    GridRestarted,
}
