//! The rotating selection handle
//!
//! The handle grabs three mutually adjacent tiles and spins them through
//! 120-degree turns. Its life cycle is an explicit state machine; every
//! transition is driven by the session, so there is exactly one place where
//! each rule (turn budget, pop decommission, relock) is applied.
//!
//! ```text
//! Idle -> Locked -> Spinning -> BetweenTurns -> Spinning      (turns left)
//!                                            -> Locked        (budget spent)
//!                                            -> Decommissioned (popped)
//! ```

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::core::grid::{Coord, HexGrid};
use crate::types::{GameConfig, SpinDirection, TURN_DEG};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// No selection.
    Idle,
    /// Holding three cells, ready to spin or relocate.
    Locked,
    /// Mid-turn; the angle accumulates each tick.
    Spinning,
    /// A turn just completed; waiting for the pop verdict.
    BetweenTurns,
    /// The selection dissolved after a pop. Terminal until the next lock.
    Decommissioned,
}

#[derive(Debug, Clone)]
pub struct SelectionHandle {
    state: HandleState,
    /// The held cells, ordered clockwise around their centroid. Only
    /// meaningful outside `Idle`.
    cells: [Coord; 3],
    anchor: Vec2,
    direction: SpinDirection,
    angle_deg: f32,
    turns_done: u8,
    spin_step_deg: f32,
    max_turns: u8,
    overlap_radius: f32,
}

impl SelectionHandle {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: HandleState::Idle,
            cells: [Coord::new(0, 0); 3],
            anchor: Vec2::ZERO,
            direction: SpinDirection::Clockwise,
            angle_deg: 0.0,
            turns_done: 0,
            spin_step_deg: config.spin_step_deg,
            max_turns: config.max_turns,
            overlap_radius: config.overlap_radius,
        }
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    /// The held triplet, when there is one.
    pub fn cells(&self) -> Option<&[Coord; 3]> {
        match self.state {
            HandleState::Idle => None,
            _ => Some(&self.cells),
        }
    }

    /// Centroid of the held cells; the swipe lever arm pivots here.
    pub fn anchor(&self) -> Option<Vec2> {
        match self.state {
            HandleState::Idle => None,
            _ => Some(self.anchor),
        }
    }

    /// True when a swipe may start a spin.
    pub fn accepts_spin(&self) -> bool {
        self.state == HandleState::Locked
    }

    pub fn spin_angle(&self) -> f32 {
        self.angle_deg
    }

    pub fn direction(&self) -> SpinDirection {
        self.direction
    }

    pub fn turns_done(&self) -> u8 {
        self.turns_done
    }

    /// Lock (or relocate) onto the three nearest occupied cells around
    /// `point`. Fewer than three cells within the overlap radius, or a
    /// nearest-three that is not mutually adjacent, leaves the handle as it
    /// was and returns false.
    pub fn try_lock(&mut self, grid: &HexGrid, point: Vec2) -> bool {
        if matches!(self.state, HandleState::Spinning | HandleState::BetweenTurns) {
            return false;
        }

        // Candidates in scan order; the stable sort keeps scan order as the
        // distance tiebreaker.
        let mut candidates: Vec<(Coord, f32)> = grid
            .coords()
            .filter(|&c| grid.get(c).is_some())
            .map(|c| (c, HexGrid::cell_center(c).distance(point)))
            .filter(|&(_, d)| d <= self.overlap_radius)
            .collect();
        if candidates.len() < 3 {
            return false;
        }
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        let picked: ArrayVec<Coord, 3> = candidates.iter().take(3).map(|&(c, _)| c).collect();
        let mutually_adjacent = HexGrid::are_adjacent(picked[0], picked[1])
            && HexGrid::are_adjacent(picked[1], picked[2])
            && HexGrid::are_adjacent(picked[0], picked[2]);
        if !mutually_adjacent {
            return false;
        }

        let centroid = picked
            .iter()
            .map(|&c| HexGrid::cell_center(c))
            .fold(Vec2::ZERO, |acc, p| acc + p)
            / 3.0;
        let mut cells = [picked[0], picked[1], picked[2]];
        // Clockwise on screen: y grows downward, so ascending atan2 walks
        // the cells clockwise as the player sees them.
        cells.sort_by(|&a, &b| {
            let pa = HexGrid::cell_center(a) - centroid;
            let pb = HexGrid::cell_center(b) - centroid;
            pa.y.atan2(pa.x).total_cmp(&pb.y.atan2(pb.x))
        });

        self.cells = cells;
        self.anchor = centroid;
        self.state = HandleState::Locked;
        self.angle_deg = 0.0;
        self.turns_done = 0;
        true
    }

    /// Begin a spin sequence. Only valid from `Locked`.
    pub fn start_spin(&mut self, direction: SpinDirection) -> bool {
        if self.state != HandleState::Locked {
            return false;
        }
        self.direction = direction;
        self.angle_deg = 0.0;
        self.turns_done = 0;
        self.state = HandleState::Spinning;
        true
    }

    /// Advance the spin angle one tick. Returns true when a full turn
    /// completes; the handle then waits in `BetweenTurns` for the verdict.
    pub fn tick_spin(&mut self) -> bool {
        if self.state != HandleState::Spinning {
            return false;
        }
        self.angle_deg += self.spin_step_deg;
        if self.angle_deg >= TURN_DEG {
            // Overshoot is discarded; turns are exact 120-degree steps.
            self.angle_deg = 0.0;
            self.turns_done += 1;
            self.state = HandleState::BetweenTurns;
            return true;
        }
        false
    }

    /// Cyclically permute the held tiles one step in the spin direction.
    /// Cells are ordered clockwise, so a clockwise turn moves each tile to
    /// the next cell in that order.
    pub fn apply_turn(&self, grid: &mut HexGrid) {
        debug_assert!(self.state == HandleState::BetweenTurns);
        let tiles = self.cells.map(|c| grid.take(c));
        let shift = match self.direction {
            SpinDirection::Clockwise => 1,
            SpinDirection::CounterClockwise => 2,
        };
        for (i, tile) in tiles.into_iter().enumerate() {
            debug_assert!(tile.is_some(), "handle held an empty cell");
            grid.set(self.cells[(i + shift) % 3], tile);
        }
    }

    /// More turns left in the budget?
    pub fn turns_remaining(&self) -> bool {
        self.turns_done < self.max_turns
    }

    /// Continue into the next turn of the sequence.
    pub fn resume_spin(&mut self) {
        debug_assert!(self.state == HandleState::BetweenTurns);
        self.state = HandleState::Spinning;
    }

    /// End the sequence with the selection intact.
    pub fn finish_sequence(&mut self) {
        debug_assert!(self.state == HandleState::BetweenTurns);
        self.state = HandleState::Locked;
        self.angle_deg = 0.0;
    }

    /// Dissolve the selection after a pop consumed part of it.
    pub fn decommission(&mut self) {
        self.state = HandleState::Decommissioned;
        self.angle_deg = 0.0;
    }
}
