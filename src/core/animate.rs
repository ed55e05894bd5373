//! Tick-driven animation scheduler
//!
//! In-flight visuals are explicit tickets with fixed tick budgets instead of
//! per-entity polled flags. The session gates match scans and input
//! unlocking on the scheduler draining; the view reads ticket progress to
//! interpolate positions and scales. The logical grid is always ahead of the
//! visuals: tiles move or vanish in the grid the moment a cascade step runs,
//! and the tickets only describe what the player still sees in motion.

use glam::Vec2;

use crate::core::grid::{Coord, Tile};
use crate::types::{MIGRATE_TICKS, POP_TICKS};

/// What a ticket animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    /// A popped tile shrinking out at its old cell.
    Pop { at: Coord, tile: Tile },
    /// A tile gliding from a world position to its target cell.
    Migrate { tile: Tile, from: Vec2, target: Coord },
}

/// One in-flight visual with its remaining budget.
#[derive(Debug, Clone, Copy)]
pub struct Ticket {
    pub visual: Visual,
    elapsed: u32,
    budget: u32,
}

impl Ticket {
    /// Completion fraction in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.elapsed as f32 / self.budget as f32
    }
}

/// All visuals currently in flight.
#[derive(Debug, Default)]
pub struct Scheduler {
    tickets: Vec<Ticket>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_pop(&mut self, at: Coord, tile: Tile) {
        self.tickets.push(Ticket {
            visual: Visual::Pop { at, tile },
            elapsed: 0,
            budget: POP_TICKS,
        });
    }

    pub fn schedule_migrate(&mut self, tile: Tile, from: Vec2, target: Coord) {
        self.tickets.push(Ticket {
            visual: Visual::Migrate { tile, from, target },
            elapsed: 0,
            budget: MIGRATE_TICKS,
        });
    }

    /// Advance every ticket one tick and return the visuals that finished.
    pub fn tick(&mut self) -> Vec<Visual> {
        let mut finished = Vec::new();
        self.tickets.retain_mut(|t| {
            t.elapsed += 1;
            if t.elapsed >= t.budget {
                finished.push(t.visual);
                false
            } else {
                true
            }
        });
        finished
    }

    pub fn is_idle(&self) -> bool {
        self.tickets.is_empty()
    }

    /// In-flight tickets, for the view.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_finishes_after_budget() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_pop(Coord::new(0, 0), Tile::normal(1));
        for _ in 0..POP_TICKS - 1 {
            assert!(scheduler.tick().is_empty());
            assert!(!scheduler.is_idle());
        }
        let finished = scheduler.tick();
        assert_eq!(finished.len(), 1);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_progress_advances_monotonically() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_migrate(Tile::normal(0), Vec2::new(0.0, -1.0), Coord::new(0, 0));
        let mut last = -1.0f32;
        for _ in 0..MIGRATE_TICKS - 1 {
            scheduler.tick();
            let p = scheduler.tickets()[0].progress();
            assert!(p > last);
            assert!(p < 1.0);
            last = p;
        }
    }

    #[test]
    fn test_mixed_budgets_finish_independently() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_pop(Coord::new(0, 0), Tile::normal(1));
        scheduler.schedule_migrate(Tile::normal(2), Vec2::ZERO, Coord::new(1, 0));
        let mut finished = 0;
        for _ in 0..MIGRATE_TICKS {
            finished += scheduler.tick().len();
        }
        assert_eq!(finished, 2);
        assert!(scheduler.is_idle());
    }
}
