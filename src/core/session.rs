//! Game session orchestration
//!
//! `GameSession` owns every piece of game state explicitly: grid, factory,
//! handle, input gate, animation scheduler, score, move count, and the
//! pending event queue. There are no globals; the embedder drives the
//! session with pointer events and a fixed tick, and drains events after
//! each tick.
//!
//! The tick pipeline is strictly ordered: finish animations (and bank their
//! scores), advance the spin, continue a pending cascade, then check for
//! quiescence. A player move registers only at quiescence, which is also the
//! only point where bombs count down, input unlocks, and the game-over
//! check runs.

use std::collections::VecDeque;

use glam::Vec2;

use crate::core::animate::{Scheduler, Visual};
use crate::core::cascade::{resolve_once, settle_in_place, ResolveOutcome, TileMove, TileSpawn};
use crate::core::factory::TileFactory;
use crate::core::grid::{Coord, HexGrid, Tile, TileKind};
use crate::core::handle::SelectionHandle;
use crate::core::matching::has_legal_moves;
use crate::input::gesture::{classify, Gesture};
use crate::types::{GameConfig, GameEvent};

/// Explicit input lock. Locked while a spin or cascade is in flight and
/// after game over; gestures arriving while locked are dropped.
#[derive(Debug, Default)]
pub struct InputGate {
    locked: bool,
}

impl InputGate {
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// One playthrough: grid, handle, score, and the rules that connect them.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    grid: HexGrid,
    factory: TileFactory,
    handle: SelectionHandle,
    gate: InputGate,
    scheduler: Scheduler,
    events: VecDeque<GameEvent>,
    score: u32,
    moves: u32,
    /// Bombs armed so far via the score threshold.
    bombs_generated: u32,
    /// A pop chain is still producing steps.
    cascading: bool,
    /// The handle sequence ended; a move registers at the next quiescence.
    move_pending: bool,
    game_over: bool,
}

impl GameSession {
    /// Fresh session with a generated, settled grid.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut factory = TileFactory::new(seed, config.n_colors, config.bomb_countdown);
        let grid = Self::build_grid(&config, &mut factory);
        Self::assemble(config, factory, grid)
    }

    /// Session over a caller-supplied grid. The grid is taken as-is, with
    /// no settling pass.
    pub fn with_grid(config: GameConfig, seed: u64, grid: HexGrid) -> Self {
        debug_assert!(grid.rows() == config.rows && grid.cols() == config.cols);
        let factory = TileFactory::new(seed, config.n_colors, config.bomb_countdown);
        Self::assemble(config, factory, grid)
    }

    fn assemble(config: GameConfig, factory: TileFactory, grid: HexGrid) -> Self {
        let handle = SelectionHandle::new(&config);
        Self {
            config,
            grid,
            factory,
            handle,
            gate: InputGate::default(),
            scheduler: Scheduler::new(),
            events: VecDeque::new(),
            score: 0,
            moves: 0,
            bombs_generated: 0,
            cascading: false,
            move_pending: false,
            game_over: false,
        }
    }

    fn build_grid(config: &GameConfig, factory: &mut TileFactory) -> HexGrid {
        let mut grid = HexGrid::from_fn(config.rows, config.cols, |_| Some(factory.spawn()));
        settle_in_place(&mut grid, factory);
        grid
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn handle(&self) -> &SelectionHandle {
        &self.handle
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn input_locked(&self) -> bool {
        self.gate.is_locked()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// A completed press/release pair in world coordinates.
    pub fn pointer_up(&mut self, down: Vec2, up: Vec2) {
        if self.gate.is_locked() {
            return;
        }
        // A handle that is decommissioned (or idle) cannot be torqued, so
        // the classifier sees no anchor and everything becomes a tap.
        let anchor = if self.handle.accepts_spin() {
            self.handle.anchor()
        } else {
            None
        };
        if let Some(gesture) = classify(down, up, anchor, self.config.min_swipe_distance) {
            self.apply_gesture(gesture);
        }
    }

    /// Feed an already-classified gesture.
    pub fn apply_gesture(&mut self, gesture: Gesture) {
        if self.gate.is_locked() {
            return;
        }
        match gesture {
            Gesture::Tap { at } => {
                self.handle.try_lock(&self.grid, at);
            }
            Gesture::Spin(direction) => {
                if self.handle.start_spin(direction) {
                    self.gate.lock();
                }
            }
        }
    }

    /// Advance the session one fixed tick.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }

        self.finish_visuals();
        self.advance_spin();
        self.continue_cascade();

        let quiescent = self.move_pending && !self.cascading && self.scheduler.is_idle();
        if quiescent {
            self.register_move();
        }
    }

    /// Restart the playthrough: new settled grid, everything reset.
    pub fn restart(&mut self) {
        self.grid = Self::build_grid(&self.config, &mut self.factory);
        self.handle = SelectionHandle::new(&self.config);
        self.scheduler = Scheduler::new();
        self.score = 0;
        self.moves = 0;
        self.bombs_generated = 0;
        self.cascading = false;
        self.move_pending = false;
        self.game_over = false;
        self.gate.unlock();
        self.events.push_back(GameEvent::GridRestarted);
    }

    /// Retire finished animation tickets. Pops bank their points here, once
    /// the tile has visually shrunk away, and score crossings arm bombs.
    fn finish_visuals(&mut self) {
        let mut pops_done = 0u32;
        for visual in self.scheduler.tick() {
            if matches!(visual, Visual::Pop { .. }) {
                pops_done += 1;
            }
        }
        if pops_done == 0 {
            return;
        }
        self.score += pops_done * self.config.score_per_pop;
        self.events
            .push_back(GameEvent::ScoreChanged { score: self.score });
        while self.score / self.config.bomb_score_interval > self.bombs_generated {
            self.factory.arm_bomb();
            self.bombs_generated += 1;
        }
    }

    /// Step the spin angle; on a completed turn, permute the tiles and run
    /// the pop verdict that decides how the sequence continues.
    fn advance_spin(&mut self) {
        if !self.handle.tick_spin() {
            return;
        }
        self.handle.apply_turn(&mut self.grid);
        match resolve_once(&mut self.grid, &mut self.factory) {
            ResolveOutcome::Step {
                popped,
                moves,
                spawns,
            } => {
                // A pop ends the sequence no matter how many turns remain.
                self.schedule_step(popped, moves, spawns);
                self.handle.decommission();
                self.cascading = true;
                self.move_pending = true;
            }
            ResolveOutcome::Settled => {
                if self.handle.turns_remaining() {
                    self.handle.resume_spin();
                } else {
                    self.handle.finish_sequence();
                    self.move_pending = true;
                }
            }
        }
    }

    /// Once the previous step's visuals drain, look for follow-up matches.
    fn continue_cascade(&mut self) {
        if !self.cascading || !self.scheduler.is_idle() {
            return;
        }
        match resolve_once(&mut self.grid, &mut self.factory) {
            ResolveOutcome::Step {
                popped,
                moves,
                spawns,
            } => self.schedule_step(popped, moves, spawns),
            ResolveOutcome::Settled => self.cascading = false,
        }
    }

    fn schedule_step(
        &mut self,
        popped: Vec<(Coord, Tile)>,
        moves: Vec<TileMove>,
        spawns: Vec<TileSpawn>,
    ) {
        self.events.push_back(GameEvent::TilesPopped {
            count: popped.len() as u32,
        });
        for (coord, tile) in popped {
            self.scheduler.schedule_pop(coord, tile);
        }
        for mv in moves {
            if let Some(tile) = self.grid.get(mv.to) {
                self.scheduler
                    .schedule_migrate(tile, HexGrid::cell_center(mv.from), mv.to);
            }
        }
        for spawn in spawns {
            self.scheduler
                .schedule_migrate(spawn.tile, spawn.from_world, spawn.at);
        }
    }

    /// The grid reached quiescence after a handle sequence: count the move,
    /// burn bomb fuses, and decide whether play continues.
    fn register_move(&mut self) {
        self.move_pending = false;
        self.moves += 1;
        self.events.push_back(GameEvent::MoveCompleted { moves: self.moves });

        let mut detonated = false;
        let coords: Vec<_> = self.grid.coords().collect();
        for coord in coords {
            if let Some(tile) = self.grid.get_mut(coord) {
                if let TileKind::Bomb { countdown, fresh } = &mut tile.kind {
                    if *fresh {
                        // A bomb sits out the move it arrived on.
                        *fresh = false;
                    } else {
                        *countdown = countdown.saturating_sub(1);
                        if *countdown == 0 {
                            detonated = true;
                        }
                    }
                }
            }
        }

        if detonated || !has_legal_moves(&self.grid) {
            self.game_over = true;
            self.gate.lock();
            self.events.push_back(GameEvent::GameOver);
        } else {
            self.gate.unlock();
        }
    }
}
