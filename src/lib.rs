//! hexpop - a hexagonal-grid tile-matching puzzle engine
//!
//! Tiles sit on a honeycomb with odd columns shifted down half a cell. The
//! player taps to lock a rotating handle onto three mutually adjacent tiles
//! and swipes to spin them through 120-degree turns; three same-colored
//! mutually adjacent tiles pop, columns compact under gravity, fresh tiles
//! fall in from above, and the game ends when no rotation can produce
//! another match (or a bomb fuse runs out).
//!
//! The core is pure and tick-driven with seeded randomness, so a session
//! replays identically for a given seed. The `term` module is a thin
//! crossterm front end over it.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
