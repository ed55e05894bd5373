//! Pure, deterministic game logic. No I/O, no wall-clock time; everything
//! advances on explicit ticks and all randomness is seeded.

pub mod animate;
pub mod cascade;
pub mod factory;
pub mod grid;
pub mod handle;
pub mod matching;
pub mod session;
