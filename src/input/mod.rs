//! Pointer input interpretation.

pub mod gesture;
