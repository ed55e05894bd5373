//! Terminal presentation.

pub mod view;
