//! Text rendering of the controller state.

pub mod report;
