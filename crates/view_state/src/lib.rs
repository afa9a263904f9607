//! Client-side state for the commitment analyzer: formatting, derived
//! values, and the cascading companies → commitments → detail controller.

pub mod controller;
pub mod derived;
pub mod format;
pub mod orchestration;
pub mod selection;

pub use controller::{
    events::{FetchCommand, FetchOutcome},
    Controller, ErrorNotice, RequestTicket, Stage, StageState,
};
pub use orchestration::Orchestrator;
pub use selection::Selection;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;
