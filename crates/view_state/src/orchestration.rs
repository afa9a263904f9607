//! Runs controller fetch commands against a [`CommitmentsApi`] on one task.

use std::sync::Arc;

use client_core::CommitmentsApi;
use futures::{future::BoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};
use shared::domain::CommitmentId;
use tracing::debug;

use crate::{
    controller::{
        events::{FetchCommand, FetchOutcome},
        Controller,
    },
    selection::Selection,
};

/// Owns a [`Controller`] and the fetches it has asked for.
///
/// All in-flight fetches are polled from whichever task calls [`step`] or
/// [`settle`]; nothing is spawned. Completions are applied in the order they
/// finish, and the controller drops the ones a newer selection superseded.
///
/// [`step`]: Orchestrator::step
/// [`settle`]: Orchestrator::settle
pub struct Orchestrator {
    api: Arc<dyn CommitmentsApi>,
    controller: Controller,
    in_flight: FuturesUnordered<BoxFuture<'static, FetchOutcome>>,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn CommitmentsApi>) -> Self {
        let (controller, initial) = Controller::start();
        let mut orchestrator = Self {
            api,
            controller,
            in_flight: FuturesUnordered::new(),
        };
        orchestrator.dispatch(initial);
        orchestrator
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn select_company(&mut self, company: Selection<String>) {
        if let Some(command) = self.controller.select_company(company) {
            self.dispatch(command);
        }
    }

    pub fn select_commitment(&mut self, commitment: Selection<CommitmentId>) {
        if let Some(command) = self.controller.select_commitment(commitment) {
            self.dispatch(command);
        }
    }

    /// Waits for the next fetch to finish and applies it. Returns `false`
    /// once nothing is in flight.
    pub async fn step(&mut self) -> bool {
        let Some(outcome) = self.in_flight.next().await else {
            return false;
        };
        if let Some(command) = self.controller.apply(outcome) {
            self.dispatch(command);
        }
        true
    }

    /// Drives every fetch, including the ones the results cascade into.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    fn dispatch(&mut self, command: FetchCommand) {
        debug!(
            command = command.name(),
            ticket = command.ticket().0,
            "dispatching fetch"
        );
        let api = Arc::clone(&self.api);
        self.in_flight
            .push(async move { command.execute(api.as_ref()).await }.boxed());
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
