//! Cascading selection/loading state machine.
//!
//! The controller never performs I/O. Selection mutators and
//! [`Controller::apply`] return the next [`FetchCommand`] to run; whoever runs
//! it hands the [`FetchOutcome`] back. Each in-flight command carries a
//! [`RequestTicket`] and the selection it was issued for, and an outcome is
//! only applied while both still match the current state. Superseded
//! responses are dropped, never merged.

pub mod events;

use shared::{
    domain::CommitmentId,
    protocol::{CommitmentCheckin, CommitmentDetail, CommitmentSummary},
};
use tracing::{debug, info, warn};

use client_core::RequestError;

use crate::{derived, selection::Selection};
use events::{FetchCommand, FetchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum StageState<T> {
    Idle,
    Loading { ticket: RequestTicket },
    Ready(T),
    Failed,
}

impl<T> StageState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    fn is_awaiting(&self, ticket: RequestTicket) -> bool {
        matches!(self, Self::Loading { ticket: pending } if *pending == ticket)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Companies,
    Commitments,
    Detail,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Commitments => "commitments",
            Self::Detail => "detail",
        }
    }

    /// Shown when the failure carried no message of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Companies => "Failed to load companies",
            Self::Commitments => "Failed to load commitments",
            Self::Detail => "Failed to load commitment detail",
        }
    }
}

/// The single error shown to the user. Only the latest failure is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub stage: Stage,
    pub message: String,
}

#[derive(Debug)]
pub struct Controller {
    last_ticket: u64,
    companies: StageState<Vec<String>>,
    commitments: StageState<Vec<CommitmentSummary>>,
    detail: StageState<CommitmentDetail>,
    selected_company: Selection<String>,
    selected_commitment: Selection<CommitmentId>,
    error: Option<ErrorNotice>,
}

impl Controller {
    /// Builds the controller with the companies stage already loading and
    /// returns the command that loads it.
    pub fn start() -> (Self, FetchCommand) {
        let mut controller = Self {
            last_ticket: 0,
            companies: StageState::Idle,
            commitments: StageState::Idle,
            detail: StageState::Idle,
            selected_company: Selection::Unselected,
            selected_commitment: Selection::Unselected,
            error: None,
        };
        let ticket = controller.begin_fetch();
        controller.companies = StageState::Loading { ticket };
        (controller, FetchCommand::Companies { ticket })
    }

    pub fn companies(&self) -> &[String] {
        self.companies.ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn selected_company(&self) -> &Selection<String> {
        &self.selected_company
    }

    pub fn commitments(&self) -> &[CommitmentSummary] {
        self.commitments.ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn selected_commitment(&self) -> Selection<CommitmentId> {
        self.selected_commitment
    }

    pub fn detail(&self) -> Option<&CommitmentDetail> {
        self.detail.ready()
    }

    pub fn is_loading_companies(&self) -> bool {
        self.companies.is_loading()
    }

    pub fn is_loading_commitments(&self) -> bool {
        self.commitments.is_loading()
    }

    pub fn is_loading_detail(&self) -> bool {
        self.detail.is_loading()
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn current_summary(&self) -> Option<&CommitmentSummary> {
        derived::current_summary(self.commitments(), &self.selected_commitment)
    }

    pub fn sorted_checkins(&self) -> Vec<&CommitmentCheckin> {
        self.detail()
            .map(|detail| derived::sorted_checkins(&detail.checkins))
            .unwrap_or_default()
    }

    pub fn has_unmet_checkins(&self) -> bool {
        derived::has_unmet_checkins(self.sorted_checkins())
    }

    /// Switches company. Commitments, the commitment selection and the
    /// detail are cleared before the new commitments command is returned.
    /// Re-selecting the current company does nothing.
    pub fn select_company(&mut self, company: Selection<String>) -> Option<FetchCommand> {
        if self.selected_company == company {
            return None;
        }
        self.selected_company = company;
        self.commitments = StageState::Idle;
        self.selected_commitment = Selection::Unselected;
        self.detail = StageState::Idle;

        let Selection::Selected(company) = self.selected_company.clone() else {
            debug!("company selection cleared");
            return None;
        };
        let ticket = self.begin_fetch();
        self.commitments = StageState::Loading { ticket };
        Some(FetchCommand::Commitments { ticket, company })
    }

    /// Switches commitment. The detail is cleared before the new detail
    /// command is returned. Re-selecting the current commitment does nothing.
    pub fn select_commitment(
        &mut self,
        commitment: Selection<CommitmentId>,
    ) -> Option<FetchCommand> {
        if self.selected_commitment == commitment {
            return None;
        }
        self.selected_commitment = commitment;
        self.detail = StageState::Idle;

        let (Selection::Selected(company), Selection::Selected(commitment_id)) =
            (self.selected_company.clone(), self.selected_commitment)
        else {
            return None;
        };
        let ticket = self.begin_fetch();
        self.detail = StageState::Loading { ticket };
        Some(FetchCommand::Detail {
            ticket,
            company,
            commitment_id,
        })
    }

    /// Applies a finished fetch and returns the follow-on fetch, if the
    /// result moved a selection.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Option<FetchCommand> {
        match outcome {
            FetchOutcome::Companies { ticket, result } => self.on_companies(ticket, result),
            FetchOutcome::Commitments {
                ticket,
                company,
                result,
            } => self.on_commitments(ticket, &company, result),
            FetchOutcome::Detail {
                ticket,
                company,
                commitment_id,
                result,
            } => self.on_detail(ticket, &company, commitment_id, result),
        }
    }

    fn on_companies(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<String>, RequestError>,
    ) -> Option<FetchCommand> {
        if !self.companies.is_awaiting(ticket) {
            debug!(ticket = ticket.0, "discarding stale companies response");
            return None;
        }
        match result {
            Ok(companies) => {
                info!(count = companies.len(), "companies loaded");
                let first = companies.first().cloned();
                self.companies = StageState::Ready(companies);
                self.select_company(first.into())
            }
            Err(err) => {
                self.companies = StageState::Failed;
                self.fail(Stage::Companies, &err);
                None
            }
        }
    }

    fn on_commitments(
        &mut self,
        ticket: RequestTicket,
        company: &str,
        result: Result<Vec<CommitmentSummary>, RequestError>,
    ) -> Option<FetchCommand> {
        if !self.commitments.is_awaiting(ticket) || !self.selected_company.is(company) {
            debug!(ticket = ticket.0, company, "discarding stale commitments response");
            return None;
        }
        match result {
            Ok(commitments) => {
                info!(company, count = commitments.len(), "commitments loaded");
                let first = commitments.first().map(|summary| summary.id);
                self.commitments = StageState::Ready(commitments);
                self.select_commitment(first.into())
            }
            Err(err) => {
                self.commitments = StageState::Failed;
                self.selected_commitment = Selection::Unselected;
                self.detail = StageState::Idle;
                self.fail(Stage::Commitments, &err);
                None
            }
        }
    }

    fn on_detail(
        &mut self,
        ticket: RequestTicket,
        company: &str,
        commitment_id: CommitmentId,
        result: Result<CommitmentDetail, RequestError>,
    ) -> Option<FetchCommand> {
        if !self.detail.is_awaiting(ticket)
            || !self.selected_company.is(company)
            || !self.selected_commitment.is(&commitment_id)
        {
            debug!(
                ticket = ticket.0,
                company,
                commitment_id = commitment_id.0,
                "discarding stale commitment detail response"
            );
            return None;
        }
        match result {
            Ok(detail) => {
                info!(
                    company,
                    commitment_id = commitment_id.0,
                    checkins = detail.checkins.len(),
                    "commitment detail loaded"
                );
                self.detail = StageState::Ready(detail);
            }
            Err(err) => {
                self.detail = StageState::Failed;
                self.fail(Stage::Detail, &err);
            }
        }
        None
    }

    /// Every new fetch clears the shown error.
    fn begin_fetch(&mut self) -> RequestTicket {
        self.error = None;
        self.last_ticket += 1;
        RequestTicket(self.last_ticket)
    }

    fn fail(&mut self, stage: Stage, err: &RequestError) {
        warn!(stage = stage.as_str(), "stage failed: {err}");
        let message = err
            .server_message()
            .unwrap_or_else(|| stage.fallback_message())
            .to_string();
        self.error = Some(ErrorNotice { stage, message });
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
