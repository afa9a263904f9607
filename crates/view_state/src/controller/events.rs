//! Fetch requests issued by the controller and the results fed back to it.

use client_core::{CommitmentsApi, RequestError};
use shared::{
    domain::CommitmentId,
    protocol::{CommitmentDetail, CommitmentSummary},
};

use super::RequestTicket;

/// A fetch the controller wants performed, tagged with the selection it was
/// issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    Companies {
        ticket: RequestTicket,
    },
    Commitments {
        ticket: RequestTicket,
        company: String,
    },
    Detail {
        ticket: RequestTicket,
        company: String,
        commitment_id: CommitmentId,
    },
}

impl FetchCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Companies { .. } => "list_companies",
            Self::Commitments { .. } => "list_commitments",
            Self::Detail { .. } => "get_commitment_detail",
        }
    }

    pub fn ticket(&self) -> RequestTicket {
        match self {
            Self::Companies { ticket }
            | Self::Commitments { ticket, .. }
            | Self::Detail { ticket, .. } => *ticket,
        }
    }

    /// Performs the round trip. Failures are carried in the outcome, never
    /// returned.
    pub async fn execute<A>(self, api: &A) -> FetchOutcome
    where
        A: CommitmentsApi + ?Sized,
    {
        match self {
            Self::Companies { ticket } => FetchOutcome::Companies {
                ticket,
                result: api.list_companies().await,
            },
            Self::Commitments { ticket, company } => {
                let result = api
                    .list_commitments(&company)
                    .await
                    .map(|response| response.commitments);
                FetchOutcome::Commitments {
                    ticket,
                    company,
                    result,
                }
            }
            Self::Detail {
                ticket,
                company,
                commitment_id,
            } => {
                let result = api
                    .get_commitment_detail(&company, commitment_id)
                    .await
                    .map(|response| response.commitment);
                FetchOutcome::Detail {
                    ticket,
                    company,
                    commitment_id,
                    result,
                }
            }
        }
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Companies {
        ticket: RequestTicket,
        result: Result<Vec<String>, RequestError>,
    },
    Commitments {
        ticket: RequestTicket,
        company: String,
        result: Result<Vec<CommitmentSummary>, RequestError>,
    },
    Detail {
        ticket: RequestTicket,
        company: String,
        commitment_id: CommitmentId,
        result: Result<CommitmentDetail, RequestError>,
    },
}
