//! JSON bodies exchanged with the commitments service.
//!
//! Amounts are dollars as `f64`, already rounded to cents by the service.
//! Checkin `start`/`end` stay as the raw `YYYY-MM-DD HH:MM:SS` strings the
//! service sends; parsing happens at display time.

use serde::{Deserialize, Serialize};

use crate::domain::{CheckinStatus, CommitmentId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyListResponse {
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentSummary {
    pub id: CommitmentId,
    pub name: String,
    pub service: String,
    pub met: bool,
    pub checkin_count: u32,
    pub total_committed: f64,
    pub total_actual: f64,
    pub total_shortfall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyCommitmentsResponse {
    pub company: String,
    pub commitments: Vec<CommitmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentCheckin {
    pub start: String,
    pub end: String,
    pub status: CheckinStatus,
    pub committed_amount: f64,
    pub actual_amount: f64,
    pub shortfall: f64,
    pub surplus: f64,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentDetail {
    pub id: CommitmentId,
    pub name: String,
    pub company: String,
    pub service: String,
    pub met: bool,
    pub total_committed: f64,
    pub total_actual: f64,
    pub total_shortfall: f64,
    /// In the order the service produced them.
    #[serde(default)]
    pub checkins: Vec<CommitmentCheckin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentDetailResponse {
    pub company: String,
    pub commitment: CommitmentDetail,
}
