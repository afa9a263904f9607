//! Values computed from controller state on every read.

use shared::{
    domain::CommitmentId,
    protocol::{CommitmentCheckin, CommitmentSummary},
};

use crate::{format::parse_checkin_start, selection::Selection};

pub fn current_summary<'a>(
    commitments: &'a [CommitmentSummary],
    selected: &Selection<CommitmentId>,
) -> Option<&'a CommitmentSummary> {
    commitments.iter().find(|summary| selected.is(&summary.id))
}

/// Newest start first. Checkins whose start does not parse go last and keep
/// their arrival order.
pub fn sorted_checkins(checkins: &[CommitmentCheckin]) -> Vec<&CommitmentCheckin> {
    let mut keyed: Vec<_> = checkins
        .iter()
        .map(|checkin| (parse_checkin_start(&checkin.start), checkin))
        .collect();
    // `None` orders below every timestamp, so a descending sort puts it last.
    keyed.sort_by(|(left, _), (right, _)| right.cmp(left));
    keyed.into_iter().map(|(_, checkin)| checkin).collect()
}

pub fn has_unmet_checkins<'a>(checkins: impl IntoIterator<Item = &'a CommitmentCheckin>) -> bool {
    checkins.into_iter().any(|checkin| !checkin.met)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Met,
    Shortfall,
}

impl StatusBadge {
    pub fn for_delta(delta: f64) -> Self {
        if delta < 0.0 {
            Self::Shortfall
        } else {
            Self::Met
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Met => "Met",
            Self::Shortfall => "Shortfall",
        }
    }
}

pub fn checkin_delta(checkin: &CommitmentCheckin) -> f64 {
    checkin.actual_amount - checkin.committed_amount
}

/// The service's `met` flag is authoritative at summary level.
pub fn summary_delta(summary: &CommitmentSummary) -> f64 {
    if summary.met {
        0.0
    } else {
        -summary.total_shortfall
    }
}
