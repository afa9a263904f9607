use std::fmt;

use shared::protocol::{CommitmentCheckin, CommitmentDetail, CommitmentSummary};
use view_state::{
    derived::{checkin_delta, summary_delta, StatusBadge},
    format::{format_checkin_period, format_currency},
    Controller,
};

pub const UNMET_WARNING: &str =
    "Warning: You have unmet commitments. Review the missed checkins below.";

/// Full-screen text rendering of one controller snapshot.
pub struct Report<'a> {
    controller: &'a Controller,
}

impl<'a> Report<'a> {
    pub fn new(controller: &'a Controller) -> Self {
        Self { controller }
    }

    fn companies(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controller = self.controller;
        writeln!(f, "Company")?;
        if controller.is_loading_companies() {
            return writeln!(f, "  Loading companies...");
        }
        if controller.companies().is_empty() {
            return writeln!(f, "  No companies available");
        }
        for company in controller.companies() {
            let marker = if controller.selected_company().is(company) {
                ">"
            } else {
                " "
            };
            writeln!(f, "  {marker} {company}")?;
        }
        Ok(())
    }

    fn commitments(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controller = self.controller;
        writeln!(f, "Commitments")?;
        if controller.is_loading_commitments() {
            return writeln!(f, "  Loading commitments...");
        }
        if controller.commitments().is_empty() {
            return writeln!(f, "  No commitments for this company.");
        }
        for commitment in controller.commitments() {
            let selected = controller.selected_commitment().is(&commitment.id);
            write_commitment_entry(f, commitment, selected)?;
        }
        Ok(())
    }

    fn detail(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controller = self.controller;
        writeln!(f, "Commitment Detail")?;
        if controller.current_summary().is_none() {
            return writeln!(f, "  Select a commitment to view details.");
        }
        if controller.is_loading_detail() {
            return writeln!(f, "  Loading commitment detail...");
        }
        let Some(detail) = controller.detail() else {
            return writeln!(f, "  No commitment detail available.");
        };

        write_detail_header(f, detail)?;
        if controller.has_unmet_checkins() {
            writeln!(f, "  {UNMET_WARNING}")?;
        }
        writeln!(f)?;
        writeln!(f, "  Checkin Details")?;
        writeln!(
            f,
            "  {:<18}{:>14}{:>14}  {}",
            "Period", "Committed", "Actual", "Status"
        )?;
        for checkin in controller.sorted_checkins() {
            write_checkin_row(f, checkin)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Contract Commitment Analyzer")?;
        writeln!(
            f,
            "Compare committed AWS spend against actual spend by company and period."
        )?;
        writeln!(f)?;
        if let Some(error) = self.controller.error() {
            writeln!(f, "[alert] {}", error.message)?;
            writeln!(f)?;
        }
        self.companies(f)?;
        writeln!(f)?;
        self.commitments(f)?;
        writeln!(f)?;
        self.detail(f)
    }
}

fn badge(delta: f64) -> String {
    format!(
        "{} {}",
        StatusBadge::for_delta(delta).label(),
        format_currency(delta)
    )
}

fn write_commitment_entry(
    f: &mut fmt::Formatter<'_>,
    commitment: &CommitmentSummary,
    selected: bool,
) -> fmt::Result {
    let marker = if selected { ">" } else { " " };
    writeln!(f, "  {marker} {}", commitment.name)?;
    writeln!(f, "      Service: {}", commitment.service)?;
    writeln!(
        f,
        "      Status: {}",
        if commitment.met { "Met" } else { "Missed" }
    )?;
    writeln!(f, "      {}", badge(summary_delta(commitment)))
}

fn write_detail_header(f: &mut fmt::Formatter<'_>, detail: &CommitmentDetail) -> fmt::Result {
    writeln!(f, "  {} ({})", detail.name, detail.service)?;
    writeln!(
        f,
        "  Total Committed: {} | Total Actual: {} | Total Shortfall: {}",
        format_currency(detail.total_committed),
        format_currency(detail.total_actual),
        format_currency(detail.total_shortfall)
    )
}

fn write_checkin_row(f: &mut fmt::Formatter<'_>, checkin: &CommitmentCheckin) -> fmt::Result {
    writeln!(
        f,
        "  {:<18}{:>14}{:>14}  {} ({})",
        format_checkin_period(&checkin.start),
        format_currency(checkin.committed_amount),
        format_currency(checkin.actual_amount),
        badge(checkin_delta(checkin)),
        checkin.status
    )
}
