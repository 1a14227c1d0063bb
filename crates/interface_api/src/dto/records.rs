//! Records DTOs

use serde::{Deserialize, Serialize};

use domain_claims::{ClaimRecord, ClaimsOutcome, ClaimsTable, ErrorDescriptor, RecordsView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Records,
    Error,
    NoContent,
}

impl From<&ClaimsOutcome> for OutcomeKind {
    fn from(outcome: &ClaimsOutcome) -> Self {
        match outcome {
            ClaimsOutcome::Records(_) => OutcomeKind::Records,
            ClaimsOutcome::Error(_) => OutcomeKind::Error,
            ClaimsOutcome::NoContent => OutcomeKind::NoContent,
        }
    }
}

/// Normalized benefits, ready for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub outcome: OutcomeKind,
    pub records: Vec<ClaimRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<ErrorDescriptor>,
    pub table: ClaimsTable,
}

impl From<ClaimsOutcome> for RecordsResponse {
    fn from(outcome: ClaimsOutcome) -> Self {
        let kind = OutcomeKind::from(&outcome);
        let view = RecordsView::from_outcome(outcome);
        let table = view.table();

        Self {
            outcome: kind,
            records: view.records,
            message: view.message,
            table,
        }
    }
}
