//! Records view state and the claims table model
//!
//! `RecordsView` holds what the claims panel currently shows. Each fetch
//! produces a [`ClaimsOutcome`] that is applied to the view:
//!
//! - `Records` replaces the rows
//! - `Error` sets the error message, which then takes precedence over rows
//! - `NoContent` changes nothing; the previous display stays on screen

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::normalizer::ClaimsOutcome;
use crate::record::{ClaimRecord, ErrorDescriptor};

pub const RECORDS_CAPTION: &str = "Medicare Prescription Drug Claims Data";
pub const RECORDS_COLUMNS: [&str; 3] = ["NDC Code", "Prescription Drug Name", "Cost"];
pub const ERROR_CAPTION: &str = "Error Response";
pub const ERROR_COLUMNS: [&str; 2] = ["Type", "Content"];

/// Display state of the claims panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsView {
    pub records: Vec<ClaimRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<ErrorDescriptor>,
}

impl RecordsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the view a freshly mounted panel shows after one fetch
    pub fn from_outcome(outcome: ClaimsOutcome) -> Self {
        let mut view = Self::new();
        view.apply(outcome);
        view
    }

    /// Applies the outcome of a fetch
    pub fn apply(&mut self, outcome: ClaimsOutcome) {
        match outcome {
            ClaimsOutcome::Records(records) => self.records = records,
            ClaimsOutcome::Error(descriptor) => self.message = Some(descriptor),
            ClaimsOutcome::NoContent => {
                warn!(
                    shown_records = self.records.len(),
                    "Benefits response had no entries and no message; keeping previous display"
                );
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.message.is_some()
    }

    /// Renders the table the panel displays
    pub fn table(&self) -> ClaimsTable {
        match &self.message {
            Some(descriptor) => ClaimsTable {
                caption: ERROR_CAPTION.to_string(),
                columns: ERROR_COLUMNS.iter().map(|c| c.to_string()).collect(),
                rows: vec![TableRow {
                    key: descriptor.kind.clone(),
                    cells: vec![descriptor.kind.clone(), descriptor.content.clone()],
                }],
            },
            None => ClaimsTable {
                caption: RECORDS_CAPTION.to_string(),
                columns: RECORDS_COLUMNS.iter().map(|c| c.to_string()).collect(),
                rows: self
                    .records
                    .iter()
                    .map(|record| TableRow {
                        key: record.id.clone(),
                        cells: vec![
                            record.code.clone(),
                            record.display.clone(),
                            record.amount.cost_label(),
                        ],
                    })
                    .collect(),
            },
        }
    }
}

/// Presentational model of the claims table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsTable {
    pub caption: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One table row; `key` is the claim id for record rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub key: String,
    pub cells: Vec<String>,
}
