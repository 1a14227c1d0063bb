//! Claims normalizer
//!
//! Maps a benefits response into flat claim rows. Missing or falsy fields
//! (`null`, `""`, `0`, `false`) fall back to fixed literals; nothing here
//! returns an error or panics on malformed input.

use serde_json::Value;
use tracing::debug;

use crate::bundle::RawClaimsBundle;
use crate::discriminator::ExtractionStrategy;
use crate::record::{ClaimAmount, ClaimRecord, ErrorDescriptor, UNKNOWN_CODE, UNKNOWN_DISPLAY};

/// Result of normalizing one benefits response
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimsOutcome {
    /// The bundle carried `entry`: one record per entry, in input order
    Records(Vec<ClaimRecord>),
    /// The bundle carried `message` but no `entry`
    Error(ErrorDescriptor),
    /// The bundle carried neither
    NoContent,
}

impl ClaimsOutcome {
    /// Returns the records, or an empty slice for the other outcomes
    pub fn records(&self) -> &[ClaimRecord] {
        match self {
            ClaimsOutcome::Records(records) => records,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ErrorDescriptor> {
        match self {
            ClaimsOutcome::Error(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// Converts into `Ok(records)`, `Err(Some(descriptor))` or `Err(None)`
    pub fn into_result(self) -> Result<Vec<ClaimRecord>, Option<ErrorDescriptor>> {
        match self {
            ClaimsOutcome::Records(records) => Ok(records),
            ClaimsOutcome::Error(descriptor) => Err(Some(descriptor)),
            ClaimsOutcome::NoContent => Err(None),
        }
    }
}

/// Normalizes a bundle with positional field selection
pub fn normalize(bundle: &RawClaimsBundle) -> ClaimsOutcome {
    ClaimsNormalizer::default().normalize(bundle)
}

/// Normalizer configured with a field selection strategy
#[derive(Debug, Clone, Default)]
pub struct ClaimsNormalizer {
    strategy: ExtractionStrategy,
}

impl ClaimsNormalizer {
    pub fn new(strategy: ExtractionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &ExtractionStrategy {
        &self.strategy
    }

    /// Normalizes a benefits response
    pub fn normalize(&self, bundle: &RawClaimsBundle) -> ClaimsOutcome {
        if let Some(entries) = bundle.entries() {
            let records: Vec<ClaimRecord> =
                entries.iter().map(|entry| self.normalize_entry(entry)).collect();
            debug!(count = records.len(), "Normalized claim entries");
            return ClaimsOutcome::Records(records);
        }

        if let Some(message) = bundle.message() {
            let content = truthy_text(message).unwrap_or_default();
            debug!(%content, "Benefits response carried an error message");
            return ClaimsOutcome::Error(ErrorDescriptor::error(content));
        }

        debug!("Benefits response carried neither entries nor a message");
        ClaimsOutcome::NoContent
    }

    /// Extracts one record from an `entry` wrapper
    pub fn normalize_entry(&self, entry: &Value) -> ClaimRecord {
        let resource = entry.get("resource").unwrap_or(&Value::Null);
        let coding = self.strategy.coding(resource);
        let amount = self
            .strategy
            .adjudication(resource)
            .and_then(|adjudication| adjudication.pointer("/amount/value"))
            .filter(|value| is_truthy(value));

        ClaimRecord {
            id: resource.get("id").map(verbatim_text).unwrap_or_default(),
            code: coding
                .and_then(|c| c.get("code"))
                .and_then(truthy_text)
                .unwrap_or_else(|| UNKNOWN_CODE.to_string()),
            display: coding
                .and_then(|c| c.get("display"))
                .and_then(truthy_text)
                .unwrap_or_else(|| UNKNOWN_DISPLAY.to_string()),
            amount: amount.map(ClaimAmount::from_value).unwrap_or_else(ClaimAmount::fallback),
        }
    }
}

/// JSON truthiness: everything except `null`, `false`, `0` and `""`
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    is_truthy(value).then(|| verbatim_text(value))
}

fn verbatim_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
