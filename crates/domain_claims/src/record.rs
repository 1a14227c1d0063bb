//! Normalized claim rows and the error descriptor

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Code shown when the first coding has no code
pub const UNKNOWN_CODE: &str = "Unknown";

/// Drug name shown when the first coding has no display text
pub const UNKNOWN_DISPLAY: &str = "Unknown Prescription Drug";

/// Amount shown when the adjudication slot has no value. Kept as text, not 0.
pub const FALLBACK_AMOUNT: &str = "0";

/// Content of an error descriptor whose upstream message was empty
pub const UNKNOWN_MESSAGE: &str = "Unknown";

/// Type tag of every error descriptor
pub const ERROR_TYPE: &str = "error";

/// Cost of a claim line
///
/// Serializes untagged: a number stays a JSON number, the fallback stays the
/// string `"0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimAmount {
    Number(Number),
    Text(String),
}

impl ClaimAmount {
    /// The `"0"` amount used when the adjudication slot does not resolve
    pub fn fallback() -> Self {
        ClaimAmount::Text(FALLBACK_AMOUNT.to_string())
    }

    /// Converts an upstream `amount.value` verbatim
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(number) => ClaimAmount::Number(number.clone()),
            Value::String(text) => ClaimAmount::Text(text.clone()),
            other => ClaimAmount::Text(other.to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ClaimAmount::Text(text) if text == FALLBACK_AMOUNT)
    }

    /// Formats the amount for the Cost column, e.g. `$42.00`
    ///
    /// The suffix is appended to whatever the upstream sent, so `12.5`
    /// renders as `$12.5.00`.
    pub fn cost_label(&self) -> String {
        format!("${}.00", self)
    }
}

impl fmt::Display for ClaimAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimAmount::Number(number) => write!(f, "{}", number),
            ClaimAmount::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ClaimAmount {
    fn from(value: i64) -> Self {
        ClaimAmount::Number(Number::from(value))
    }
}

/// One row of the claims table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// `resource.id`, passed through unchanged
    pub id: String,
    /// Drug code (NDC for Part D events)
    pub code: String,
    /// Drug name
    pub display: String,
    /// Cost of the line
    pub amount: ClaimAmount,
}

/// Error reported by the upstream API in place of claim entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl ErrorDescriptor {
    /// Creates an `error` descriptor, substituting `Unknown` for empty content
    pub fn error(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            kind: ERROR_TYPE.to_string(),
            content: if content.is_empty() {
                UNKNOWN_MESSAGE.to_string()
            } else {
                content
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fallback_amount_serializes_as_string() {
        let json = serde_json::to_value(ClaimAmount::fallback()).unwrap();
        assert_eq!(json, json!("0"));
        assert_ne!(json, json!(0));
    }

    #[test]
    fn test_numeric_amount_is_verbatim() {
        let amount = ClaimAmount::from_value(&json!(12.75));
        assert_eq!(serde_json::to_value(&amount).unwrap(), json!(12.75));
        assert!(!amount.is_fallback());
    }

    #[test]
    fn test_cost_label() {
        assert_eq!(ClaimAmount::from(42).cost_label(), "$42.00");
        assert_eq!(ClaimAmount::fallback().cost_label(), "$0.00");
    }

    #[test]
    fn test_error_descriptor_field_names() {
        let descriptor = ErrorDescriptor::error("boom");
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({ "type": "error", "content": "boom" })
        );
    }

    #[test]
    fn test_empty_error_content_becomes_unknown() {
        assert_eq!(ErrorDescriptor::error("").content, "Unknown");
    }
}
