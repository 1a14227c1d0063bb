//! Raw claims bundle as returned by the benefits endpoint
//!
//! The bundle is kept as an untyped JSON value. The upstream API returns
//! several claim types (PDE, carrier, inpatient, ...) in one envelope shape
//! and error responses that share none of it, so a typed schema would reject
//! inputs the normalizer is required to degrade on instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A benefits response body: either a FHIR bundle with `entry` or an error
/// object with `message`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawClaimsBundle(Value);

impl RawClaimsBundle {
    /// Wraps an already parsed JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the `entry` sequence if the key is present and not null
    ///
    /// A present `entry` that is not an array yields an empty slice.
    pub fn entries(&self) -> Option<&[Value]> {
        match self.0.get("entry") {
            None | Some(Value::Null) => None,
            Some(Value::Array(entries)) => Some(entries.as_slice()),
            Some(_) => Some(&[] as &[Value]),
        }
    }

    /// Returns the `message` value if the key is present and not null
    pub fn message(&self) -> Option<&Value> {
        match self.0.get("message") {
            None | Some(Value::Null) => None,
            Some(message) => Some(message),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawClaimsBundle {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
