//! Custom Test Assertions
//!
//! Provides assertion helpers for claim records that give more meaningful
//! failure messages than comparing whole structs.

use domain_claims::record::{UNKNOWN_CODE, UNKNOWN_DISPLAY};
use domain_claims::{ClaimRecord, ClaimsOutcome};
use serde_json::Value;

/// Asserts that `outcome` holds records whose ids equal `expected_ids`, in order
///
/// # Panics
///
/// Panics if the outcome is not `Records` or the ids differ
pub fn assert_record_ids(outcome: &ClaimsOutcome, expected_ids: &[&str]) {
    let ClaimsOutcome::Records(records) = outcome else {
        panic!("Expected records, got {:?}", outcome);
    };
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, expected_ids, "Record ids differ from entry ids");
}

/// Asserts that every field of `record` is its fallback literal
pub fn assert_all_fallbacks(record: &ClaimRecord) {
    assert_eq!(record.code, UNKNOWN_CODE, "code of {} is not the fallback", record.id);
    assert_eq!(
        record.display, UNKNOWN_DISPLAY,
        "display of {} is not the fallback",
        record.id
    );
    assert!(
        record.amount.is_fallback(),
        "amount of {} is {}, expected the \"0\" fallback",
        record.id,
        record.amount
    );
}

/// Asserts that the serialized amount of `record` equals `expected`
pub fn assert_amount_json(record: &ClaimRecord, expected: Value) {
    let actual = serde_json::to_value(&record.amount).expect("amount serializes");
    assert_eq!(actual, expected, "amount of {} serialized differently", record.id);
}
