//! Property-Based Test Generators
//!
//! Provides proptest strategies for claims bundles, including entries with
//! arbitrarily missing fields.

use proptest::prelude::*;
use serde_json::Value;

use crate::builders::{BundleBuilder, ClaimEntryBuilder};

/// Strategy for claim ids as the sandbox formats them
pub fn claim_id_strategy() -> impl Strategy<Value = String> {
    (1_000_000_000u64..9_999_999_999u64).prop_map(|n| format!("pde--{}", n))
}

/// Strategy for NDC codes (11 digits)
pub fn ndc_strategy() -> impl Strategy<Value = String> {
    "[0-9]{11}"
}

/// Strategy for a claim entry with each optional field present or absent
pub fn claim_entry_strategy() -> impl Strategy<Value = (String, Value)> {
    (
        claim_id_strategy(),
        proptest::option::of(ndc_strategy()),
        proptest::option::of("[A-Z][a-z]{3,12} [0-9]{1,3} MG Oral Tablet"),
        proptest::option::of(1u32..10_000u32),
        0usize..12usize,
    )
        .prop_map(|(id, code, display, amount, slots)| {
            let mut builder = ClaimEntryBuilder::new(id.clone()).with_adjudication_slots(slots);
            builder = match code {
                Some(code) => builder.with_code(code),
                None => builder.without_code(),
            };
            builder = match display {
                Some(display) => builder.with_display(display),
                None => builder.without_display(),
            };
            builder = match amount {
                Some(amount) => builder.with_amount(amount),
                None => builder.without_amount(),
            };
            (id, builder.build())
        })
}

/// Strategy for a bundle of up to `max_entries` entries, paired with their ids
pub fn bundle_strategy(max_entries: usize) -> impl Strategy<Value = (Vec<String>, Value)> {
    proptest::collection::vec(claim_entry_strategy(), 0..=max_entries).prop_map(|entries| {
        let ids = entries.iter().map(|(id, _)| id.clone()).collect();
        let bundle = entries
            .into_iter()
            .fold(BundleBuilder::new(), |builder, (_, entry)| builder.raw_entry(entry))
            .build();
        (ids, bundle)
    })
}
