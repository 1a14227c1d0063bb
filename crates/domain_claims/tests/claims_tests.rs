//! Comprehensive tests for domain_claims

use proptest::prelude::*;
use serde_json::json;

use domain_claims::record::{UNKNOWN_CODE, UNKNOWN_DISPLAY};
use domain_claims::view::{ERROR_CAPTION, RECORDS_CAPTION};
use domain_claims::{
    normalize, ClaimAmount, ClaimsNormalizer, ClaimsOutcome, ErrorDescriptor,
    ExtractionStrategy, RawClaimsBundle, RecordsView,
};
use test_utils::{
    assert_all_fallbacks, assert_amount_json, assert_record_ids, bundle_strategy,
    BundleBuilder, BundleFixtures, ClaimEntryBuilder,
};

// ============================================================================
// Normalizer Tests
// ============================================================================

mod normalizer_tests {
    use super::*;

    #[test]
    fn test_one_record_per_entry_in_order() {
        let outcome = normalize(&BundleFixtures::two_prescriptions_bundle());

        assert_record_ids(&outcome, &["pde--3269834580", "pde--3269834581"]);
    }

    #[test]
    fn test_fully_populated_entry_is_reproduced_verbatim() {
        let outcome = normalize(&BundleFixtures::two_prescriptions_bundle());
        let record = &outcome.records()[0];

        assert_eq!(record.id, "pde--3269834580");
        assert_eq!(record.code, "00093505598");
        assert_eq!(record.display, "Simvastatin 40 MG Oral Tablet");
        assert_eq!(record.amount, ClaimAmount::from(126));
        assert_amount_json(record, json!(126));
    }

    #[test]
    fn test_decimal_amount_keeps_its_literal() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("pde-1").with_amount(json!(12.34)))
            .build_bundle();

        let outcome = normalize(&bundle);
        assert_amount_json(&outcome.records()[0], json!(12.34));
    }

    #[test]
    fn test_missing_code_falls_back_to_unknown() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("pde-1").without_code())
            .build_bundle();

        let outcome = normalize(&bundle);
        let record = &outcome.records()[0];
        assert_eq!(record.code, UNKNOWN_CODE);
        assert_eq!(record.display, "Simvastatin 40 MG Oral Tablet");
    }

    #[test]
    fn test_empty_code_falls_back_to_unknown() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("pde-1").with_code(""))
            .build_bundle();

        assert_eq!(normalize(&bundle).records()[0].code, UNKNOWN_CODE);
    }

    #[test]
    fn test_missing_display_falls_back() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("pde-1").without_display())
            .build_bundle();

        assert_eq!(normalize(&bundle).records()[0].display, UNKNOWN_DISPLAY);
    }

    #[test]
    fn test_missing_amount_is_string_zero() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("pde-1").without_amount())
            .build_bundle();

        let outcome = normalize(&bundle);
        let record = &outcome.records()[0];
        assert_amount_json(record, json!("0"));
        assert_ne!(serde_json::to_value(&record.amount).unwrap(), json!(0));
    }

    #[test]
    fn test_short_adjudication_list_is_string_zero() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("pde-1").with_adjudication_slots(7))
            .build_bundle();

        let outcome = normalize(&bundle);
        assert!(outcome.records()[0].amount.is_fallback());
    }

    #[test]
    fn test_entry_without_items_uses_every_fallback() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("pde-1").without_items())
            .build_bundle();

        let outcome = normalize(&bundle);
        assert_all_fallbacks(&outcome.records()[0]);
    }

    #[test]
    fn test_entry_without_resource_still_produces_a_record() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("ignored").without_resource())
            .entry(ClaimEntryBuilder::new("pde-2"))
            .build_bundle();

        let outcome = normalize(&bundle);
        assert_eq!(outcome.records().len(), 2);
        assert_eq!(outcome.records()[0].id, "");
        assert_all_fallbacks(&outcome.records()[0]);
        assert_eq!(outcome.records()[1].id, "pde-2");
    }

    #[test]
    fn test_positional_selection_ignores_later_items() {
        let entry = json!({
            "resource": {
                "id": "pde-1",
                "item": [
                    { "productOrService": { "coding": [] } },
                    { "productOrService": { "coding": [{ "code": "99999", "display": "Second item" }] } }
                ]
            }
        });
        let bundle = BundleBuilder::new().raw_entry(entry).build_bundle();

        let outcome = normalize(&bundle);
        assert_eq!(outcome.records()[0].code, UNKNOWN_CODE);
    }

    #[test]
    fn test_empty_entry_list_is_empty_records() {
        let bundle = RawClaimsBundle::new(BundleFixtures::empty_searchset());

        assert_eq!(normalize(&bundle), ClaimsOutcome::Records(vec![]));
    }

    #[test]
    fn test_entry_wins_over_message() {
        let bundle = RawClaimsBundle::new(json!({ "entry": [], "message": "ignored" }));

        assert!(matches!(normalize(&bundle), ClaimsOutcome::Records(ref r) if r.is_empty()));
    }

    #[test]
    fn test_message_produces_error_descriptor() {
        let bundle = RawClaimsBundle::new(BundleFixtures::error_message("boom"));

        assert_eq!(
            normalize(&bundle),
            ClaimsOutcome::Error(ErrorDescriptor {
                kind: "error".to_string(),
                content: "boom".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_message_produces_unknown_content() {
        let bundle = RawClaimsBundle::new(BundleFixtures::error_message(""));

        let descriptor = normalize(&bundle).error().cloned().unwrap();
        assert_eq!(descriptor.kind, "error");
        assert_eq!(descriptor.content, "Unknown");
    }

    #[test]
    fn test_neither_entry_nor_message_is_no_content() {
        let bundle = RawClaimsBundle::new(BundleFixtures::no_content());

        let outcome = normalize(&bundle);
        assert_eq!(outcome, ClaimsOutcome::NoContent);
        assert!(outcome.records().is_empty());
        assert!(outcome.error().is_none());
        assert_eq!(outcome.into_result(), Err(None));
    }

    #[test]
    fn test_non_object_bodies_are_no_content() {
        for body in [json!(null), json!([1, 2, 3]), json!("text"), json!(7)] {
            assert_eq!(normalize(&RawClaimsBundle::new(body)), ClaimsOutcome::NoContent);
        }
    }

    proptest! {
        #[test]
        fn record_count_and_order_match_entries((ids, bundle) in bundle_strategy(8)) {
            let outcome = normalize(&RawClaimsBundle::new(bundle));
            let produced: Vec<String> = outcome.records().iter().map(|r| r.id.clone()).collect();
            prop_assert_eq!(produced, ids);
        }
    }
}

// ============================================================================
// Discriminated Extraction Tests
// ============================================================================

mod discriminated_tests {
    use super::*;

    #[test]
    fn test_discriminated_matches_positional_on_sandbox_shape() {
        let bundle = BundleFixtures::two_prescriptions_bundle();
        let positional = normalize(&bundle);
        let discriminated =
            ClaimsNormalizer::new(ExtractionStrategy::prescription_drug()).normalize(&bundle);

        assert_eq!(positional, discriminated);
    }

    #[test]
    fn test_discriminated_skips_non_ndc_coding() {
        let bundle = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("carrier-1").with_coding_system("http://example.test/hcpcs"))
            .build_bundle();

        let positional = normalize(&bundle);
        let discriminated =
            ClaimsNormalizer::new(ExtractionStrategy::prescription_drug()).normalize(&bundle);

        assert_eq!(positional.records()[0].code, "00093505598");
        assert_eq!(discriminated.records()[0].code, UNKNOWN_CODE);
        assert_eq!(discriminated.records()[0].display, UNKNOWN_DISPLAY);
    }

    #[test]
    fn test_discriminated_finds_cost_outside_slot_seven() {
        let entry = json!({
            "resource": {
                "id": "pde-1",
                "item": [{
                    "adjudication": [{
                        "category": { "coding": [{ "code": domain_claims::discriminator::TOTAL_DRUG_COST_CATEGORY }] },
                        "amount": { "value": 77 }
                    }]
                }]
            }
        });
        let bundle = BundleBuilder::new().raw_entry(entry).build_bundle();

        let positional = normalize(&bundle);
        let discriminated =
            ClaimsNormalizer::new(ExtractionStrategy::prescription_drug()).normalize(&bundle);

        assert!(positional.records()[0].amount.is_fallback());
        assert_eq!(discriminated.records()[0].amount, ClaimAmount::from(77));
    }
}

// ============================================================================
// Records View Tests
// ============================================================================

mod view_tests {
    use super::*;

    #[test]
    fn test_records_table() {
        let view = RecordsView::from_outcome(normalize(&BundleFixtures::two_prescriptions_bundle()));
        let table = view.table();

        assert_eq!(table.caption, RECORDS_CAPTION);
        assert_eq!(table.columns, vec!["NDC Code", "Prescription Drug Name", "Cost"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key, "pde--3269834580");
        assert_eq!(
            table.rows[0].cells,
            vec!["00093505598", "Simvastatin 40 MG Oral Tablet", "$126.00"]
        );
    }

    #[test]
    fn test_error_table_replaces_records() {
        let mut view = RecordsView::from_outcome(normalize(&BundleFixtures::two_prescriptions_bundle()));
        view.apply(normalize(&RawClaimsBundle::new(BundleFixtures::error_message("boom"))));

        let table = view.table();
        assert!(view.is_error());
        assert_eq!(table.caption, ERROR_CAPTION);
        assert_eq!(table.columns, vec!["Type", "Content"]);
        assert_eq!(table.rows[0].cells, vec!["error", "boom"]);
    }

    #[test]
    fn test_no_content_on_fresh_view_shows_empty_table() {
        let view = RecordsView::from_outcome(normalize(&RawClaimsBundle::new(json!({}))));

        assert!(view.records.is_empty());
        assert!(view.message.is_none());
        assert!(view.table().rows.is_empty());
        assert_eq!(view.table().caption, RECORDS_CAPTION);
    }

    #[test]
    fn test_no_content_keeps_previous_display() {
        let mut view = RecordsView::from_outcome(normalize(&BundleFixtures::two_prescriptions_bundle()));
        let before = view.clone();

        view.apply(ClaimsOutcome::NoContent);

        assert_eq!(view, before);
    }

    #[test]
    fn test_later_fetch_overwrites_earlier_records() {
        let mut view = RecordsView::from_outcome(normalize(&BundleFixtures::two_prescriptions_bundle()));
        let later = BundleBuilder::new()
            .entry(ClaimEntryBuilder::new("pde-9").without_amount())
            .build_bundle();

        view.apply(normalize(&later));

        assert_eq!(view.records.len(), 1);
        assert_eq!(view.table().rows[0].cells[2], "$0.00");
    }

    #[test]
    fn test_view_serialization_omits_absent_message() {
        let view = RecordsView::new();
        assert_eq!(serde_json::to_value(&view).unwrap(), json!({ "records": [] }));
    }
}
