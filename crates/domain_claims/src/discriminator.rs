//! Discriminator-based element selection
//!
//! FHIR sequences such as `item[].productOrService.coding[]` and
//! `item[].adjudication[]` are heterogeneous: which element carries the NDC
//! code or the drug cost depends on the claim type, not on position. The
//! functions here select the first element matching a discriminator instead
//! of trusting a fixed index.
//!
//! [`ExtractionStrategy::Positional`] remains the default used by
//! [`crate::normalize`]; [`ExtractionStrategy::Discriminated`] is opt-in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Code system of National Drug Codes
pub const NDC_SYSTEM: &str = "http://hl7.org/fhir/sid/ndc";

/// Adjudication category code of the total drug cost on Part D events
pub const TOTAL_DRUG_COST_CATEGORY: &str =
    "https://bluebutton.cms.gov/resources/variables/tot_rx_cst_amt";

/// Returns the first element of `sequence` satisfying `predicate`
///
/// Non-array values have no elements.
pub fn find_first<'a, P>(sequence: Option<&'a Value>, predicate: P) -> Option<&'a Value>
where
    P: Fn(&Value) -> bool,
{
    sequence?.as_array()?.iter().find(|element| predicate(element))
}

/// A `(system, code)` pattern matched against FHIR coding objects
///
/// Unset fields match anything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Discriminator {
    pub system: Option<String>,
    pub code: Option<String>,
}

impl Discriminator {
    pub fn system(system: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            code: None,
        }
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self {
            system: None,
            code: Some(code.into()),
        }
    }

    /// Returns true if `coding` carries the expected system and code
    pub fn matches(&self, coding: &Value) -> bool {
        let field_matches = |expected: &Option<String>, field: &str| match expected {
            Some(expected) => coding.get(field).and_then(Value::as_str) == Some(expected.as_str()),
            None => true,
        };
        field_matches(&self.system, "system") && field_matches(&self.code, "code")
    }

    /// Returns true if any coding of `concept.coding[]` matches
    pub fn matches_concept(&self, concept: Option<&Value>) -> bool {
        find_first(concept.and_then(|c| c.get("coding")), |coding| self.matches(coding)).is_some()
    }
}

/// How the normalizer selects the coding and adjudication of an entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// `item[0].productOrService.coding[0]` and `item[0].adjudication[7]`
    #[default]
    Positional,
    /// First coding and adjudication, across all items in order, matching
    /// the discriminators
    Discriminated {
        coding: Discriminator,
        adjudication: Discriminator,
    },
}

impl ExtractionStrategy {
    /// Adjudication slot read by the positional strategy
    pub const POSITIONAL_ADJUDICATION_SLOT: usize = 7;

    /// NDC coding and total drug cost, for Part D event claims
    pub fn prescription_drug() -> Self {
        ExtractionStrategy::Discriminated {
            coding: Discriminator::system(NDC_SYSTEM),
            adjudication: Discriminator::code(TOTAL_DRUG_COST_CATEGORY),
        }
    }

    /// Selects the coding object of a claim resource
    pub fn coding<'a>(&self, resource: &'a Value) -> Option<&'a Value> {
        match self {
            ExtractionStrategy::Positional => resource.pointer("/item/0/productOrService/coding/0"),
            ExtractionStrategy::Discriminated { coding, .. } => items(resource).find_map(|item| {
                find_first(item.pointer("/productOrService/coding"), |c| coding.matches(c))
            }),
        }
    }

    /// Selects the adjudication object of a claim resource
    pub fn adjudication<'a>(&self, resource: &'a Value) -> Option<&'a Value> {
        match self {
            ExtractionStrategy::Positional => resource
                .get("item")?
                .get(0)?
                .get("adjudication")?
                .get(Self::POSITIONAL_ADJUDICATION_SLOT),
            ExtractionStrategy::Discriminated { adjudication, .. } => {
                items(resource).find_map(|item| {
                    find_first(item.get("adjudication"), |entry| {
                        adjudication.matches_concept(entry.get("category"))
                    })
                })
            }
        }
    }
}

fn items(resource: &Value) -> impl Iterator<Item = &Value> {
    resource
        .get("item")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
