//! Test Data Builders
//!
//! Provides builder patterns for constructing claims bundles with sensible
//! defaults. Tests specify only the fields they care about; everything else
//! is a realistic Part D event.

use domain_claims::discriminator::{NDC_SYSTEM, TOTAL_DRUG_COST_CATEGORY};
use domain_claims::RawClaimsBundle;
use serde_json::{json, Value};

use crate::fixtures::{ADJUDICATION_SYSTEM, PDE_ADJUDICATION_CATEGORIES};

/// Builder for one `entry` of a claims bundle
#[derive(Debug, Clone)]
pub struct ClaimEntryBuilder {
    id: Option<Value>,
    code: Option<Value>,
    display: Option<Value>,
    amount: Option<Value>,
    coding_system: String,
    adjudication_slots: usize,
    include_items: bool,
    include_resource: bool,
}

impl Default for ClaimEntryBuilder {
    fn default() -> Self {
        Self::new("pde--1000000001")
    }
}

impl ClaimEntryBuilder {
    /// Creates a builder for a fully populated entry with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(Value::String(id.into())),
            code: Some(json!("00093505598")),
            display: Some(json!("Simvastatin 40 MG Oral Tablet")),
            amount: Some(json!(42)),
            coding_system: NDC_SYSTEM.to_string(),
            adjudication_slots: PDE_ADJUDICATION_CATEGORIES.len(),
            include_items: true,
            include_resource: true,
        }
    }

    /// Sets the drug code
    pub fn with_code(mut self, code: impl Into<Value>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the drug name
    pub fn with_display(mut self, display: impl Into<Value>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Sets `adjudication[7].amount.value`
    pub fn with_amount(mut self, amount: impl Into<Value>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Sets the system of the first coding
    pub fn with_coding_system(mut self, system: impl Into<String>) -> Self {
        self.coding_system = system.into();
        self
    }

    /// Sets the number of adjudication entries on the first item
    pub fn with_adjudication_slots(mut self, slots: usize) -> Self {
        self.adjudication_slots = slots;
        self
    }

    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn without_code(mut self) -> Self {
        self.code = None;
        self
    }

    pub fn without_display(mut self) -> Self {
        self.display = None;
        self
    }

    pub fn without_amount(mut self) -> Self {
        self.amount = None;
        self
    }

    /// Omits `resource.item`
    pub fn without_items(mut self) -> Self {
        self.include_items = false;
        self
    }

    /// Omits `resource` entirely
    pub fn without_resource(mut self) -> Self {
        self.include_resource = false;
        self
    }

    /// Builds the entry JSON
    pub fn build(self) -> Value {
        if !self.include_resource {
            return json!({ "fullUrl": "https://sandbox.bluebutton.cms.gov/v2/fhir/ExplanationOfBenefit/unknown" });
        }

        let mut resource = json!({ "resourceType": "ExplanationOfBenefit" });
        if let Some(id) = &self.id {
            resource["id"] = id.clone();
        }

        if self.include_items {
            let mut coding = json!({ "system": self.coding_system });
            if let Some(code) = &self.code {
                coding["code"] = code.clone();
            }
            if let Some(display) = &self.display {
                coding["display"] = display.clone();
            }

            resource["item"] = json!([{
                "sequence": 1,
                "productOrService": { "coding": [coding] },
                "adjudication": self.adjudication(),
            }]);
        }

        json!({ "resource": resource })
    }

    fn adjudication(&self) -> Vec<Value> {
        (0..self.adjudication_slots)
            .map(|slot| {
                let category = PDE_ADJUDICATION_CATEGORIES
                    .get(slot)
                    .copied()
                    .unwrap_or("https://bluebutton.cms.gov/resources/variables/other");
                let mut adjudication = json!({
                    "category": {
                        "coding": [{ "system": ADJUDICATION_SYSTEM, "code": category }]
                    }
                });
                if slot == 7 {
                    if let Some(amount) = &self.amount {
                        adjudication["amount"] = json!({ "value": amount, "currency": "USD" });
                    }
                } else {
                    adjudication["amount"] = json!({ "value": 100 + slot, "currency": "USD" });
                }
                adjudication
            })
            .collect()
    }
}

/// Builder for a searchset bundle of claim entries
#[derive(Debug, Clone, Default)]
pub struct BundleBuilder {
    entries: Vec<Value>,
}

impl BundleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry
    pub fn entry(mut self, entry: ClaimEntryBuilder) -> Self {
        self.entries.push(entry.build());
        self
    }

    /// Appends a raw entry value
    pub fn raw_entry(mut self, entry: Value) -> Self {
        self.entries.push(entry);
        self
    }

    /// Builds the bundle JSON
    pub fn build(self) -> Value {
        json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": self.entries.len(),
            "entry": self.entries,
        })
    }

    pub fn build_bundle(self) -> RawClaimsBundle {
        RawClaimsBundle::new(self.build())
    }
}
