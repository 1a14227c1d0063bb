//! Pre-built Test Fixtures
//!
//! Provides ready-to-use benefits responses and OAuth payloads shaped like
//! what the Blue Button sandbox returns. Values are fixed so assertions can
//! compare literals.

use domain_claims::discriminator::TOTAL_DRUG_COST_CATEGORY;
use domain_claims::RawClaimsBundle;
use serde_json::{json, Value};

use crate::builders::{BundleBuilder, ClaimEntryBuilder};

/// Code system of adjudication categories
pub const ADJUDICATION_SYSTEM: &str =
    "https://bluebutton.cms.gov/resources/codesystem/adjudication";

/// Adjudication categories of a Part D event, in the order the sandbox lists them
pub const PDE_ADJUDICATION_CATEGORIES: &[&str] = &[
    "https://bluebutton.cms.gov/resources/variables/cvrd_d_plan_pd_amt",
    "https://bluebutton.cms.gov/resources/variables/ncvrd_plan_pd_amt",
    "https://bluebutton.cms.gov/resources/variables/ptnt_pay_amt",
    "https://bluebutton.cms.gov/resources/variables/othr_troop_amt",
    "https://bluebutton.cms.gov/resources/variables/lics_amt",
    "https://bluebutton.cms.gov/resources/variables/plro_amt",
    "https://bluebutton.cms.gov/resources/variables/gdc_blw_oopt_amt",
    TOTAL_DRUG_COST_CATEGORY,
    "https://bluebutton.cms.gov/resources/variables/rptd_gap_dscnt_num",
];

/// Fixture for benefits responses
pub struct BundleFixtures;

impl BundleFixtures {
    /// Two fully populated Part D events
    pub fn two_prescriptions() -> Value {
        BundleBuilder::new()
            .entry(
                ClaimEntryBuilder::new("pde--3269834580")
                    .with_code("00093505598")
                    .with_display("Simvastatin 40 MG Oral Tablet")
                    .with_amount(126),
            )
            .entry(
                ClaimEntryBuilder::new("pde--3269834581")
                    .with_code("00378395105")
                    .with_display("Lisinopril 10 MG Oral Tablet")
                    .with_amount(15),
            )
            .build()
    }

    /// A searchset with no entries
    pub fn empty_searchset() -> Value {
        BundleBuilder::new().build()
    }

    /// An upstream error body
    pub fn error_message(message: &str) -> Value {
        json!({ "message": message })
    }

    /// Neither `entry` nor `message`
    pub fn no_content() -> Value {
        json!({})
    }

    pub fn two_prescriptions_bundle() -> RawClaimsBundle {
        RawClaimsBundle::new(Self::two_prescriptions())
    }
}

/// Fixture for OAuth token endpoint payloads
pub struct TokenFixtures;

impl TokenFixtures {
    pub const ACCESS_TOKEN: &'static str = "sample-access-token";
    pub const REFRESH_TOKEN: &'static str = "sample-refresh-token";
    pub const REFRESHED_ACCESS_TOKEN: &'static str = "refreshed-access-token";
    pub const REFRESHED_REFRESH_TOKEN: &'static str = "refreshed-refresh-token";
    pub const PATIENT: &'static str = "-20140000008325";

    /// Response to an authorization code exchange
    pub fn token_response() -> Value {
        json!({
            "access_token": Self::ACCESS_TOKEN,
            "expires_in": 36000,
            "token_type": "Bearer",
            "scope": "patient/Patient.read patient/Coverage.read patient/ExplanationOfBenefit.read profile",
            "refresh_token": Self::REFRESH_TOKEN,
            "patient": Self::PATIENT,
        })
    }

    /// Response to a refresh token grant
    pub fn refresh_response() -> Value {
        json!({
            "access_token": Self::REFRESHED_ACCESS_TOKEN,
            "expires_in": 36000,
            "token_type": "Bearer",
            "scope": ["patient/ExplanationOfBenefit.read"],
            "refresh_token": Self::REFRESHED_REFRESH_TOKEN,
            "patient": Self::PATIENT,
        })
    }
}

/// Fixture for the beneficiary resources served next to the EOB search
pub struct ResourceFixtures;

impl ResourceFixtures {
    pub fn patient() -> Value {
        json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": 1,
            "entry": [{
                "resource": {
                    "resourceType": "Patient",
                    "id": TokenFixtures::PATIENT,
                    "name": [{ "family": "Doe", "given": ["Jane", "X"] }],
                    "gender": "female",
                    "birthDate": "1999-06-01"
                }
            }]
        })
    }

    pub fn coverage() -> Value {
        json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": 1,
            "entry": [{
                "resource": {
                    "resourceType": "Coverage",
                    "id": "part-a--20140000008325",
                    "status": "active",
                    "beneficiary": { "reference": format!("Patient/{}", TokenFixtures::PATIENT) }
                }
            }]
        })
    }

    /// OpenID Connect userinfo
    pub fn profile() -> Value {
        json!({
            "sub": "fred",
            "name": "Jane Doe",
            "given_name": "Jane",
            "family_name": "Doe",
            "patient": TokenFixtures::PATIENT
        })
    }
}
