//! FHIR resources served to an authorized beneficiary

use std::fmt;

/// Resource fetched with the beneficiary's access token
///
/// Paths are relative to `{base}/{version}/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FhirResource {
    Patient,
    Coverage,
    ExplanationOfBenefit,
    /// OpenID Connect userinfo of the beneficiary
    Profile,
    /// Any other path under the versioned API, e.g. `fhir/Patient/-20140000008325`
    Custom(String),
}

impl FhirResource {
    pub fn path(&self) -> &str {
        match self {
            FhirResource::Patient => "fhir/Patient/",
            FhirResource::Coverage => "fhir/Coverage/",
            FhirResource::ExplanationOfBenefit => "fhir/ExplanationOfBenefit/",
            FhirResource::Profile => "connect/userinfo",
            FhirResource::Custom(path) => path.trim_start_matches('/'),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FhirResource::Patient => "Patient",
            FhirResource::Coverage => "Coverage",
            FhirResource::ExplanationOfBenefit => "ExplanationOfBenefit",
            FhirResource::Profile => "Profile",
            FhirResource::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for FhirResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
