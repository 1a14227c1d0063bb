//! Domain Adapters
//!
//! Implementations of domain ports backed by the Blue Button API.

pub mod benefit;

pub use benefit::BlueButtonBenefitAdapter;
