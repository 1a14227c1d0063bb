//! Claims Domain
//!
//! This crate turns the Explanation-of-Benefit bundle returned by the benefits
//! endpoint into the flat rows shown in the prescription drug claims table.
//!
//! # Normalization
//!
//! ```text
//! bundle.entry present   -> one ClaimRecord per entry, input order
//! bundle.message present -> ErrorDescriptor { type: "error", content }
//! neither                -> NoContent (view keeps what it shows)
//! ```
//!
//! Field selection is positional by default (`item[0]`, `coding[0]`,
//! `adjudication[7]`); see [`discriminator`] for the predicate-based
//! alternative.

pub mod bundle;
pub mod record;
pub mod normalizer;
pub mod discriminator;
pub mod view;
pub mod ports;

pub use bundle::RawClaimsBundle;
pub use record::{ClaimRecord, ClaimAmount, ErrorDescriptor};
pub use normalizer::{normalize, ClaimsNormalizer, ClaimsOutcome};
pub use discriminator::{Discriminator, ExtractionStrategy, find_first};
pub use view::{RecordsView, ClaimsTable, TableRow};
pub use ports::BenefitPort;
