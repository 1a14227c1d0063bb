//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims sample test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built benefits responses and token payloads
//! - `builders`: Builder patterns for claim entries and bundles
//! - `upstream`: Stub Blue Button server bound to an ephemeral port
//! - `assertions`: Custom assertion helpers for claim records
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod upstream;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use upstream::*;
pub use assertions::*;
pub use generators::*;
