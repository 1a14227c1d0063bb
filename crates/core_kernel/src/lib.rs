//! Core Kernel - Foundational types shared by the claims sample crates
//!
//! This crate provides the building blocks used across all domain modules:
//! - Upstream environments and API versions of the Blue Button service
//! - Port infrastructure for swappable adapters (upstream API, mocks)
//! - Common error types

pub mod environment;
pub mod ports;
pub mod error;

pub use environment::{Environment, ApiVersion};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;
