//! Infrastructure Blue Button Layer
//!
//! This crate talks to the CMS Blue Button 2.0 API over HTTP using reqwest.
//!
//! # Architecture
//!
//! `BlueButtonClient` owns the HTTP client, the pending authorizations and
//! the current session. The adapter in [`adapters`] exposes it to the claims
//! domain through `BenefitPort`.
//!
//! # Session
//!
//! A single session is held at a time, mirroring a one-user sample backend:
//! the last completed callback wins. Expired access tokens are refreshed
//! before any FHIR resource request is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_bluebutton::{BlueButtonClient, BlueButtonConfig};
//!
//! let client = BlueButtonClient::new(BlueButtonConfig::new("id", "secret", callback))?;
//! let url = client.start_authorization(AuthorizeSettings::default()).await?;
//! ```

pub mod config;
pub mod error;
pub mod resource;
pub mod client;
pub mod adapters;

pub use config::{BlueButtonConfig, SDK_HEADER, SDK_HEADER_KEY};
pub use error::UpstreamError;
pub use resource::FhirResource;
pub use client::{AuthorizedSession, BlueButtonClient};
pub use adapters::BlueButtonBenefitAdapter;
