//! Docker Registry API client library
//!
//! Inspect and prune a self-hosted Docker registry through the HTTP API v2:
//! connectivity check, catalog and tag listing, manifest digest lookup,
//! deletion by digest, and interactive cleanup of an image's old tags.

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod registry;

pub use cleanup::{CleanupReport, CleanupWorkflow, Confirm, TagState};
pub use config::{ClientConfig, RegistryEndpoint};
pub use error::{RegistryError, Result};
pub use image::ImageReference;
pub use logging::Logger;
pub use registry::{RegistryClient, RegistryClientBuilder};
