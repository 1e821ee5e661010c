//! Registry module for Docker registry interactions
//!
//! This module provides the client for the Docker Registry HTTP API v2:
//! connectivity probe, catalog and tag listing, manifest digest resolution and
//! deletion by digest, all over an injectable HTTP transport.

pub mod client;
pub mod models;
pub mod operations;
pub mod transport;

pub use client::{RegistryClient, RegistryClientBuilder};
pub use models::{ManifestDigest, TagSet};
pub use transport::{HttpTransport, ReqwestTransport, ScriptedTransport};
