//! Registry operations module
//!
//! Internal organization of the v2 calls behind [`RegistryClient`](super::RegistryClient).

pub mod manifest_operations;
pub mod repository_operations;

pub use manifest_operations::ManifestOperations;
pub use repository_operations::RepositoryOperations;
