//! Repository operations for registry client
//!
//! Implements Docker Registry v2 listing operations:
//! - Catalog listing (GET /v2/_catalog)
//! - Tag listing (GET /v2/{name}/tags/list)
//! - Tag aggregation across a whole catalog

use crate::config::RegistryEndpoint;
use crate::error::{RegistryError, Result};
use crate::logging::Logger;
use crate::registry::models::{CatalogResponse, TagListResponse, TagSet};
use crate::registry::transport::{HttpRequest, HttpResponse, HttpTransport};
use std::sync::Arc;

#[derive(Clone)]
pub struct RepositoryOperations {
    transport: Arc<dyn HttpTransport>,
    endpoint: RegistryEndpoint,
    output: Logger,
}

impl RepositoryOperations {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: RegistryEndpoint, output: Logger) -> Self {
        Self {
            transport,
            endpoint,
            output,
        }
    }

    /// List every repository name the registry reports, in server order
    pub async fn get_catalog(&self) -> Result<Vec<String>> {
        let url = self.endpoint.url("_catalog");
        let response = self.fetch(&url, "Catalog listing").await?;

        let catalog: CatalogResponse = response
            .json()
            .map_err(|e| RegistryError::malformed(&url, format!("invalid JSON: {}", e)))?;

        let repositories = catalog
            .repositories
            .ok_or_else(|| RegistryError::malformed(&url, "missing key `repositories`"))?;

        tracing::debug!(count = repositories.len(), "catalog fetched");
        Ok(repositories)
    }

    /// List tags of one repository. `null` or absent tags mean no tags.
    pub async fn get_tags(&self, repository: &str) -> Result<Vec<String>> {
        let url = self.endpoint.url(&format!("{}/tags/list", repository));
        let response = self.fetch(&url, "Tag listing").await?;

        let tag_list: TagListResponse = response
            .json()
            .map_err(|e| RegistryError::malformed(&url, format!("invalid JSON: {}", e)))?;

        let tags = tag_list.tags.unwrap_or_default();

        self.output.detail(&format!(
            "Found {} tags for repository {}",
            tags.len(),
            repository
        ));
        Ok(tags)
    }

    /// Fetch tags for each catalog entry, one request at a time. The first
    /// failing lookup fails the whole aggregate.
    pub async fn get_all_tags(&self, catalog: &[String]) -> Result<TagSet> {
        let mut tag_set = TagSet::with_capacity(catalog.len());

        for repository in catalog {
            let tags = self.get_tags(repository).await?;
            tag_set.push((repository.clone(), tags));
        }

        Ok(tag_set)
    }

    async fn fetch(&self, url: &str, operation: &str) -> Result<HttpResponse> {
        self.output.verbose(&format!("url: {}", url));
        tracing::debug!(%url, "GET");

        let response = self.transport.send(HttpRequest::get(url)).await.map_err(|e| {
            self.output.error(&format!("{} failed: {}", operation, e));
            e
        })?;

        if !response.is_success() {
            self.output.error(&format!(
                "{} failed: HTTP {}",
                operation, response.status
            ));
            return Err(RegistryError::OperationFailed {
                operation: operation.to_string(),
                status: response.status,
            });
        }

        Ok(response)
    }
}
