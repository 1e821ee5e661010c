//! Registry client facade over the v2 catalog, tag and manifest operations.
//!
//! Every call goes through the injected [`HttpTransport`] and comes back as a
//! parsed value; callers never see HTTP responses.

use crate::config::{ClientConfig, RegistryEndpoint};
use crate::error::Result;
use crate::logging::Logger;
use crate::registry::models::{ManifestDigest, TagSet};
use crate::registry::operations::{ManifestOperations, RepositoryOperations};
use crate::registry::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use std::sync::Arc;

pub struct RegistryClientBuilder {
    endpoint: RegistryEndpoint,
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    output: Logger,
}

impl RegistryClientBuilder {
    pub fn new(endpoint: RegistryEndpoint) -> Self {
        Self {
            endpoint,
            config: ClientConfig::default(),
            transport: None,
            output: Logger::default(),
        }
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this transport instead of building a `reqwest` one
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_output(mut self, output: Logger) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> Result<RegistryClient> {
        self.config.validate()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.config)?),
        };

        Ok(RegistryClient {
            repositories: RepositoryOperations::new(
                transport.clone(),
                self.endpoint.clone(),
                self.output.clone(),
            ),
            manifests: ManifestOperations::new(
                transport.clone(),
                self.endpoint.clone(),
                self.output.clone(),
            ),
            transport,
            endpoint: self.endpoint,
            output: self.output,
        })
    }
}

#[derive(Clone)]
pub struct RegistryClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: RegistryEndpoint,
    output: Logger,
    repositories: RepositoryOperations,
    manifests: ManifestOperations,
}

impl RegistryClient {
    pub fn builder(endpoint: RegistryEndpoint) -> RegistryClientBuilder {
        RegistryClientBuilder::new(endpoint)
    }

    pub fn endpoint(&self) -> &RegistryEndpoint {
        &self.endpoint
    }

    /// Probe the API root. 200 (open registry) and 401 (auth required) both
    /// mean a live registry. Any other status or a transport failure is
    /// reported and yields false.
    pub async fn check_connection(&self) -> bool {
        let url = self.endpoint.url("");
        self.output.verbose(&format!("url: {}", url));
        tracing::debug!(%url, "GET api root");

        match self.transport.send(HttpRequest::get(&url)).await {
            Ok(response) => match response.status {
                200 => {
                    self.output.success("Connection successful");
                    true
                }
                401 => {
                    self.output
                        .success("Connection successful (registry requires authentication)");
                    true
                }
                status => {
                    self.output.error(&format!(
                        "Registry API v2 not available at {} (status {})",
                        self.endpoint, status
                    ));
                    false
                }
            },
            Err(e) => {
                self.output.error(&format!("{}", e));
                false
            }
        }
    }

    pub async fn get_catalog(&self) -> Result<Vec<String>> {
        self.repositories.get_catalog().await
    }

    pub async fn get_tags(&self, repository: &str) -> Result<Vec<String>> {
        self.repositories.get_tags(repository).await
    }

    pub async fn get_all_tags(&self, catalog: &[String]) -> Result<TagSet> {
        self.repositories.get_all_tags(catalog).await
    }

    pub async fn get_manifest_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<Option<ManifestDigest>> {
        self.manifests.get_manifest_digest(repository, tag).await
    }

    pub async fn delete_manifest(&self, repository: &str, digest: &str) -> bool {
        self.manifests.delete_manifest(repository, digest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::transport::{HttpResponse, Method, ScriptedTransport};

    const ROOT: &str = "https://registry.test:5000/v2/";

    fn client(transport: ScriptedTransport) -> RegistryClient {
        RegistryClient::builder(RegistryEndpoint::new("registry.test:5000").unwrap())
            .with_transport(Arc::new(transport))
            .with_output(Logger::new_quiet())
            .build()
            .unwrap()
    }

    async fn check_with_status(status: u16) -> bool {
        client(ScriptedTransport::new().route(Method::Get, ROOT, HttpResponse::new(status)))
            .check_connection()
            .await
    }

    #[tokio::test]
    async fn test_check_connection_live_statuses() {
        assert!(check_with_status(200).await);
        assert!(check_with_status(401).await);
    }

    #[tokio::test]
    async fn test_check_connection_other_statuses() {
        assert!(!check_with_status(404).await);
        assert!(!check_with_status(500).await);
    }

    #[tokio::test]
    async fn test_check_connection_refused() {
        let client = client(ScriptedTransport::new().unreachable(Method::Get, ROOT));
        assert!(!client.check_connection().await);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = RegistryClient::builder(RegistryEndpoint::new("localhost:5000").unwrap())
            .with_config(ClientConfig::default().with_timeout(0))
            .build();
        assert!(result.is_err());
    }
}
