//! Manifest operations for registry client
//!
//! Implements Docker Registry v2 manifest operations:
//! - Digest resolution (GET /v2/{name}/manifests/{tag}, `Docker-Content-Digest`)
//! - Deletion by digest (DELETE /v2/{name}/manifests/{digest})

use crate::config::RegistryEndpoint;
use crate::error::Result;
use crate::logging::Logger;
use crate::registry::models::{DIGEST_HEADER, MANIFEST_V2_MEDIA_TYPE, ManifestDigest};
use crate::registry::transport::{HttpRequest, HttpTransport};
use std::sync::Arc;

#[derive(Clone)]
pub struct ManifestOperations {
    transport: Arc<dyn HttpTransport>,
    endpoint: RegistryEndpoint,
    output: Logger,
}

impl ManifestOperations {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: RegistryEndpoint, output: Logger) -> Self {
        Self {
            transport,
            endpoint,
            output,
        }
    }

    /// Resolve `repository:tag` to its manifest digest.
    ///
    /// Only the presence of the digest header matters, not the status code.
    /// `Ok(None)` means the registry did not report a digest, typically
    /// because the tag no longer exists. Transport failures are `Err`.
    pub async fn get_manifest_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<Option<ManifestDigest>> {
        let url = self
            .endpoint
            .url(&format!("{}/manifests/{}", repository, tag));
        self.output.verbose(&format!("url: {}", url));
        tracing::debug!(%url, "GET manifest");

        let request = HttpRequest::get(&url).header("Accept", MANIFEST_V2_MEDIA_TYPE);
        let response = self.transport.send(request).await.map_err(|e| {
            self.output
                .error(&format!("Failed to fetch manifest for {}:{}: {}", repository, tag, e));
            e
        })?;

        let digest = response.header(DIGEST_HEADER).map(str::to_string);
        match &digest {
            Some(digest) => {
                tracing::debug!(status = response.status, %digest, "manifest digest resolved")
            }
            None => tracing::debug!(status = response.status, "no manifest digest header"),
        }

        Ok(digest)
    }

    /// Delete a manifest by digest. Exactly `202 Accepted` counts as success;
    /// any other status or a transport failure is reported and returns false.
    pub async fn delete_manifest(&self, repository: &str, digest: &str) -> bool {
        let url = self
            .endpoint
            .url(&format!("{}/manifests/{}", repository, digest));
        self.output.verbose(&format!("url: {}", url));
        tracing::debug!(%url, "DELETE manifest");

        match self.transport.send(HttpRequest::delete(&url)).await {
            Ok(response) if response.status == 202 => {
                self.output
                    .success(&format!("Removed {}@{}", repository, digest));
                true
            }
            Ok(response) => {
                self.output.error(&format!(
                    "Error while removing {}@{} (status code: {})",
                    repository, digest, response.status
                ));
                false
            }
            Err(e) => {
                self.output
                    .error(&format!("Error while removing {}@{}: {}", repository, digest, e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::transport::{HttpResponse, Method, ScriptedTransport};

    const BASE: &str = "https://registry.test:5000/v2";

    fn operations(transport: Arc<ScriptedTransport>) -> ManifestOperations {
        ManifestOperations::new(
            transport,
            RegistryEndpoint::new("registry.test:5000").unwrap(),
            Logger::new_quiet(),
        )
    }

    #[tokio::test]
    async fn test_digest_from_header_with_accept() {
        let transport = Arc::new(ScriptedTransport::new().route(
            Method::Get,
            format!("{}/app/manifests/v1", BASE),
            HttpResponse::new(200).with_header("Docker-Content-Digest", "sha256:aaa"),
        ));
        let ops = operations(transport.clone());

        let digest = ops.get_manifest_digest("app", "v1").await.unwrap();
        assert_eq!(digest.as_deref(), Some("sha256:aaa"));

        let request = &transport.requests()[0];
        assert!(request.headers.contains(&(
            "Accept".to_string(),
            MANIFEST_V2_MEDIA_TYPE.to_string()
        )));
    }

    #[tokio::test]
    async fn test_digest_header_wins_regardless_of_status() {
        let transport = Arc::new(ScriptedTransport::new().route(
            Method::Get,
            format!("{}/app/manifests/v1", BASE),
            HttpResponse::new(404).with_header("docker-content-digest", "sha256:odd"),
        ));

        let digest = operations(transport).get_manifest_digest("app", "v1").await.unwrap();
        assert_eq!(digest.as_deref(), Some("sha256:odd"));
    }

    #[tokio::test]
    async fn test_missing_header_is_not_found() {
        let transport = Arc::new(ScriptedTransport::new().route(
            Method::Get,
            format!("{}/app/manifests/v1", BASE),
            HttpResponse::new(200).with_body("{}"),
        ));

        assert!(operations(transport)
            .get_manifest_digest("app", "v1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_digest_transport_failure_is_error() {
        let transport = Arc::new(
            ScriptedTransport::new().unreachable(Method::Get, format!("{}/app/manifests/v1", BASE)),
        );

        let err = operations(transport)
            .get_manifest_digest("app", "v1")
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_delete_success_only_on_202() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .route(
                    Method::Delete,
                    format!("{}/app/manifests/sha256:a", BASE),
                    HttpResponse::new(202),
                )
                .route(
                    Method::Delete,
                    format!("{}/app/manifests/sha256:b", BASE),
                    HttpResponse::new(200),
                )
                .route(
                    Method::Delete,
                    format!("{}/app/manifests/sha256:c", BASE),
                    HttpResponse::new(405),
                )
                .unreachable(Method::Delete, format!("{}/app/manifests/sha256:d", BASE)),
        );
        let ops = operations(transport);

        assert!(ops.delete_manifest("app", "sha256:a").await);
        assert!(!ops.delete_manifest("app", "sha256:b").await);
        assert!(!ops.delete_manifest("app", "sha256:c").await);
        assert!(!ops.delete_manifest("app", "sha256:d").await);
    }
}
