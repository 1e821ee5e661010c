//! Runs one command-line action against the registry

use crate::cleanup::{CleanupWorkflow, Confirm, ConsoleConfirm};
use crate::cli::args::Args;
use crate::cli::operation_mode::OperationMode;
use crate::config::RegistryEndpoint;
use crate::error::Result;
use crate::image::ImageReference;
use crate::logging::Logger;
use crate::registry::RegistryClient;

/// How a handled action ended. `Failed` maps to a non-zero exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed,
}

pub struct Runner<C: Confirm = ConsoleConfirm> {
    mode: OperationMode,
    client: RegistryClient,
    confirm: C,
    output: Logger,
}

impl Runner<ConsoleConfirm> {
    /// Build the endpoint, client and console prompt from parsed arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let output = if args.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(args.verbose)
        };

        let mode = args.operation_mode()?;
        let endpoint = RegistryEndpoint::new(&args.server)?;
        let client = RegistryClient::builder(endpoint)
            .with_config(args.client_config()?)
            .with_output(output.clone())
            .build()?;

        Ok(Self::new(mode, client, ConsoleConfirm::new(), output))
    }
}

impl<C: Confirm> Runner<C> {
    pub fn new(mode: OperationMode, client: RegistryClient, confirm: C, output: Logger) -> Self {
        Self {
            mode,
            client,
            confirm,
            output,
        }
    }

    pub async fn run(self) -> Result<RunStatus> {
        tracing::debug!(mode = %self.mode, endpoint = %self.client.endpoint(), "running");
        self.output.verbose(&format!("{}", self.mode));
        if self.mode.is_destructive() {
            self.output
                .detail(&format!("Destructive action against {}", self.client.endpoint()));
        }

        match self.mode.clone() {
            OperationMode::Check => self.check().await,
            OperationMode::ListAll => self.list_all().await,
            OperationMode::GetManifest(reference) => self.get_manifest(&reference).await,
            OperationMode::Delete(reference) => self.delete(&reference).await,
            OperationMode::Cleanup(image) => self.cleanup(&image).await,
        }
    }

    async fn check(&self) -> Result<RunStatus> {
        if self.client.check_connection().await {
            Ok(RunStatus::Completed)
        } else {
            Ok(RunStatus::Failed)
        }
    }

    async fn list_all(&self) -> Result<RunStatus> {
        let catalog = self.client.get_catalog().await?;
        let tag_set = self.client.get_all_tags(&catalog).await?;

        self.output.plain(&format!(
            "Found images for registry: {} (total: {})",
            self.client.endpoint(),
            catalog.len()
        ));
        self.output.words(&catalog);
        self.output.plain("");

        for (image, tags) in &tag_set {
            if tags.is_empty() {
                self.output
                    .plain(&format!("No tags found for image: {}", image));
            } else {
                self.output.plain(&format!(
                    "Tags for image: {} (total: {})",
                    image,
                    tags.len()
                ));
                self.output.words(tags);
            }
            self.output.plain("");
        }

        Ok(RunStatus::Completed)
    }

    async fn get_manifest(&self, reference: &ImageReference) -> Result<RunStatus> {
        match self
            .client
            .get_manifest_digest(&reference.name, &reference.tag)
            .await?
        {
            Some(digest) => self.output.plain(&format!("Manifest: {}", digest)),
            None => self.output.plain("Manifest not found"),
        }
        Ok(RunStatus::Completed)
    }

    async fn delete(&self, reference: &ImageReference) -> Result<RunStatus> {
        let Some(digest) = self
            .client
            .get_manifest_digest(&reference.name, &reference.tag)
            .await?
        else {
            self.output.plain(&format!("Image not found: {}", reference));
            return Ok(RunStatus::Completed);
        };

        self.output.plain(&format!("Manifest: {}", digest));
        if self.client.delete_manifest(&reference.name, &digest).await {
            Ok(RunStatus::Completed)
        } else {
            Ok(RunStatus::Failed)
        }
    }

    async fn cleanup(self, image: &str) -> Result<RunStatus> {
        let mut workflow = CleanupWorkflow::new(self.client, self.confirm, self.output);
        workflow.cleanup(image).await?;
        Ok(RunStatus::Completed)
    }
}
