//! Command-line argument parsing

use crate::cli::operation_mode::OperationMode;
use crate::config::{ClientConfig, DEFAULT_SERVER};
use crate::error::handlers::ValidationErrorHandler;
use crate::error::Result;
use crate::image::ImageReference;
use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(name = "docker-registry-api")]
#[command(about = "Inspect and prune images in a Docker registry (HTTP API v2)")]
#[command(version)]
#[command(group(
    ArgGroup::new("action")
        .args(["check", "list_all", "get_manifest", "delete", "cleanup"])
        .multiple(false)
))]
pub struct Args {
    /// Registry server
    #[arg(
        long = "server",
        short = 's',
        env = "REGISTRY_API_SERVER",
        default_value = DEFAULT_SERVER,
        value_name = "HOST:PORT",
        help = "Registry server host and port"
    )]
    pub server: String,

    #[arg(long = "check", help = "Check connectivity to the registry (default action)")]
    pub check: bool,

    #[arg(long = "list-all", help = "List all images and their tags")]
    pub list_all: bool,

    #[arg(
        long = "get-manifest",
        value_name = "IMAGE",
        help = "Print the manifest digest of IMAGE[:TAG]"
    )]
    pub get_manifest: Option<String>,

    #[arg(
        long = "delete",
        value_name = "IMAGE",
        help = "Delete IMAGE[:TAG] from the registry"
    )]
    pub delete: Option<String>,

    #[arg(
        long = "cleanup",
        value_name = "IMAGE",
        help = "Interactively delete old tags of IMAGE (latest is kept)"
    )]
    pub cleanup: Option<String>,

    /// Timeout in seconds for each request
    #[arg(
        long = "timeout",
        short = 't',
        value_name = "SECONDS",
        help = "Timeout for each registry request in seconds [default: 10]"
    )]
    pub timeout: Option<u64>,

    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long = "quiet",
        short = 'q',
        conflicts_with = "verbose",
        help = "Only print errors and prompts"
    )]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Selected action; the connectivity check when no action flag is given
    pub fn operation_mode(&self) -> Result<OperationMode> {
        if let Some(image) = &self.get_manifest {
            return Ok(OperationMode::GetManifest(image.parse::<ImageReference>()?));
        }
        if let Some(image) = &self.delete {
            return Ok(OperationMode::Delete(image.parse::<ImageReference>()?));
        }
        if let Some(image) = &self.cleanup {
            let image = image.trim();
            ValidationErrorHandler::validate_image_name(image)?;
            return Ok(OperationMode::Cleanup(image.to_string()));
        }
        if self.list_all {
            return Ok(OperationMode::ListAll);
        }
        Ok(OperationMode::Check)
    }

    /// Client settings from the environment, overridden by flags
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env()?;
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config.validate()?;
        Ok(config)
    }
}
