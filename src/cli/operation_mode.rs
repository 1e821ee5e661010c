//! The actions the command line can ask for

use crate::image::ImageReference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationMode {
    /// Probe the registry API root
    Check,
    /// Print every image with its tags
    ListAll,
    /// Print the manifest digest of one image reference
    GetManifest(ImageReference),
    /// Resolve one image reference to its digest and delete that manifest
    Delete(ImageReference),
    /// Interactively delete the non-latest tags of one image
    Cleanup(String),
}

impl OperationMode {
    pub fn description(&self) -> &'static str {
        match self {
            OperationMode::Check => "Check registry connectivity",
            OperationMode::ListAll => "List all images and tags",
            OperationMode::GetManifest(_) => "Get manifest digest",
            OperationMode::Delete(_) => "Delete image",
            OperationMode::Cleanup(_) => "Clean up image tags",
        }
    }

    /// Whether the action removes data from the registry
    pub fn is_destructive(&self) -> bool {
        matches!(self, OperationMode::Delete(_) | OperationMode::Cleanup(_))
    }
}

impl std::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationMode::Check | OperationMode::ListAll => f.write_str(self.description()),
            OperationMode::GetManifest(reference) | OperationMode::Delete(reference) => {
                write!(f, "{}: {}", self.description(), reference)
            }
            OperationMode::Cleanup(image) => write!(f, "{}: {}", self.description(), image),
        }
    }
}
