//! Image naming
//!
//! Registry operations address images by repository name and tag. This module
//! provides [`ImageReference`], the parsed form of the `name[:tag]` strings
//! accepted on the command line.

pub mod reference;

pub use reference::{DEFAULT_TAG, ImageReference};
