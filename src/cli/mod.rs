//! Command line interface module
//!
//! Argument parsing, the action selected by the flags, and the runner that
//! executes that action against the registry.

pub mod args;
pub mod operation_mode;
pub mod runner;

pub use args::Args;
pub use operation_mode::OperationMode;
pub use runner::{RunStatus, Runner};
