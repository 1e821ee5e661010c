//! Interactive tag cleanup
//!
//! [`CleanupWorkflow`] prunes the tags of a single image: it snapshots the
//! catalog, walks the image's tags in registry order, keeps `latest`, resolves
//! each remaining tag to its digest and deletes it only after a yes from the
//! injected [`Confirm`] source. Each tag's progress is tracked as a
//! [`TagState`].

pub mod confirm;
pub mod state;
pub mod workflow;

pub use confirm::{Confirm, ConsoleConfirm, ScriptedConfirm, is_affirmative};
pub use state::TagState;
pub use workflow::{CleanupReport, CleanupWorkflow, TagOutcome};
