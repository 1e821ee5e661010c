//! Per-tag decision states of a cleanup run
//!
//! ```text
//! Pending ──digest──▶ DigestResolved ──yes──▶ Confirmed ──202──▶ Deleted
//!    │                     │                     └──other──▶ DeleteFailed
//!    │                     └──no───▶ Skipped
//!    └──no digest──▶ NotFound
//! "latest" starts (and ends) as Retained
//! ```
//!
//! Transitions are pure; an event that does not apply to the current state
//! leaves it unchanged.

use crate::image::DEFAULT_TAG;
use crate::registry::ManifestDigest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagState {
    Pending,
    /// Never offered for deletion
    Retained,
    DigestResolved(ManifestDigest),
    NotFound,
    Confirmed(ManifestDigest),
    /// Operator declined
    Skipped(ManifestDigest),
    Deleted(ManifestDigest),
    DeleteFailed(ManifestDigest),
}

impl TagState {
    /// Entry state for a tag; the `latest` tag is retained unconditionally
    pub fn start(tag: &str) -> Self {
        if tag == DEFAULT_TAG {
            TagState::Retained
        } else {
            TagState::Pending
        }
    }

    pub fn on_digest(self, digest: Option<ManifestDigest>) -> Self {
        match (self, digest) {
            (TagState::Pending, Some(digest)) => TagState::DigestResolved(digest),
            (TagState::Pending, None) => TagState::NotFound,
            (state, _) => state,
        }
    }

    pub fn on_answer(self, confirmed: bool) -> Self {
        match self {
            TagState::DigestResolved(digest) if confirmed => TagState::Confirmed(digest),
            TagState::DigestResolved(digest) => TagState::Skipped(digest),
            state => state,
        }
    }

    pub fn on_delete(self, deleted: bool) -> Self {
        match self {
            TagState::Confirmed(digest) if deleted => TagState::Deleted(digest),
            TagState::Confirmed(digest) => TagState::DeleteFailed(digest),
            state => state,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TagState::Retained
                | TagState::NotFound
                | TagState::Skipped(_)
                | TagState::Deleted(_)
                | TagState::DeleteFailed(_)
        )
    }

    pub fn digest(&self) -> Option<&str> {
        match self {
            TagState::DigestResolved(digest)
            | TagState::Confirmed(digest)
            | TagState::Skipped(digest)
            | TagState::Deleted(digest)
            | TagState::DeleteFailed(digest) => Some(digest),
            TagState::Pending | TagState::Retained | TagState::NotFound => None,
        }
    }
}
