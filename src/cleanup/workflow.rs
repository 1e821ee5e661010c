//! Interactive pruning of one image's tags

use crate::cleanup::confirm::Confirm;
use crate::cleanup::state::TagState;
use crate::error::Result;
use crate::logging::Logger;
use crate::registry::RegistryClient;
use crate::registry::models::tags_for;

/// Final state of one tag, with its 1-based position in the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    pub index: usize,
    pub tag: String,
    pub state: TagState,
}

#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    pub image: String,
    /// False when the image is not in the catalog; nothing was attempted
    pub image_found: bool,
    pub outcomes: Vec<TagOutcome>,
}

impl CleanupReport {
    fn count(&self, predicate: impl Fn(&TagState) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.state)).count()
    }

    pub fn deleted(&self) -> usize {
        self.count(|s| matches!(s, TagState::Deleted(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, TagState::DeleteFailed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, TagState::Skipped(_)))
    }

    pub fn retained(&self) -> usize {
        self.count(|s| matches!(s, TagState::Retained))
    }

    pub fn not_found(&self) -> usize {
        self.count(|s| matches!(s, TagState::NotFound))
    }

    pub fn outcome(&self, tag: &str) -> Option<&TagOutcome> {
        self.outcomes.iter().find(|o| o.tag == tag)
    }
}

/// Walks an image's tags in registry order and deletes the ones the operator
/// confirms. `latest` is never offered. A failed deletion is recorded and the
/// walk moves on to the next tag.
pub struct CleanupWorkflow<C: Confirm> {
    client: RegistryClient,
    confirm: C,
    output: Logger,
}

impl<C: Confirm> CleanupWorkflow<C> {
    pub fn new(client: RegistryClient, confirm: C, output: Logger) -> Self {
        Self {
            client,
            confirm,
            output,
        }
    }

    pub fn confirmer(&self) -> &C {
        &self.confirm
    }

    /// Run the cleanup for `image`.
    ///
    /// Fails only when the catalog snapshot cannot be taken or a digest
    /// lookup cannot reach the registry.
    pub async fn cleanup(&mut self, image: &str) -> Result<CleanupReport> {
        let catalog = self.client.get_catalog().await?;
        let tag_set = self.client.get_all_tags(&catalog).await?;

        let mut report = CleanupReport {
            image: image.to_string(),
            ..Default::default()
        };

        let Some(tags) = tags_for(&tag_set, image) else {
            self.output.warning(&format!("Image not found: {}", image));
            return Ok(report);
        };
        report.image_found = true;

        let total = tags.len();
        self.output
            .section(&format!("Cleanup for image: {} (total tags: {})", image, total));

        for (i, tag) in tags.iter().enumerate() {
            let index = i + 1;
            let state = self.process_tag(image, tag, index, total).await?;
            tracing::debug!(%image, %tag, ?state, "tag processed");
            report.outcomes.push(TagOutcome {
                index,
                tag: tag.clone(),
                state,
            });
        }

        self.output.summary_kv(
            "Cleanup summary",
            &[
                ("Deleted", report.deleted().to_string()),
                ("Declined", report.skipped().to_string()),
                ("Retained", report.retained().to_string()),
                ("Already gone", report.not_found().to_string()),
                ("Failed", report.failed().to_string()),
            ],
        );

        for outcome in &report.outcomes {
            if let (TagState::DeleteFailed(_), Some(digest)) =
                (&outcome.state, outcome.state.digest())
            {
                self.output
                    .warning(&format!("Not deleted: {}:{} ({})", image, outcome.tag, digest));
            }
        }

        Ok(report)
    }

    async fn process_tag(
        &mut self,
        image: &str,
        tag: &str,
        index: usize,
        total: usize,
    ) -> Result<TagState> {
        let progress = format!("[{}/{}]", index, total);
        self.output.step(&format!("{} {}:{}", progress, image, tag));
        let mut state = TagState::start(tag);

        while !state.is_terminal() {
            state = match state {
                TagState::Pending => {
                    let digest = self.client.get_manifest_digest(image, tag).await?;
                    if digest.is_none() {
                        self.output.info(&format!(
                            "{} Manifest not found for {}:{}, skipping",
                            progress, image, tag
                        ));
                    }
                    TagState::Pending.on_digest(digest)
                }
                TagState::DigestResolved(digest) => {
                    let prompt = format!(
                        "{} Delete {}:{} ({})? [y/N] ",
                        progress, image, tag, digest
                    );
                    let confirmed = self.confirm.confirm(&prompt).await?;
                    if !confirmed {
                        self.output
                            .detail(&format!("{} Skipped {}:{}", progress, image, tag));
                    }
                    TagState::DigestResolved(digest).on_answer(confirmed)
                }
                TagState::Confirmed(digest) => {
                    let deleted = self.client.delete_manifest(image, &digest).await;
                    if !deleted {
                        self.output.warning(&format!(
                            "{} Could not delete {}:{}, continuing",
                            progress, image, tag
                        ));
                    }
                    TagState::Confirmed(digest).on_delete(deleted)
                }
                terminal => terminal,
            };
        }

        if state == TagState::Retained {
            self.output.info(&format!(
                "{} Keeping {}:{} (latest is always retained)",
                progress, image, tag
            ));
        }

        Ok(state)
    }
}
