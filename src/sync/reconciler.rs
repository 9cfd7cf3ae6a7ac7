use async_trait::async_trait;

use crate::{
    core::MochiSyncError,
    mochi::types::{
        Card,
        Template,
    },
    segmentation::SegmentedRecord,
};

/// Remote mutations issued during reconciliation. Implementations log and
/// swallow their own failures; a bad remote call never stops the loop, so the
/// outcome counters are a weak guarantee rather than a verified commit.
#[async_trait]
pub trait CardStore {
    async fn create_card(&self, name: &str, content: &str, deck_id: &str, template: &Template);
    async fn update_card(
        &self,
        card_id: &str,
        name: &str,
        content: &str,
        deck_id: &str,
        template: &Template,
    );
}

/// Counters for one reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub total_segmented: usize,
}

impl SyncOutcome {
    pub fn modified(&self) -> usize {
        self.created + self.updated
    }

    pub fn summary(&self) -> String {
        format!("Modified/created {} out of {} cards", self.modified(), self.total_segmented)
    }
}

/// Reconcile segmented records against a deck snapshot, creating missing
/// cards and updating changed ones through `store`.
///
/// The snapshot is taken once by the caller and never refreshed here, so two
/// input records sharing a name that is absent from the snapshot will both be
/// created.
pub async fn reconcile(
    records: Vec<SegmentedRecord>,
    existing: &[Card],
    deck_id: &str,
    template: &Template,
    store: &dyn CardStore,
) -> Result<SyncOutcome, MochiSyncError> {
    // A template without a field after name cannot hold these cards. Checked
    // before the loop: zero mutations on a bad template.
    if template.first_content_field().is_none() {
        return Err(MochiSyncError::InvalidTemplate);
    }

    let mut outcome = SyncOutcome::default();

    for record in records {
        outcome.total_segmented += 1;

        // Lookup ignores case so capitalization drift between the text and
        // the remote store does not duplicate a card. First match in snapshot
        // order wins when the snapshot holds duplicate names.
        let matched = existing
            .iter()
            .find(|card| card.name.trim().to_lowercase() == record.name.trim().to_lowercase());

        match matched {
            Some(card) => {
                // Change detection is exact, so a deliberate case correction
                // to a title still goes out as an update.
                if record.content != card.content || record.name != card.name {
                    store
                        .update_card(&card.id, &record.name, &record.content, deck_id, template)
                        .await;
                    outcome.updated += 1;
                } else {
                    outcome.skipped += 1;
                }
            }
            None => {
                store.create_card(&record.name, &record.content, deck_id, template).await;
                outcome.created += 1;
            }
        }
    }

    Ok(outcome)
}
