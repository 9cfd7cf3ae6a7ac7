#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::Mutex,
    };

    use async_trait::async_trait;

    use crate::{
        core::MochiSyncError,
        mochi::types::{
            Card,
            Template,
            TemplateField,
        },
        segmentation::{
            segment,
            SegmentedRecord,
        },
        sync::{
            reconcile,
            CardStore,
            SyncOutcome,
        },
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum StoreCall {
        Create { name: String, content: String },
        Update { card_id: String, name: String, content: String },
    }

    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<StoreCall>>,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<StoreCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CardStore for RecordingStore {
        async fn create_card(&self, name: &str, content: &str, _deck_id: &str, _t: &Template) {
            self.calls
                .lock()
                .unwrap()
                .push(StoreCall::Create { name: name.to_string(), content: content.to_string() });
        }

        async fn update_card(
            &self,
            card_id: &str,
            name: &str,
            content: &str,
            _deck_id: &str,
            _t: &Template,
        ) {
            self.calls.lock().unwrap().push(StoreCall::Update {
                card_id: card_id.to_string(),
                name: name.to_string(),
                content: content.to_string(),
            });
        }
    }

    fn field(id: &str, name: &str, pos: &str) -> TemplateField {
        TemplateField { id: id.to_string(), name: name.to_string(), pos: pos.to_string() }
    }

    fn basic_template() -> Template {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), field("name", "Name", "a"));
        fields.insert("V72yjxYh".to_string(), field("V72yjxYh", "Content", "b"));
        Template {
            id: "tmpl1".to_string(),
            name: "Basic".to_string(),
            content: String::new(),
            fields,
            trashed: false,
            archived: false,
        }
    }

    fn name_only_template() -> Template {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), field("name", "Name", "a"));
        Template {
            id: "tmpl2".to_string(),
            name: "Name only".to_string(),
            content: String::new(),
            fields,
            trashed: false,
            archived: false,
        }
    }

    fn card(id: &str, name: &str, content: &str) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            deck_id: "deck1".to_string(),
            template_id: Some("tmpl1".to_string()),
            fields: HashMap::new(),
            trashed: false,
        }
    }

    fn record(name: &str, content: &str) -> SegmentedRecord {
        SegmentedRecord { name: name.to_string(), content: content.to_string() }
    }

    #[tokio::test]
    async fn empty_deck_creates_every_card() {
        let text = "# Photosynthesis\nThe process by which plants convert light to energy.\n# Mitosis\nCell division producing two identical cells.";
        let records = segment(text, "#");
        let store = RecordingStore::default();

        let outcome =
            reconcile(records, &[], "deck1", &basic_template(), &store).await.unwrap();

        assert_eq!(
            outcome,
            SyncOutcome { created: 2, updated: 0, skipped: 0, total_segmented: 2 }
        );
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Create {
                    name: "Photosynthesis".to_string(),
                    content: "The process by which plants convert light to energy.".to_string(),
                },
                StoreCall::Create {
                    name: "Mitosis".to_string(),
                    content: "Cell division producing two identical cells.".to_string(),
                },
            ]
        );
        assert_eq!(outcome.summary(), "Modified/created 2 out of 2 cards");
    }

    #[tokio::test]
    async fn second_run_against_refreshed_snapshot_is_idempotent() {
        let records = vec![record("A", "contentA"), record("B", "contentB")];
        let existing = vec![card("c1", "A", "contentA"), card("c2", "B", "contentB")];
        let store = RecordingStore::default();

        let outcome = reconcile(records, &existing, "deck1", &basic_template(), &store)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SyncOutcome { created: 0, updated: 0, skipped: 2, total_segmented: 2 }
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn case_insensitive_lookup_never_duplicates_a_card() {
        let existing = vec![card("c1", "Card A", "X")];
        let store = RecordingStore::default();

        // The case-drifted name still finds the existing card, so no create.
        // Exact change detection sees "card a" != "Card A" and updates.
        let outcome =
            reconcile(vec![record("card a", "X")], &existing, "deck1", &basic_template(), &store)
                .await
                .unwrap();

        assert_eq!(outcome.created, 0);
        assert_eq!(outcome.updated, 1);
        assert_eq!(
            store.calls(),
            vec![StoreCall::Update {
                card_id: "c1".to_string(),
                name: "card a".to_string(),
                content: "X".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn identical_record_is_skipped() {
        let existing = vec![card("c1", "Card A", "X")];
        let store = RecordingStore::default();

        let outcome =
            reconcile(vec![record("Card A", "X")], &existing, "deck1", &basic_template(), &store)
                .await
                .unwrap();

        assert_eq!(
            outcome,
            SyncOutcome { created: 0, updated: 0, skipped: 1, total_segmented: 1 }
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn changed_content_is_an_update() {
        let existing = vec![card("c1", "Card A", "X")];
        let store = RecordingStore::default();

        let outcome =
            reconcile(vec![record("Card A", "Y")], &existing, "deck1", &basic_template(), &store)
                .await
                .unwrap();

        assert_eq!(outcome.updated, 1);
        assert_eq!(
            store.calls(),
            vec![StoreCall::Update {
                card_id: "c1".to_string(),
                name: "Card A".to_string(),
                content: "Y".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn case_only_title_correction_is_an_update() {
        let existing = vec![card("c1", "card a", "X")];
        let store = RecordingStore::default();

        let outcome =
            reconcile(vec![record("Card A", "X")], &existing, "deck1", &basic_template(), &store)
                .await
                .unwrap();

        assert_eq!(outcome.updated, 1);
        assert_eq!(outcome.created, 0);
    }

    #[tokio::test]
    async fn template_without_content_field_aborts_with_zero_calls() {
        let store = RecordingStore::default();

        let result = reconcile(
            vec![record("A", "contentA")],
            &[],
            "deck1",
            &name_only_template(),
            &store,
        )
        .await;

        assert!(matches!(result, Err(MochiSyncError::InvalidTemplate)));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn duplicate_snapshot_names_match_the_first_deterministically() {
        let existing = vec![card("c1", "Dup", "one"), card("c2", "Dup", "two")];

        for _ in 0..3 {
            let store = RecordingStore::default();
            let outcome = reconcile(
                vec![record("dup", "changed")],
                &existing,
                "deck1",
                &basic_template(),
                &store,
            )
            .await
            .unwrap();

            assert_eq!(outcome.updated, 1);
            match &store.calls()[0] {
                StoreCall::Update { card_id, .. } => assert_eq!(card_id, "c1"),
                other => panic!("expected update, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn duplicate_names_in_one_batch_both_create() {
        // The snapshot is not refreshed mid-loop, so both records see "no
        // match" and both attempt creation.
        let store = RecordingStore::default();

        let outcome = reconcile(
            vec![record("Same", "first"), record("Same", "second")],
            &[],
            "deck1",
            &basic_template(),
            &store,
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            SyncOutcome { created: 2, updated: 0, skipped: 0, total_segmented: 2 }
        );
    }
}
