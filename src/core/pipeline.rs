use crate::{
    core::MochiSyncError,
    mochi::{
        types::Template,
        MochiClient,
    },
    segmentation::segment,
    settings::SettingsData,
    sync::{
        reconcile,
        SyncOutcome,
    },
};

/// Resolve the configured template id against the live template list.
pub fn resolve_template<'a>(
    template_id: &str,
    templates: &'a [Template],
) -> Result<&'a Template, MochiSyncError> {
    if template_id.is_empty() {
        return Err(MochiSyncError::NoTemplateSelected);
    }

    templates
        .iter()
        .find(|template| template.id == template_id)
        .ok_or_else(|| MochiSyncError::TemplateNotFound(template_id.to_string()))
}

/// One full sync pass: validate configuration, snapshot the deck, segment the
/// text, reconcile against the snapshot.
///
/// Configuration problems abort before any remote mutation. The card snapshot
/// is fetched exactly once and never refreshed mid-loop.
pub async fn run_sync(
    client: &MochiClient,
    settings: &SettingsData,
    text: &str,
    deck_id: &str,
) -> Result<SyncOutcome, MochiSyncError> {
    if settings.api_key.is_empty() {
        return Err(MochiSyncError::MissingApiKey);
    }
    if settings.delimiter.is_empty() {
        return Err(MochiSyncError::EmptyDelimiter);
    }

    let templates = client.templates().await;
    let template = resolve_template(&settings.template_id, &templates)?;

    let existing = client.cards(deck_id).await;

    let records = segment(text, &settings.delimiter);
    reconcile(records, &existing, deck_id, template, client).await
}
