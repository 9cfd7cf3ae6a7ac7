use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{
    de::DeserializeOwned,
    Serialize,
};

use crate::{
    core::MochiSyncError,
    mochi::types::{
        Card,
        CardPayload,
        Deck,
        Page,
        Template,
    },
    sync::CardStore,
};

const BASE_URL: &str = "https://app.mochi.cards/api";

/// Authenticated client for the Mochi REST API. List fetches swallow
/// transport errors into an empty result; the caller cannot tell a failed
/// fetch from an empty collection.
pub struct MochiClient {
    client: Client,
    api_key: String,
}

impl MochiClient {
    pub fn new(api_key: &str) -> Result<Self, MochiSyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MochiSyncError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { client, api_key: api_key.to_string() })
    }

    // Mochi uses HTTP Basic auth with the API key as username and an empty
    // password.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, reqwest::Error> {
        self.client
            .get(url)
            .basic_auth(&self.api_key, Some(""))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn post_json<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .post(url)
            .basic_auth(&self.api_key, Some(""))
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn decks(&self) -> Vec<Deck> {
        match self.get_json::<Page<Deck>>(&format!("{BASE_URL}/decks")).await {
            Ok(page) => {
                page.docs.into_iter().filter(|deck| !deck.trashed && !deck.archived).collect()
            }
            Err(e) => {
                eprintln!("Failed to fetch decks: {e}");
                Vec::new()
            }
        }
    }

    pub async fn templates(&self) -> Vec<Template> {
        match self.get_json::<Page<Template>>(&format!("{BASE_URL}/templates")).await {
            Ok(page) => page
                .docs
                .into_iter()
                .filter(|template| !template.trashed && !template.archived)
                .collect(),
            Err(e) => {
                eprintln!("Failed to fetch templates: {e}");
                Vec::new()
            }
        }
    }

    /// All live cards in a deck, following bookmark pagination until the
    /// service stops advancing. A failure mid-pagination drops the partial
    /// result and returns an empty list.
    pub async fn cards(&self, deck_id: &str) -> Vec<Card> {
        let mut all_cards = Vec::new();
        let mut bookmark: Option<String> = None;

        loop {
            let mut url = format!("{BASE_URL}/cards/?deck-id={deck_id}&limit=100");
            if let Some(mark) = &bookmark {
                url.push_str("&bookmark=");
                url.push_str(mark);
            }

            let page: Page<Card> = match self.get_json(&url).await {
                Ok(page) => page,
                Err(e) => {
                    eprintln!("Failed to fetch cards for deck {deck_id}: {e}");
                    return Vec::new();
                }
            };

            all_cards.extend(page.docs.into_iter().filter(|card| !card.trashed));

            match page.bookmark {
                Some(mark) if mark == "nil" => {
                    eprintln!("Deck {deck_id} does not exist or has no data");
                    break;
                }
                Some(mark) if bookmark.as_deref() != Some(mark.as_str()) => {
                    bookmark = Some(mark);
                }
                _ => break,
            }
        }

        all_cards
    }
}

#[async_trait]
impl CardStore for MochiClient {
    async fn create_card(&self, name: &str, content: &str, deck_id: &str, template: &Template) {
        let Some(payload) = CardPayload::build(name, content, deck_id, template) else {
            eprintln!("Template {} has no content field, cannot create card '{name}'", template.id);
            return;
        };

        match self.post_json(&format!("{BASE_URL}/cards"), &payload).await {
            Ok(_) => println!("create card {name}"),
            Err(e) => eprintln!("Failed to create card '{name}': {e}"),
        }
    }

    async fn update_card(
        &self,
        card_id: &str,
        name: &str,
        content: &str,
        deck_id: &str,
        template: &Template,
    ) {
        let Some(payload) = CardPayload::build(name, content, deck_id, template) else {
            eprintln!("Template {} has no content field, cannot update card {card_id}", template.id);
            return;
        };

        match self.post_json(&format!("{BASE_URL}/cards/{card_id}"), &payload).await {
            Ok(_) => println!("update card {card_id}"),
            Err(e) => eprintln!("Failed to update card {card_id}: {e}"),
        }
    }
}
