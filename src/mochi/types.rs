use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

// Mochi's wire format uses kebab-case keys and `?`-suffixed flags.

#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(rename = "parent-id", default)]
    pub parent_id: Option<String>,
    #[serde(rename = "trashed?", default)]
    pub trashed: bool,
    #[serde(rename = "archived?", default)]
    pub archived: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateField {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pos: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    pub fields: HashMap<String, TemplateField>,
    #[serde(rename = "trashed?", default)]
    pub trashed: bool,
    #[serde(rename = "archived?", default)]
    pub archived: bool,
}

impl Template {
    /// The field a card's content goes into: the first field after the name
    /// field in the template's display order. A template without one cannot
    /// hold cards made from text.
    pub fn first_content_field(&self) -> Option<&TemplateField> {
        self.fields.values().filter(|field| field.id != "name").min_by(|a, b| a.pos.cmp(&b.pos))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardField {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "deck-id")]
    pub deck_id: String,
    #[serde(rename = "template-id", default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, CardField>,
    #[serde(rename = "trashed?", default)]
    pub trashed: bool,
}

/// Request body for card creation and updates.
#[derive(Debug, Serialize)]
pub struct CardPayload {
    pub content: String,
    #[serde(rename = "deck-id")]
    pub deck_id: String,
    #[serde(rename = "template-id")]
    pub template_id: String,
    pub fields: HashMap<String, CardField>,
}

impl CardPayload {
    /// Populates the name field and the template's first content field.
    /// Returns None for a template with no field after name.
    pub fn build(
        name: &str,
        content: &str,
        deck_id: &str,
        template: &Template,
    ) -> Option<CardPayload> {
        let content_field = template.first_content_field()?;

        let mut fields = HashMap::new();
        fields.insert(
            "name".to_string(),
            CardField { id: "name".to_string(), value: name.to_string() },
        );
        fields.insert(
            content_field.id.clone(),
            CardField { id: content_field.id.clone(), value: content.to_string() },
        );

        Some(CardPayload {
            content: content.to_string(),
            deck_id: deck_id.to_string(),
            template_id: template.id.clone(),
            fields,
        })
    }
}

/// Paginated list envelope. A `bookmark` of `"nil"` means the requested
/// collection does not exist or has no data.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub bookmark: Option<String>,
    pub docs: Vec<T>,
}
