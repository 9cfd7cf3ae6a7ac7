use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::MochiSyncError,
    persistence,
};

pub const SETTINGS_FILE: &str = "settings.json";

/// User configuration persisted between invocations: the Mochi API key, the
/// card delimiter, the chosen template and the last chosen deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsData {
    pub api_key: String,
    pub delimiter: String,
    pub template_id: String,
    pub deck_id: Option<String>,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            delimiter: "#".to_string(),
            template_id: String::new(),
            deck_id: None,
        }
    }
}

impl SettingsData {
    pub fn load() -> Self {
        persistence::load_json_or_default(SETTINGS_FILE)
    }

    pub fn save(&self) -> Result<(), MochiSyncError> {
        persistence::save_json(self, SETTINGS_FILE)
    }
}
