use thiserror::Error;

#[derive(Error, Debug)]
pub enum MochiSyncError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Please provide an API key in the settings to use mochi-sync")]
    MissingApiKey,

    #[error("A non-empty delimiter is required to split text into cards")]
    EmptyDelimiter,

    #[error("No template selected. Run `select-template` first.")]
    NoTemplateSelected,

    #[error("Template '{0}' no longer exists on Mochi")]
    TemplateNotFound(String),

    #[error("Template invalid! Needs one field after name.")]
    InvalidTemplate,

    #[error("MochiSyncError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for MochiSyncError {
    fn from(error: std::io::Error) -> Self {
        MochiSyncError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for MochiSyncError {
    fn from(error: reqwest::Error) -> Self {
        MochiSyncError::Reqwest(Box::new(error))
    }
}
