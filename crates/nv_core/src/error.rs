use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Narration unavailable: {0}")]
    NarrationUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for failures of an upstream capability the caller cannot do
    /// anything about (news search, translation, speech synthesis).
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::SourceUnavailable(_) | Error::NarrationUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
