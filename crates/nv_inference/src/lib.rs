use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use nv_core::{Embedder, Error, KeyphraseModel, Result, SentimentModel};

pub mod embeddings;
pub mod huggingface;
pub mod keyphrase;
pub mod models;
pub mod sentiment;
pub mod topics;

pub use keyphrase::KeyBertModel;
pub use sentiment::SentimentClassifier;
pub use topics::TopicExtractor;

pub const HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Binary SST-2 sentiment model used unless another is configured.
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Default sentence-embedding model for key phrase scoring.
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

#[derive(Clone)]
pub struct InferenceConfig {
    /// `huggingface` or `lexicon`
    pub sentiment_backend: String,
    /// `huggingface` or `hashing`
    pub embedding_backend: String,
    pub api_token: Option<String>,
    pub base_url: Url,
    pub sentiment_model: String,
    pub embedding_model: String,
    /// Key phrases kept per article.
    pub top_n: usize,
    pub timeout: Duration,
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("sentiment_backend", &self.sentiment_backend)
            .field("embedding_backend", &self.embedding_backend)
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("sentiment_model", &self.sentiment_model)
            .field("embedding_model", &self.embedding_model)
            .field("top_n", &self.top_n)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sentiment_backend: "huggingface".to_string(),
            embedding_backend: "huggingface".to_string(),
            api_token: None,
            base_url: Url::parse(HUGGINGFACE_BASE_URL).expect("static Hugging Face URL is valid"),
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            top_n: 5,
            timeout: Duration::from_secs(30),
        }
    }
}

pub fn create_sentiment_model(config: &InferenceConfig) -> Result<Arc<dyn SentimentModel>> {
    match config.sentiment_backend.as_str() {
        "huggingface" => Ok(Arc::new(models::HuggingFaceSentiment::new(config)?)),
        "lexicon" => Ok(Arc::new(models::LexiconSentiment::new())),
        other => Err(Error::Config(format!(
            "Unknown sentiment model: {}. Available models: huggingface, lexicon",
            other
        ))),
    }
}

pub fn create_embedder(config: &InferenceConfig) -> Result<Arc<dyn Embedder>> {
    match config.embedding_backend.as_str() {
        "huggingface" => Ok(Arc::new(embeddings::HuggingFaceEmbedder::new(config)?)),
        "hashing" => Ok(Arc::new(embeddings::HashingEmbedder::default())),
        other => Err(Error::Config(format!(
            "Unknown embedding model: {}. Available models: huggingface, hashing",
            other
        ))),
    }
}

pub fn create_keyphrase_model(config: &InferenceConfig) -> Result<Arc<dyn KeyphraseModel>> {
    Ok(Arc::new(KeyBertModel::new(create_embedder(config)?)))
}

pub mod prelude {
    pub use super::{
        create_embedder, create_keyphrase_model, create_sentiment_model, InferenceConfig, SentimentClassifier,
        TopicExtractor,
    };
    pub use nv_core::{Classification, Error, Result, Sentiment, Topic};
}
