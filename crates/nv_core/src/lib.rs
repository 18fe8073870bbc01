pub mod error;
pub mod models;
pub mod search;
pub mod speech;
pub mod types;

pub use error::{Error, Result};
pub use models::{
    cosine_similarity, Embedder, KeyphraseModel, KeyphraseOptions, RawClassification, SentimentModel,
    StopWords,
};
pub use search::SearchBackend;
pub use speech::{SpeechSynthesizer, Translator};
pub use types::{
    AnalysisResult, Article, AudioArtifact, Classification, ComparativeReport, CoverageNote, RawArticle,
    Sentiment, SentimentDistribution, Topic, MAX_ARTICLES, NO_CONTENT, NO_SUMMARY,
};
