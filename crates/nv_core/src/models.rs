use async_trait::async_trait;
use std::fmt;
use crate::types::Topic;
use crate::Result;

/// Stop-word list applied before candidate phrases are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopWords {
    English,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyphraseOptions {
    /// Inclusive range of tokens per phrase.
    pub ngram_range: (usize, usize),
    pub stop_words: StopWords,
    pub top_n: usize,
}

impl Default for KeyphraseOptions {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            stop_words: StopWords::English,
            top_n: 5,
        }
    }
}

/// Label and score exactly as a classifier reported them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClassification {
    pub label: String,
    pub score: f32,
}

#[async_trait]
pub trait Embedder: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Generate one embedding per input text, in input order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

#[async_trait]
pub trait KeyphraseModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Ranked key phrases for a piece of text, most relevant first
    async fn keyphrases(&self, text: &str, options: &KeyphraseOptions) -> Result<Vec<Topic>>;
}

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Binary polarity classification of a piece of text
    async fn classify(&self, text: &str) -> Result<RawClassification>;
}

/// Cosine similarity of two vectors; zero when either has no magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_default_keyphrase_options() {
        let options = KeyphraseOptions::default();
        assert_eq!(options.ngram_range, (1, 2));
        assert_eq!(options.stop_words, StopWords::English);
        assert_eq!(options.top_n, 5);
    }
}
