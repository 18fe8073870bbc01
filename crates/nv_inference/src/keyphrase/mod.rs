use std::collections::BTreeSet;
use std::sync::Arc;
use async_trait::async_trait;
use anyhow::anyhow;
use nv_core::{cosine_similarity, Embedder, Error, KeyphraseModel, KeyphraseOptions, Result, StopWords, Topic};

pub mod stopwords;

/// Embedding-based key phrase extraction: candidate n-grams are ranked by
/// how close their embedding sits to the embedding of the whole document.
#[derive(Debug, Clone)]
pub struct KeyBertModel {
    embedder: Arc<dyn Embedder>,
}

impl KeyBertModel {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

/// Lowercased word tokens of at least two word characters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Distinct candidate phrases in alphabetical order.
pub fn candidates(text: &str, options: &KeyphraseOptions) -> Result<Vec<String>> {
    let (min_n, max_n) = options.ngram_range;
    if min_n == 0 || min_n > max_n {
        return Err(Error::Extraction(format!(
            "Invalid n-gram range ({}, {})",
            min_n, max_n
        )));
    }

    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|token| match options.stop_words {
            StopWords::English => !stopwords::is_stop_word(token),
            StopWords::None => true,
        })
        .collect();

    let mut phrases = BTreeSet::new();
    for n in min_n..=max_n {
        for window in tokens.windows(n) {
            phrases.insert(window.join(" "));
        }
    }
    Ok(phrases.into_iter().collect())
}

fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}

#[async_trait]
impl KeyphraseModel for KeyBertModel {
    fn name(&self) -> &str {
        "KeyBERT"
    }

    async fn keyphrases(&self, text: &str, options: &KeyphraseOptions) -> Result<Vec<Topic>> {
        let phrases = candidates(text, options)?;
        if phrases.is_empty() || options.top_n == 0 {
            return Ok(Vec::new());
        }

        let mut inputs = Vec::with_capacity(phrases.len() + 1);
        inputs.push(text.to_string());
        inputs.extend(phrases.iter().cloned());

        let embeddings = self
            .embedder
            .embed(&inputs)
            .await
            .map_err(|e| Error::Extraction(format!("{} embedding failed: {}", self.embedder.name(), e)))?;
        let (document, phrase_embeddings) = embeddings
            .split_first()
            .ok_or_else(|| Error::External(anyhow!("{} returned no embeddings", self.embedder.name())))?;

        let mut topics: Vec<Topic> = phrases
            .into_iter()
            .zip(phrase_embeddings)
            .map(|(phrase, embedding)| Topic::new(phrase, round4(cosine_similarity(document, embedding))))
            .collect();

        topics.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        topics.truncate(options.top_n);
        Ok(topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashingEmbedder;

    #[derive(Debug)]
    struct BrokenEmbedder;

    #[async_trait]
    impl Embedder for BrokenEmbedder {
        fn name(&self) -> &str {
            "broken"
        }

        async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(Error::External(anyhow!("model offline")))
        }
    }

    fn model() -> KeyBertModel {
        KeyBertModel::new(Arc::new(HashingEmbedder::default()))
    }

    #[test]
    fn test_candidates_drop_stop_words_and_short_tokens() {
        let phrases = candidates("The Acme profits soared, a record!", &KeyphraseOptions::default()).unwrap();
        assert_eq!(
            phrases,
            vec!["acme", "acme profits", "profits", "profits soared", "record", "soared", "soared record"]
        );
    }

    #[test]
    fn test_candidates_without_stop_words() {
        let options = KeyphraseOptions {
            ngram_range: (1, 1),
            stop_words: StopWords::None,
            top_n: 5,
        };
        assert_eq!(candidates("the acme", &options).unwrap(), vec!["acme", "the"]);
    }

    #[test]
    fn test_invalid_ngram_range() {
        for range in [(0, 2), (3, 1)] {
            let options = KeyphraseOptions {
                ngram_range: range,
                ..KeyphraseOptions::default()
            };
            assert!(matches!(candidates("acme profits", &options), Err(Error::Extraction(_))));
        }
    }

    #[tokio::test]
    async fn test_keyphrases_ranked_and_capped() {
        let text = "Acme profits soar as Acme expands factories across Europe and Asia";
        let topics = model().keyphrases(text, &KeyphraseOptions::default()).await.unwrap();

        assert_eq!(topics.len(), 5);
        assert!(topics.windows(2).all(|pair| pair[0].relevance >= pair[1].relevance));
        for topic in &topics {
            assert_eq!(topic.relevance, round4(topic.relevance));
            assert!(!topic.phrase.split(' ').any(stopwords::is_stop_word));
        }
    }

    #[tokio::test]
    async fn test_keyphrases_of_stop_words_only() {
        let topics = model().keyphrases("and the of a", &KeyphraseOptions::default()).await.unwrap();
        assert!(topics.is_empty());
        let topics = model().keyphrases("", &KeyphraseOptions::default()).await.unwrap();
        assert!(topics.is_empty());
    }

    #[tokio::test]
    async fn test_embedder_failure_is_extraction_error() {
        let model = KeyBertModel::new(Arc::new(BrokenEmbedder));
        let err = model.keyphrases("acme profits", &KeyphraseOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
