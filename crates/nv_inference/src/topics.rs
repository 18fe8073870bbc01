use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use nv_core::{Error, KeyphraseModel, KeyphraseOptions, Result, Topic, NO_CONTENT};

/// Ranks the key phrases of an article body.
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    model: Arc<dyn KeyphraseModel>,
    options: KeyphraseOptions,
    timeout: Duration,
}

impl TopicExtractor {
    pub fn new(model: Arc<dyn KeyphraseModel>) -> Self {
        Self {
            model,
            options: KeyphraseOptions::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_options(mut self, options: KeyphraseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn options(&self) -> &KeyphraseOptions {
        &self.options
    }

    /// Key phrases of `text`, most relevant first, as many as the model
    /// returns. The "no content" sentinel and blank text have no topics and
    /// never reach the model.
    pub async fn try_extract(&self, text: &str) -> Result<Vec<Topic>> {
        if text == NO_CONTENT || text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut topics = tokio::time::timeout(self.timeout, self.model.keyphrases(text, &self.options))
            .await
            .map_err(|_| {
                Error::Extraction(format!("{} did not answer within {:?}", self.model.name(), self.timeout))
            })??;

        topics.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        Ok(topics)
    }

    /// Like [`TopicExtractor::try_extract`], but a failing model yields no
    /// topics instead of an error.
    pub async fn extract(&self, text: &str) -> Vec<Topic> {
        match self.try_extract(text).await {
            Ok(topics) => topics,
            Err(e) => {
                warn!("⚠️ Topic extraction with {} failed: {}", self.model.name(), e);
                Vec::new()
            }
        }
    }
}
