use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use nv_core::{Classification, Error, Result, Sentiment, SentimentModel, NO_CONTENT};

/// Assigns each article one of the three sentiment labels.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    model: Arc<dyn SentimentModel>,
    timeout: Duration,
}

impl SentimentClassifier {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self {
            model,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Classifies `text`. The "no content" sentinel is NEUTRAL with full
    /// confidence and is never sent to the model.
    pub async fn try_classify(&self, text: &str) -> Result<Classification> {
        if text == NO_CONTENT {
            return Ok(Classification {
                label: Sentiment::Neutral,
                confidence: 1.0,
            });
        }

        let raw = tokio::time::timeout(self.timeout, self.model.classify(text))
            .await
            .map_err(|_| {
                Error::Classification(format!("{} did not answer within {:?}", self.model.name(), self.timeout))
            })?
            .map_err(|e| match e {
                Error::Classification(_) => e,
                other => Error::Classification(other.to_string()),
            })?;

        Ok(Classification {
            label: Sentiment::from_label(&raw.label),
            confidence: raw.score,
        })
    }

    /// Like [`SentimentClassifier::try_classify`], but a failing model yields
    /// NEUTRAL with zero confidence.
    pub async fn classify(&self, text: &str) -> Classification {
        match self.try_classify(text).await {
            Ok(classification) => classification,
            Err(e) => {
                warn!("⚠️ Sentiment analysis with {} failed: {}", self.model.name(), e);
                Classification {
                    label: Sentiment::Neutral,
                    confidence: 0.0,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use anyhow::anyhow;
    use nv_core::RawClassification;

    #[derive(Debug)]
    struct FixedModel {
        label: &'static str,
        calls: AtomicUsize,
    }

    impl FixedModel {
        fn new(label: &'static str) -> Self {
            Self {
                label,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SentimentModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn classify(&self, _text: &str) -> Result<RawClassification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawClassification {
                label: self.label.to_string(),
                score: 0.87,
            })
        }
    }

    #[derive(Debug)]
    struct FailingModel;

    #[async_trait]
    impl SentimentModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        async fn classify(&self, _text: &str) -> Result<RawClassification> {
            Err(Error::External(anyhow!("model offline")))
        }
    }

    #[tokio::test]
    async fn test_sentinel_is_neutral_without_model_call() {
        let model = Arc::new(FixedModel::new("POSITIVE"));
        let classifier = SentimentClassifier::new(model.clone());

        let result = classifier.classify(NO_CONTENT).await;
        assert_eq!(result.label, Sentiment::Neutral);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_labels_are_normalized() {
        for (label, expected) in [
            ("POSITIVE", Sentiment::Positive),
            ("negative", Sentiment::Negative),
            ("LABEL_2", Sentiment::Neutral),
        ] {
            let classifier = SentimentClassifier::new(Arc::new(FixedModel::new(label)));
            let result = classifier.classify("Acme profits soar").await;
            assert_eq!(result.label, expected);
            assert!((result.confidence - 0.87).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn test_failure_is_neutral_zero() {
        let classifier = SentimentClassifier::new(Arc::new(FailingModel));
        let err = classifier.try_classify("Acme").await.unwrap_err();
        assert!(matches!(err, Error::Classification(_)));

        let result = classifier.classify("Acme").await;
        assert_eq!(result.label, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.0);
    }
}
