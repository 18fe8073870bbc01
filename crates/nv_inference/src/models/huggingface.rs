use async_trait::async_trait;
use anyhow::anyhow;
use serde::Deserialize;
use nv_core::{Error, RawClassification, Result, SentimentModel};
use crate::huggingface::HuggingFaceClient;
use crate::InferenceConfig;

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Text-classification answers come back either nested per input or flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn best(self) -> Option<LabelScore> {
        let scores = match self {
            ClassificationResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(scores) => scores,
        };
        scores.into_iter().max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Binary sentiment classifier served by the Hugging Face inference API.
#[derive(Debug)]
pub struct HuggingFaceSentiment {
    client: HuggingFaceClient,
    model: String,
}

impl HuggingFaceSentiment {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        Ok(Self {
            client: HuggingFaceClient::new(config)?,
            model: config.sentiment_model.clone(),
        })
    }
}

#[async_trait]
impl SentimentModel for HuggingFaceSentiment {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn classify(&self, text: &str) -> Result<RawClassification> {
        let path = format!("models/{}", self.model);
        let inputs = text.to_string();
        let response: ClassificationResponse = self.client.infer(&path, &inputs).await?;
        let best = response
            .best()
            .ok_or_else(|| Error::External(anyhow!("{} returned no labels", self.model)))?;
        Ok(RawClassification {
            label: best.label,
            score: best.score,
        })
    }
}
