use async_trait::async_trait;
use anyhow::anyhow;
use nv_core::{Embedder, Error, Result};
use crate::huggingface::HuggingFaceClient;
use crate::InferenceConfig;

/// Sentence embeddings from the hosted feature-extraction pipeline.
#[derive(Debug)]
pub struct HuggingFaceEmbedder {
    client: HuggingFaceClient,
    model: String,
}

impl HuggingFaceEmbedder {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        Ok(Self {
            client: HuggingFaceClient::new(config)?,
            model: config.embedding_model.clone(),
        })
    }
}

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let path = format!("pipeline/feature-extraction/{}", self.model);
        let inputs = texts.to_vec();
        let embeddings: Vec<Vec<f32>> = self.client.infer(&path, &inputs).await?;
        if embeddings.len() != texts.len() {
            return Err(Error::External(anyhow!(
                "Expected {} embeddings from {}, got {}",
                texts.len(),
                self.model,
                embeddings.len()
            )));
        }
        Ok(embeddings)
    }
}
