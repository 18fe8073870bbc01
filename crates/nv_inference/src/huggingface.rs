use std::fmt;
use anyhow::anyhow;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use nv_core::{Error, Result};
use crate::InferenceConfig;

#[derive(Serialize)]
pub(crate) struct InferenceOptions {
    pub wait_for_model: bool,
}

#[derive(Serialize)]
pub(crate) struct InferenceRequest<'a, T: Serialize> {
    pub inputs: &'a T,
    pub options: InferenceOptions,
}

/// Thin client for the Hugging Face hosted inference API.
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    api_token: Option<String>,
    base_url: Url,
}

impl fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("client", &"<reqwest::Client>")
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HuggingFaceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_token: config.api_token.clone().filter(|token| !token.trim().is_empty()),
            base_url: config.base_url.clone(),
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid Hugging Face URL: {}", e)))
    }

    /// Posts `inputs` to `path` and decodes the JSON answer.
    pub async fn infer<T, R>(&self, path: &str, inputs: &T) -> Result<R>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("Calling Hugging Face inference at {}", url);

        let mut request = self.client.post(url).json(&InferenceRequest {
            inputs,
            options: InferenceOptions { wait_for_model: true },
        });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::External(anyhow!("Hugging Face answered {}: {}", status, body)));
        }
        Ok(response.json::<R>().await?)
    }
}
