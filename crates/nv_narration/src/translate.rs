use std::fmt;
use async_trait::async_trait;
use anyhow::anyhow;
use reqwest::Client;
use serde_json::Value;
use url::Url;
use nv_core::{Error, Result, Translator};
use crate::chunk::split_text;
use crate::NarrationConfig;

pub const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Longest text sent in a single translation request.
pub const MAX_TRANSLATION_CHARS: usize = 5000;

/// Unofficial Google Translate endpoint used by the web widget.
#[derive(Clone)]
pub struct GoogleTranslate {
    client: Client,
    endpoint: Url,
}

impl fmt::Debug for GoogleTranslate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTranslate")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl GoogleTranslate {
    pub fn new(config: &NarrationConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = Url::parse(GOOGLE_TRANSLATE_URL)
            .map_err(|e| Error::Config(format!("Invalid translate URL: {}", e)))?;
        Ok(Self { client, endpoint })
    }

    async fn translate_chunk(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let body: Value = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_translation(&body)
    }
}

/// The answer is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::External(anyhow!("Unexpected translation response shape")))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

#[async_trait]
impl Translator for GoogleTranslate {
    fn name(&self) -> &str {
        "GoogleTranslate"
    }

    async fn translate(&self, text: &str, source: Option<&str>, target: &str) -> Result<String> {
        let source = source.unwrap_or("auto");
        let mut translated = Vec::new();
        for chunk in split_text(text, MAX_TRANSLATION_CHARS) {
            translated.push(self.translate_chunk(&chunk, source, target).await?);
        }
        Ok(translated.join(" "))
    }
}

/// Returns the text unchanged.
#[derive(Debug, Default, Clone)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    fn name(&self) -> &str {
        "Passthrough"
    }

    async fn translate(&self, text: &str, _source: Option<&str>, _target: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_translation_joins_segments() {
        let body = json!([
            [["कुल मिलाकर भावना सकारात्मक है। ", "Overall sentiment is positive. ", null, null, 10],
             ["बाज़ार", "Market", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "कुल मिलाकर भावना सकारात्मक है। बाज़ार");
    }

    #[test]
    fn test_parse_translation_rejects_other_shapes() {
        assert!(parse_translation(&json!({"error": "quota"})).is_err());
    }

    #[tokio::test]
    async fn test_passthrough() {
        let translated = PassthroughTranslator.translate("Acme", None, "hi").await.unwrap();
        assert_eq!(translated, "Acme");
    }
}
