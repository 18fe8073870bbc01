use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;
use nv_core::{Error, RawArticle, Result, SearchBackend};
use crate::SourceConfig;

#[derive(Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
}

/// Search backend for the NewsAPI `/v2/everything` endpoint.
pub struct NewsApiSearch {
    client: Client,
    api_key: String,
    base_url: Url,
    page_size: usize,
}

impl fmt::Debug for NewsApiSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSearch")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl NewsApiSearch {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("NewsAPI key is required".to_string()))?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        })
    }

    fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join("v2/everything")
            .map_err(|e| Error::Config(format!("Invalid NewsAPI base URL: {}", e)))
    }
}

/// Decodes an `/v2/everything` body. An error envelope or an undecodable body
/// means the source is unavailable.
fn parse_everything(body: &str) -> Result<Vec<RawArticle>> {
    let response: EverythingResponse = serde_json::from_str(body)
        .map_err(|e| Error::SourceUnavailable(format!("Malformed NewsAPI response: {}", e)))?;

    if response.status != "ok" {
        return Err(Error::SourceUnavailable(format!(
            "NewsAPI returned {}: {}",
            response.code.as_deref().unwrap_or("error"),
            response.message.as_deref().unwrap_or("no message")
        )));
    }

    Ok(response
        .articles
        .into_iter()
        .map(|article| RawArticle {
            title: article.title,
            description: article.description,
            content: article.content,
        })
        .collect())
}

#[async_trait]
impl SearchBackend for NewsApiSearch {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn search(&self, query: &str) -> Result<Vec<RawArticle>> {
        let url = self.endpoint()?;
        let page_size = self.page_size.to_string();
        tracing::debug!("Querying {} for {:?}", url, query);

        let response = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .query(&[("q", query), ("pageSize", page_size.as_str())])
            .send()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("NewsAPI request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("Failed to read NewsAPI response: {}", e)))?;

        let articles = parse_everything(&body)?;
        if !status.is_success() {
            return Err(Error::SourceUnavailable(format!("NewsAPI answered with status {}", status)));
        }
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_everything() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"source": {"id": null, "name": "Wire"}, "title": "Acme profits soar",
                 "description": "Quarterly results", "content": "Acme profits soar... [+120 chars]"},
                {"title": "Acme recall", "description": null, "content": null}
            ]
        }"#;
        let articles = parse_everything(body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("Acme profits soar"));
        assert_eq!(articles[0].description.as_deref(), Some("Quarterly results"));
        assert!(articles[1].description.is_none());
        assert!(articles[1].content.is_none());
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#;
        let err = parse_everything(body).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
        assert!(err.to_string().contains("apiKeyInvalid"));
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_everything("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SourceConfig {
            api_key: Some("super-secret".to_string()),
            ..SourceConfig::default()
        };
        let search = NewsApiSearch::new(&config).unwrap();
        let debug = format!("{:?}", search);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert_eq!(search.endpoint().unwrap().as_str(), "https://newsapi.org/v2/everything");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_source_unavailable() {
        let config = SourceConfig {
            api_key: Some("key".to_string()),
            base_url: Url::parse("http://127.0.0.1:9/").unwrap(),
            timeout: std::time::Duration::from_secs(2),
            ..SourceConfig::default()
        };
        let search = NewsApiSearch::new(&config).unwrap();
        let err = search.search("Acme").await.unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }
}
