use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub mod search;
pub mod source;

pub use search::create_search_backend;
pub use source::ArticleSource;

pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org";

#[derive(Clone)]
pub struct SourceConfig {
    /// Search backend name: `newsapi` or `fixture`.
    pub backend: String,
    pub api_key: Option<String>,
    pub base_url: Url,
    pub page_size: usize,
    /// JSON results served by the `fixture` backend.
    pub fixture_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("page_size", &self.page_size)
            .field("fixture_path", &self.fixture_path)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            backend: "newsapi".to_string(),
            api_key: None,
            base_url: Url::parse(NEWSAPI_BASE_URL).expect("static NewsAPI URL is valid"),
            page_size: nv_core::MAX_ARTICLES,
            fixture_path: None,
            timeout: Duration::from_secs(30),
        }
    }
}

pub mod prelude {
    pub use super::{ArticleSource, SourceConfig};
    pub use nv_core::{Article, Error, RawArticle, Result, SearchBackend};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_redacts_key() {
        let config = SourceConfig {
            api_key: Some("super-secret".to_string()),
            ..SourceConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
