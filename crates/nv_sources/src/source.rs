use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use nv_core::{Article, Error, Result, SearchBackend, MAX_ARTICLES};

/// Retrieves the articles a report is built from.
pub struct ArticleSource {
    backend: Arc<dyn SearchBackend>,
    timeout: Duration,
}

impl fmt::Debug for ArticleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleSource")
            .field("backend", &self.backend.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ArticleSource {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches at most ten articles about `entity`, in the backend's order.
    ///
    /// An entity with no coverage yields an empty list. Any backend failure,
    /// including a timeout, is reported as [`Error::SourceUnavailable`].
    pub async fn fetch(&self, entity: &str) -> Result<Vec<Article>> {
        info!("📰 Searching {} for \"{}\"", self.backend.name(), entity);

        let results = match tokio::time::timeout(self.timeout, self.backend.search(entity)).await {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => return Err(source_unavailable(e)),
            Err(_) => {
                return Err(Error::SourceUnavailable(format!(
                    "{} did not answer within {:?}",
                    self.backend.name(),
                    self.timeout
                )))
            }
        };

        let articles: Vec<Article> = results
            .into_iter()
            .take(MAX_ARTICLES)
            .map(Article::from_raw)
            .collect();

        if articles.is_empty() {
            info!("🫙 No articles found for \"{}\"", entity);
        } else {
            info!("✨ Found {} articles for \"{}\"", articles.len(), entity);
        }
        Ok(articles)
    }
}

fn source_unavailable(error: Error) -> Error {
    match error {
        Error::SourceUnavailable(_) => error,
        other => Error::SourceUnavailable(other.to_string()),
    }
}
