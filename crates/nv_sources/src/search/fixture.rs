use std::path::Path;
use async_trait::async_trait;
use nv_core::{RawArticle, Result, SearchBackend};

/// Serves a fixed list of results regardless of the query. Used for offline
/// runs and tests.
#[derive(Debug, Clone, Default)]
pub struct FixtureSearch {
    results: Vec<RawArticle>,
}

impl FixtureSearch {
    pub fn new(results: Vec<RawArticle>) -> Self {
        Self { results }
    }

    /// Loads results from a JSON array of `{title, description, content}`
    /// objects.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let results: Vec<RawArticle> = serde_json::from_str(&data)?;
        Ok(Self::new(results))
    }
}

#[async_trait]
impl SearchBackend for FixtureSearch {
    fn name(&self) -> &str {
        "Fixture"
    }

    async fn search(&self, _query: &str) -> Result<Vec<RawArticle>> {
        Ok(self.results.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fixture_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "Acme profits soar", "description": null, "content": "Acme profits soar"}},
               {{"title": "Acme recall"}}]"#
        )
        .unwrap();

        let search = FixtureSearch::from_file(file.path()).unwrap();
        let results = search.search("anything").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content.as_deref(), Some("Acme profits soar"));
        assert!(results[1].content.is_none());
    }

    #[test]
    fn test_fixture_missing_file() {
        assert!(FixtureSearch::from_file(Path::new("/nonexistent/fixture.json")).is_err());
    }
}
