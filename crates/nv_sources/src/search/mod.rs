use std::sync::Arc;
use nv_core::{Error, Result, SearchBackend};
use crate::SourceConfig;

pub mod fixture;
pub mod newsapi;

pub use fixture::FixtureSearch;
pub use newsapi::NewsApiSearch;

/// Builds the search backend named in the configuration.
pub fn create_search_backend(config: &SourceConfig) -> Result<Arc<dyn SearchBackend>> {
    match config.backend.as_str() {
        "newsapi" => Ok(Arc::new(NewsApiSearch::new(config)?)),
        "fixture" => {
            let path = config.fixture_path.as_ref().ok_or_else(|| {
                Error::Config("The fixture search backend requires a fixture file".to_string())
            })?;
            Ok(Arc::new(FixtureSearch::from_file(path)?))
        }
        other => Err(Error::Config(format!(
            "Unknown search backend: {}. Available backends: newsapi, fixture",
            other
        ))),
    }
}
