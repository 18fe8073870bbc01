use async_trait::async_trait;
use std::fmt;
use crate::types::RawArticle;
use crate::Result;

#[async_trait]
pub trait SearchBackend: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Returns candidate articles for a query, in the backend's ranking order
    async fn search(&self, query: &str) -> Result<Vec<RawArticle>>;
}
