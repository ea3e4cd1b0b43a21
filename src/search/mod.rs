// file: src/search/mod.rs
// description: web search port and provider implementations
// reference: internal module structure

mod serpapi;

pub use serpapi::SerpApiClient;

use crate::error::Result;
use crate::models::SearchResultSet;
use async_trait::async_trait;

/// One outbound query to a web search provider.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Returns at most the configured number of results in rank order.
    /// Every failure is reported as `AgentError::Search`.
    async fn search(&self, query: &str) -> Result<SearchResultSet>;
}
