// file: src/llm/mod.rs
// description: summarization port, prompt construction and model clients
// reference: internal module structure

mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;
pub use prompt::{PromptMessage, PromptRole, PromptTemplate};

use crate::error::Result;
use crate::models::SearchResultSet;
use async_trait::async_trait;

/// One templated completion request over the search context.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// `context` may be empty. Every failure is reported as
    /// `AgentError::Summarization`.
    async fn summarize(&self, query: &str, context: &SearchResultSet) -> Result<String>;
}
