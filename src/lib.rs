// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod session;
pub mod ui;
pub mod utils;

pub use config::{ApiKeys, Config, Credentials, LlmConfig, SearchConfig, UiConfig};
pub use error::{AgentError, Result};
pub use llm::{GeminiClient, PromptMessage, PromptTemplate, Summarizer};
pub use models::{ChatRole, ChatTurn, SearchResultItem, SearchResultSet};
pub use pipeline::{
    PipelineRunner, ProgressObserver, SEARCH_APOLOGY, SpinnerProgress, TurnOutcome, TurnStats,
    TurnStatus,
};
pub use search::{SerpApiClient, WebSearch};
pub use session::ChatSession;
pub use ui::ChatShell;
pub use utils::Validator;
