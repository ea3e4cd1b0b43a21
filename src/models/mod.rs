// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod chat;
pub mod search_result;

pub use chat::{ChatRole, ChatTurn};
pub use search_result::{DEFAULT_MAX_RESULTS, SearchResultItem, SearchResultSet};
