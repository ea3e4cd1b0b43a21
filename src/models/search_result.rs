// file: src/models/search_result.rs
// description: Web search result items and the bounded, rank-ordered result set
// reference: Mapped from the organic results of the search provider

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Page title, empty when the provider omitted it
    #[serde(default)]
    pub title: String,

    /// Short excerpt shown by the provider
    #[serde(default)]
    pub snippet: String,

    /// Target URL of the result
    #[serde(default)]
    pub link: String,
}

impl SearchResultItem {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }

    /// Format as a single line for display
    pub fn format_summary(&self, max_snippet_len: usize) -> String {
        let snippet = crate::utils::Validator::truncate_text(&self.snippet, max_snippet_len);
        format!("{} ({})\n{}", self.title, self.link, snippet)
    }
}

/// Results in provider rank order, never longer than its limit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SearchResultSet {
    items: Vec<SearchResultItem>,
}

impl SearchResultSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keeps the first `limit` items and drops the rest.
    pub fn from_ranked<I>(items: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = SearchResultItem>,
    {
        Self {
            items: items.into_iter().take(limit).collect(),
        }
    }

    pub fn items(&self) -> &[SearchResultItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResultItem> {
        self.items.iter()
    }

    /// JSON array of `{title, snippet, link}` objects used as prompt context.
    pub fn to_context_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.items)
    }
}

impl<'a> IntoIterator for &'a SearchResultSet {
    type Item = &'a SearchResultItem;
    type IntoIter = std::slice::Iter<'a, SearchResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
