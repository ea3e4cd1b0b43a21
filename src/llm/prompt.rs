// file: src/llm/prompt.rs
// description: two-message research prompt with placeholder substitution
// reference: Internal prompt standards

use crate::error::Result;
use crate::models::SearchResultSet;
use serde::Serialize;
use std::collections::HashMap;

const RESEARCHER_SYSTEM: &str = "You are an expert researcher. Provide an in-depth, well-structured answer to the user's prompt only by using the context provided.";

const RESEARCHER_USER: &str = "The user searched for {prompt} and these are the search results: {context}. Provide a meaningful output using your knowledge and the context in a well-structured format. Use bullet points, tabular outputs, and other structures wherever needed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

pub struct PromptTemplate {
    system: String,
    user: String,
}

impl PromptTemplate {
    pub fn new() -> Self {
        Self {
            system: RESEARCHER_SYSTEM.to_string(),
            user: RESEARCHER_USER.to_string(),
        }
    }

    pub fn with_custom_template(system: String, user: String) -> Self {
        Self { system, user }
    }

    /// Builds the system and user messages for one query.
    pub fn render(&self, query: &str, context: &SearchResultSet) -> Result<Vec<PromptMessage>> {
        let context_json = context.to_context_json()?;

        let mut values = HashMap::new();
        values.insert("prompt", query);
        values.insert("context", context_json.as_str());

        Ok(vec![
            PromptMessage::system(fill(&self.system, &values)),
            PromptMessage::user(fill(&self.user, &values)),
        ])
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new()
    }
}

// Single pass, so placeholder text inside a value is never expanded again.
fn fill(template: &str, values: &HashMap<&str, &str>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('}') {
            Some(end) if values.contains_key(&after[..end]) => {
                output.push_str(values[&after[..end]]);
                rest = &after[end + 1..];
            }
            _ => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
