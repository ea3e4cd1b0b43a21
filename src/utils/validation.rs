// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{AgentError, Result};

pub const MAX_RESULT_LIMIT: usize = 100;

pub struct Validator;

impl Validator {
    pub fn validate_query(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(AgentError::Validation("Query is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AgentError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_result_limit(limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(AgentError::Validation(
                "max_results must be greater than 0".to_string(),
            ));
        }

        if limit > MAX_RESULT_LIMIT {
            return Err(AgentError::Validation(format!(
                "max_results too large (max {})",
                MAX_RESULT_LIMIT
            )));
        }

        Ok(())
    }

    /// Keeps the first four characters of a secret for display.
    pub fn mask_secret(secret: &str) -> String {
        let visible: String = secret.chars().take(4).collect();
        if secret.chars().count() <= 8 {
            "****".to_string()
        } else {
            format!("{}****", visible)
        }
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((idx, _)) => format!("{}...", &text[..idx]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert!(Validator::validate_query("capital of France").is_ok());
        assert!(Validator::validate_query("").is_err());
        assert!(Validator::validate_query(" \n\t ").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://serpapi.com").is_ok());
        assert!(Validator::validate_url("http://127.0.0.1:8080").is_ok());
        assert!(Validator::validate_url("serpapi.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_result_limit() {
        assert!(Validator::validate_result_limit(5).is_ok());
        assert!(Validator::validate_result_limit(0).is_err());
        assert!(Validator::validate_result_limit(101).is_err());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(Validator::mask_secret("short"), "****");
        assert_eq!(Validator::mask_secret("abcdefghijkl"), "abcd****");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("héllo wörld", 4), "héll...");
    }
}
