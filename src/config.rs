// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AgentError, Result};
use crate::models::DEFAULT_MAX_RESULTS;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const SERPAPI_KEY_ENV: &str = "SERPAPI_API_KEY";
pub const GOOGLE_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

const ENV_PREFIX: &str = "WEB_SEARCH_AGENT";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub llm: LlmConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub api_keys: ApiKeys,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub engine: String,
    pub language: String,
    pub region: String,
    pub max_results: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub title: String,
    pub placeholder: String,
    pub show_banner: bool,
}

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ApiKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serpapi_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("serpapi_api_key", &self.serpapi_api_key.as_deref().map(Validator::mask_secret))
            .field("google_api_key", &self.google_api_key.as_deref().map(Validator::mask_secret))
            .finish()
    }
}

/// Both provider keys, guaranteed present and non-blank.
#[derive(Clone)]
pub struct Credentials {
    pub serpapi_api_key: String,
    pub google_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("serpapi_api_key", &Validator::mask_secret(&self.serpapi_api_key))
            .field("google_api_key", &Validator::mask_secret(&self.google_api_key))
            .finish()
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| AgentError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        builder = builder.add_source(config::File::from(file).required(path.is_some()));

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        config.resolve_api_keys(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            search: SearchConfig {
                base_url: "https://serpapi.com".to_string(),
                engine: "google".to_string(),
                language: "en".to_string(),
                region: "us".to_string(),
                max_results: DEFAULT_MAX_RESULTS,
                timeout_secs: 30,
            },
            llm: LlmConfig {
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-1.5-flash".to_string(),
                temperature: None,
                timeout_secs: 60,
            },
            ui: UiConfig {
                title: "Web Search Agent".to_string(),
                placeholder: "What would you like to know?".to_string(),
                show_banner: true,
            },
            api_keys: ApiKeys::default(),
        }
    }

    /// Fills keys the config file and prefixed environment left empty from the
    /// plain provider variables.
    pub fn resolve_api_keys<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if is_blank(&self.api_keys.serpapi_api_key) {
            self.api_keys.serpapi_api_key = lookup(SERPAPI_KEY_ENV);
        }
        if is_blank(&self.api_keys.google_api_key) {
            self.api_keys.google_api_key = lookup(GOOGLE_KEY_ENV);
        }
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let serpapi_api_key = required_key(&self.api_keys.serpapi_api_key, SERPAPI_KEY_ENV)?;
        let google_api_key = required_key(&self.api_keys.google_api_key, GOOGLE_KEY_ENV)?;

        Ok(Credentials {
            serpapi_api_key,
            google_api_key,
        })
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.search.base_url)
            .and_then(|_| Validator::validate_url(&self.llm.base_url))
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Validator::validate_result_limit(self.search.max_results)
            .map_err(|e| AgentError::Config(e.to_string()))?;

        if self.search.timeout_secs == 0 || self.llm.timeout_secs == 0 {
            return Err(AgentError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.model.trim().is_empty() {
            return Err(AgentError::Config("llm.model cannot be empty".to_string()));
        }

        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn required_key(value: &Option<String>, name: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(AgentError::missing_key(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn with_keys(serpapi: Option<&str>, google: Option<&str>) -> Config {
        let mut config = Config::default_config();
        config.api_keys = ApiKeys {
            serpapi_api_key: serpapi.map(str::to_string),
            google_api_key: google.map(str::to_string),
        };
        config
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(DEFAULT_MAX_RESULTS, 5);
        assert_eq!(config.search.language, "en");
        assert_eq!(config.search.region, "us");
        assert_eq!(config.llm.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_credentials_require_both_keys() {
        assert!(with_keys(Some("serp"), Some("gem")).credentials().is_ok());

        let err = with_keys(None, Some("gem")).credentials().unwrap_err();
        assert!(err.to_string().contains(SERPAPI_KEY_ENV));

        let err = with_keys(Some("serp"), None).credentials().unwrap_err();
        assert!(err.to_string().contains(GOOGLE_KEY_ENV));

        let err = with_keys(Some("   "), Some("gem")).credentials().unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn test_resolve_api_keys_prefers_configured_values() {
        let mut config = with_keys(Some("from-file"), None);
        config.resolve_api_keys(|name| Some(format!("env-{}", name)));

        assert_eq!(config.api_keys.serpapi_api_key.as_deref(), Some("from-file"));
        assert_eq!(
            config.api_keys.google_api_key.as_deref(),
            Some("env-GOOGLE_API_KEY")
        );
    }

    #[test]
    fn test_resolve_api_keys_replaces_blank_values() {
        let mut config = with_keys(Some(""), Some("gem"));
        config.resolve_api_keys(|_| None);
        assert!(config.api_keys.serpapi_api_key.is_none());
        assert!(config.credentials().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default_config();
        config.search.max_results = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.llm.base_url = "generativelanguage.googleapis.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.search.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("agent.toml");
        fs::write(
            &path,
            r#"
[search]
max_results = 3
region = "gb"

[llm]
model = "gemini-2.0-flash"

[api_keys]
serpapi_api_key = "serp-file"
google_api_key = "gem-file"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.search.region, "gb");
        assert_eq!(config.search.engine, "google");
        assert_eq!(config.llm.model, "gemini-2.0-flash");

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.serpapi_api_key, "serp-file");
        assert_eq!(credentials.google_api_key, "gem-file");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(AgentError::Config(_))
        ));
    }

    #[test]
    fn test_debug_masks_secrets() {
        let config = with_keys(Some("serp-secret-value"), Some("gem-secret-value"));
        let rendered = format!("{:?}", config.api_keys);
        assert!(!rendered.contains("serp-secret-value"));

        let rendered = format!("{:?}", config.credentials().unwrap());
        assert!(!rendered.contains("gem-secret-value"));
    }
}
