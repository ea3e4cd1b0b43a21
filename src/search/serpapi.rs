// file: src/search/serpapi.rs
// description: SerpAPI integration returning the top organic Google results
// reference: https://serpapi.com/search-api

use crate::config::SearchConfig;
use crate::error::{AgentError, Result};
use crate::models::{SearchResultItem, SearchResultSet};
use crate::search::WebSearch;
use crate::utils::Validator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const NO_RESULTS_MARKER: &str = "hasn't returned any results";

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

// SerpAPI sends null as readily as it omits a field
#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

impl From<OrganicResult> for SearchResultItem {
    fn from(result: OrganicResult) -> Self {
        SearchResultItem::new(
            result.title.unwrap_or_default(),
            result.snippet.unwrap_or_default(),
            result.link.unwrap_or_default(),
        )
    }
}

pub struct SerpApiClient {
    client: Client,
    api_key: String,
    settings: SearchConfig,
}

impl SerpApiClient {
    pub fn new(api_key: String, settings: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/search.json", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WebSearch for SerpApiClient {
    async fn search(&self, query: &str) -> Result<SearchResultSet> {
        Validator::validate_query(query).map_err(|e| AgentError::Search(e.to_string()))?;

        let num = self.settings.max_results.to_string();
        let params = [
            ("q", query),
            ("engine", self.settings.engine.as_str()),
            ("hl", self.settings.language.as_str()),
            ("gl", self.settings.region.as_str()),
            ("num", num.as_str()),
            ("api_key", self.api_key.as_str()),
        ];

        debug!("Requesting {} results from SerpAPI", self.settings.max_results);

        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| AgentError::Search(format!("Failed to send SerpAPI request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Search(format!(
                "SerpAPI request failed with status {}: {}",
                status,
                provider_message(&body)
            )));
        }

        let payload: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Search(format!("Failed to parse SerpAPI response: {}", e)))?;

        if let Some(message) = &payload.error
            && payload.organic_results.is_empty()
        {
            if !is_no_results(message) {
                return Err(AgentError::Search(format!("SerpAPI error: {}", message)));
            }
            warn!("SerpAPI returned no organic results: {}", message);
        }

        let results = SearchResultSet::from_ranked(
            payload.organic_results.into_iter().map(SearchResultItem::from),
            self.settings.max_results,
        );

        debug!("Received {} organic results", results.len());
        Ok(results)
    }
}

// SerpAPI reports an empty result page through the error field
fn is_no_results(message: &str) -> bool {
    message.contains(NO_RESULTS_MARKER)
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
