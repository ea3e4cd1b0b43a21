// file: src/llm/gemini.rs
// description: Google Gemini generateContent integration for result summarization
// reference: https://ai.google.dev/api/generate-content

use crate::config::LlmConfig;
use crate::error::{AgentError, Result};
use crate::llm::Summarizer;
use crate::llm::prompt::{PromptMessage, PromptRole, PromptTemplate};
use crate::models::SearchResultSet;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    settings: LlmConfig,
    template: PromptTemplate,
}

impl GeminiClient {
    pub fn new(api_key: String, settings: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            settings,
            template: PromptTemplate::new(),
        })
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Sends one completion request and returns the generated text.
    pub async fn complete(&self, messages: &[PromptMessage]) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        );

        let request = build_request(messages, self.settings.temperature);

        debug!(
            "Requesting completion from {} ({} messages)",
            self.settings.model,
            messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AgentError::Summarization(format!("Failed to send Gemini request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Summarization(format!(
                "Gemini request failed with status {}: {}",
                status,
                provider_message(&error_text)
            )));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            AgentError::Summarization(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = extract_text(payload);
        if text.trim().is_empty() {
            return Err(AgentError::Summarization(
                "Gemini returned no text".to_string(),
            ));
        }

        debug!("Received completion of {} chars", text.len());
        Ok(text)
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, query: &str, context: &SearchResultSet) -> Result<String> {
        let messages = self
            .template
            .render(query, context)
            .map_err(|e| AgentError::Summarization(e.to_string()))?;
        self.complete(&messages).await
    }
}

fn build_request(messages: &[PromptMessage], temperature: Option<f32>) -> GenerateContentRequest {
    let text_content = |role: Option<&str>, text: &str| Content {
        role: role.map(str::to_string),
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    };

    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == PromptRole::System)
        .map(|m| m.content.as_str())
        .collect();

    let contents = messages
        .iter()
        .filter(|m| m.role == PromptRole::User)
        .map(|m| text_content(Some("user"), &m.content))
        .collect();

    GenerateContentRequest {
        system_instruction: (!system.is_empty()).then(|| text_content(None, &system.join("\n\n"))),
        contents,
        generation_config: temperature.map(|temperature| GenerationConfig { temperature }),
    }
}

fn extract_text(payload: GenerateContentResponse) -> String {
    payload
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::SearchResultItem;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/models/gemini-1.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        let mut settings = Config::default_config().llm;
        settings.base_url = server.uri();
        settings.timeout_secs = 1;
        GeminiClient::new("gemini-key".to_string(), settings).unwrap()
    }

    fn text_response(parts: &[&str]) -> serde_json::Value {
        let parts: Vec<_> = parts.iter().map(|p| json!({ "text": p })).collect();
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }]
        })
    }

    fn paris_results() -> SearchResultSet {
        SearchResultSet::from_ranked(
            (1..=5).map(|n| {
                SearchResultItem::new(
                    format!("Paris {}", n),
                    "Paris is the capital of France",
                    format!("https://example.com/{}", n),
                )
            }),
            5,
        )
    }

    #[test]
    fn test_build_request_splits_system_instruction() {
        let messages = vec![
            PromptMessage::system("persona"),
            PromptMessage::user("question"),
        ];
        let request = serde_json::to_value(build_request(&messages, Some(0.5))).unwrap();

        assert_eq!(
            request,
            json!({
                "systemInstruction": { "parts": [{ "text": "persona" }] },
                "contents": [{ "role": "user", "parts": [{ "text": "question" }] }],
                "generationConfig": { "temperature": 0.5 }
            })
        );
    }

    #[tokio::test]
    async fn test_summarize_sends_prompt_and_returns_text() {
        let server = MockServer::start().await;
        let persona = PromptTemplate::new()
            .render("q", &SearchResultSet::empty())
            .unwrap()
            .remove(0)
            .content;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "gemini-key"))
            .and(body_partial_json(json!({
                "systemInstruction": { "parts": [{ "text": persona }] }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_response(&["- **Paris** is the capital", " of France."])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .summarize("capital of France", &paris_results())
            .await
            .unwrap();

        assert_eq!(text, "- **Paris** is the capital of France.");

        let received = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        let user_text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(user_text.contains("The user searched for capital of France"));
        assert!(user_text.contains("https://example.com/5"));
    }

    #[tokio::test]
    async fn test_custom_template_reaches_request_body() {
        let server = MockServer::start().await;
        let template = PromptTemplate::with_custom_template(
            "Answer briefly.".to_string(),
            "Question: {prompt}".to_string(),
        );

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({
                "systemInstruction": { "parts": [{ "text": "Answer briefly." }] },
                "contents": [{ "role": "user", "parts": [{ "text": "Question: capital of France" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["Paris."])))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .with_template(template)
            .summarize("capital of France", &paris_results())
            .await
            .unwrap();
        assert_eq!(text, "Paris.");
    }

    #[tokio::test]
    async fn test_summarize_with_empty_context() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&[
                "No sources were found, but here is what is known.",
            ])))
            .mount(&server)
            .await;

        let text = client_for(&server)
            .summarize("obscure topic", &SearchResultSet::empty())
            .await
            .unwrap();
        assert!(!text.is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_is_summarization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .summarize("capital of France", &paris_results())
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::Summarization(_)));
        assert!(err.to_string().contains("API key not valid."));
    }

    #[tokio::test]
    async fn test_blank_completion_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .summarize("capital of France", &paris_results())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Summarization(_)));
    }
}
