//! GeminiGateway - Gemini REST implementation of `GenerationGateway`.
//!
//! Ideas use JSON mode with a response schema on the fast model; documents
//! are free Markdown from the document model.

use crate::prompts::{PromptLibrary, RenderedPrompt};
use async_trait::async_trait;
use ideaspark_core::config::{DEFAULT_DOCUMENT_MODEL, DEFAULT_IDEA_MODEL};
use ideaspark_core::error::{IdeaSparkError, Result};
use ideaspark_core::generation::{GenerationGateway, IdeaDraft, IdeaRequest};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub struct GeminiGateway {
    client: Client,
    api_key: String,
    idea_model: String,
    document_model: String,
    base_url: String,
    prompts: PromptLibrary,
}

impl GeminiGateway {
    /// Creates a gateway with the default models and request timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or a prompt template does not compile.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdeaSparkError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            idea_model: DEFAULT_IDEA_MODEL.to_string(),
            document_model: DEFAULT_DOCUMENT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
            prompts: PromptLibrary::new()?,
        })
    }

    pub fn with_idea_model(mut self, model: impl Into<String>) -> Self {
        self.idea_model = model.into();
        self
    }

    pub fn with_document_model(mut self, model: impl Into<String>) -> Self {
        self.document_model = model.into();
        self
    }

    /// Points the gateway at another API root, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send_request(&self, model: &str, body: &GenerateContentRequest) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, model);
        tracing::debug!("[GeminiGateway] POST {}", url);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| IdeaSparkError::Gateway {
                status: None,
                message: format!("Gemini API request failed: {err}"),
                retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            IdeaSparkError::gateway(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerationGateway for GeminiGateway {
    async fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<IdeaDraft>> {
        let prompt = self.prompts.ideas(request)?;
        let body = GenerateContentRequest::new(prompt).with_json_schema(idea_schema());
        let text = self.send_request(&self.idea_model, &body).await?;
        Ok(parse_idea_drafts(&text))
    }

    async fn generate_requirement_doc(&self, title: &str, content: &str) -> Result<String> {
        let prompt = self.prompts.requirement_doc(title, content)?;
        let body = GenerateContentRequest::new(prompt);
        self.send_request(&self.document_model, &body).await
    }

    async fn generate_web_doc(&self, source_content: &str) -> Result<String> {
        let prompt = self.prompts.web_doc(source_content)?;
        let body = GenerateContentRequest::new(prompt);
        self.send_request(&self.document_model, &body).await
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn new(prompt: RenderedPrompt) -> Self {
        Self {
            contents: vec![Content::text("user", prompt.user)],
            system_instruction: Content::text("system", prompt.system),
            generation_config: None,
        }
    }

    fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        });
        self
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: String) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

// ============================================================================
// Helpers
// ============================================================================

/// Array of `{title, content, category, tags?}`.
fn idea_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "content": { "type": "STRING" },
                "category": { "type": "STRING" },
                "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["title", "content", "category"]
        }
    })
}

/// Parses the JSON-mode answer. Anything unparsable yields no drafts.
fn parse_idea_drafts(text: &str) -> Vec<IdeaDraft> {
    let trimmed = text.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    match serde_json::from_str::<Vec<IdeaDraft>>(json) {
        Ok(drafts) => drafts,
        Err(e) => {
            tracing::warn!("[GeminiGateway] Unparsable idea response: {}", e);
            Vec::new()
        }
    }
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.is_empty())
        .ok_or_else(|| IdeaSparkError::gateway("Gemini API returned no text in the response candidates"))
}

fn map_http_error(status: StatusCode, body: String) -> IdeaSparkError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    IdeaSparkError::Gateway {
        status: Some(status.as_u16()),
        message,
        retryable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_idea_drafts() {
        let drafts = parse_idea_drafts(
            r#"[{"title":"Bean box","content":"Monthly beans","category":"green","tags":["coffee"]},
                {"title":"Cup map","content":"Find cafes","category":"white"}]"#,
        );
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].tags, vec!["coffee".to_string()]);
        assert!(drafts[1].tags.is_empty());
        assert_eq!(drafts[1].category.as_deref(), Some("white"));
    }

    #[test]
    fn test_parse_idea_drafts_strips_code_fence() {
        let drafts = parse_idea_drafts("```json\n[{\"title\":\"a\",\"content\":\"b\",\"category\":\"c\"}]\n```");
        assert_eq!(drafts.len(), 1);
    }

    #[test]
    fn test_malformed_ideas_yield_empty() {
        assert!(parse_idea_drafts("Sorry, I cannot help").is_empty());
        assert!(parse_idea_drafts(r#"{"title":"not an array"}"#).is_empty());
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "# Title\n" }, { "text": "Body" }] } }]
        }))
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "# Title\nBody");
    }

    #[test]
    fn test_extract_text_without_candidates_fails() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(extract_text_response(response).unwrap_err().is_gateway());
    }

    #[test]
    fn test_map_http_error() {
        let err = map_http_error(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":{"code":503,"message":"overloaded","status":"UNAVAILABLE"}}"#.to_string(),
        );
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Generation gateway error: UNAVAILABLE: overloaded");

        let err = map_http_error(StatusCode::BAD_REQUEST, "plain body".to_string());
        assert!(!err.is_retryable());
        assert!(matches!(err, IdeaSparkError::Gateway { status: Some(400), .. }));
    }

    #[test]
    fn test_idea_request_body_uses_json_mode() {
        let prompt = RenderedPrompt {
            system: "sys".to_string(),
            user: "usr".to_string(),
        };
        let body = GenerateContentRequest::new(prompt).with_json_schema(idea_schema());
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn test_document_request_body_has_no_generation_config() {
        let prompt = RenderedPrompt {
            system: "sys".to_string(),
            user: "usr".to_string(),
        };
        let value = serde_json::to_value(GenerateContentRequest::new(prompt)).unwrap();
        assert!(value.get("generationConfig").is_none());
    }
}
