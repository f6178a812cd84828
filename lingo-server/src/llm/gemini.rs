//! Gemini `generateContent` client

use super::{CompletionProvider, LlmError};
use async_trait::async_trait;
use lingo_common::config::LlmSettings;
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!("lingo-server/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated
    fn completion_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, LlmError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_completion(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Requesting Gemini completion"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(status.as_u16(), error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.without_url().to_string()))?;

        let completion = parsed.completion_text().ok_or(LlmError::EmptyCompletion)?;

        tracing::debug!(
            model = %self.model,
            completion_chars = completion.chars().count(),
            "Gemini completion received"
        );

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    fn settings(api_key: Option<&str>, base_url: &str) -> LlmSettings {
        LlmSettings {
            api_key: api_key.map(String::from),
            model: "gemini-pro".to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Local stand-in for the Gemini API: echoes the prompt back unless the
    /// key header is "bad-key"
    async fn spawn_fake_gemini() -> String {
        async fn generate(
            Path(model_action): Path<String>,
            headers: HeaderMap,
            Json(body): Json<Value>,
        ) -> (StatusCode, Json<Value>) {
            let key = headers
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if key.is_empty() {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": { "message": "API key missing" } })),
                );
            }
            if key == "bad-key" {
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": { "message": "API key not valid" } })),
                );
            }
            let prompt = body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            (
                StatusCode::OK,
                Json(json!({
                    "candidates": [{
                        "content": { "parts": [
                            { "text": format!("{model_action}|") },
                            { "text": prompt }
                        ] }
                    }]
                })),
            )
        }

        let app = Router::new().route("/v1beta/models/:model_action", post(generate));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1beta", addr)
    }

    #[test]
    fn test_completion_text_concatenates_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "SIMILAR1: a\n" }, { "text": "TIP: b" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.completion_text().as_deref(), Some("SIMILAR1: a\nTIP: b"));
    }

    #[test]
    fn test_completion_text_missing() {
        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert_eq!(blocked.completion_text(), None);

        let no_parts: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] }))
                .unwrap();
        assert_eq!(no_parts.completion_text(), None);
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(&settings(None, "https://example.test/v1beta/")).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = GeminiClient::new(&settings(None, "http://127.0.0.1:1")).unwrap();
        let err = client.generate_completion("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_round_trip_against_local_server() {
        let base_url = spawn_fake_gemini().await;
        let client = GeminiClient::new(&settings(Some("good-key"), &base_url)).unwrap();

        let completion = client.generate_completion("Fix: me go home").await.unwrap();
        assert_eq!(completion, "gemini-pro:generateContent|Fix: me go home");
    }

    #[tokio::test]
    async fn test_api_error_status_surfaces() {
        let base_url = spawn_fake_gemini().await;
        let client = GeminiClient::new(&settings(Some("bad-key"), &base_url)).unwrap();

        match client.generate_completion("x").await {
            Err(LlmError::Api(status, body)) => {
                assert_eq!(status, 403);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Bind then drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            GeminiClient::new(&settings(Some("k"), &format!("http://{}/v1beta", addr))).unwrap();
        let err = client.generate_completion("x").await.unwrap_err();
        assert!(matches!(err, LlmError::Network(_)));
    }

    #[tokio::test]
    async fn test_network_error_does_not_expose_api_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GeminiClient::new(&settings(
            Some("SECRET-KEY-123"),
            &format!("http://{}/v1beta", addr),
        ))
        .unwrap();
        let err = client.generate_completion("x").await.unwrap_err();

        let logged = format!("Error generating similar sentences: {}", err);
        assert!(matches!(err, LlmError::Network(_)));
        assert!(!logged.contains("SECRET-KEY-123"), "{logged}");
        assert!(!logged.contains("key="), "{logged}");
    }
}
