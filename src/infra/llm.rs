use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::prompt::Prompt;
use crate::services::{LanguageModelService, ServiceError};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f64,
    /// Additional attempts after the first one, for transient failures only.
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl GeminiSettings {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            temperature: DEFAULT_TEMPERATURE,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("request to Gemini failed: {0}")]
    Transport(reqwest::Error),
    #[error("Gemini responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to parse Gemini response: {0}")]
    Decode(reqwest::Error),
    #[error("Gemini returned no text ({0})")]
    EmptyResponse(String),
}

impl GeminiError {
    fn is_transient(&self) -> bool {
        match self {
            GeminiError::Transport(_) => true,
            GeminiError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            GeminiError::Decode(_) | GeminiError::EmptyResponse(_) => false,
        }
    }
}

/// Client for the Gemini `generateContent` endpoint. Requests carry no
/// timeout and no output-length cap.
pub struct GeminiClient {
    http: Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    fn endpoint(base_url: &str, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        )
    }

    async fn send_once(&self, body: &GenerateContentRequest<'_>) -> Result<String, GeminiError> {
        let response = self
            .http
            .post(Self::endpoint(&self.settings.base_url, &self.settings.model))
            .header(API_KEY_HEADER, &self.settings.api_key)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(GeminiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(GeminiError::Status { status, body });
        }

        let payload: GenerateContentResponse =
            response.json().await.map_err(GeminiError::Decode)?;
        payload.into_text()
    }
}

#[async_trait]
impl LanguageModelService for GeminiClient {
    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, ServiceError> {
        let body = GenerateContentRequest::new(prompt, self.settings.temperature);

        let mut attempt: u32 = 0;
        loop {
            debug!(model = %self.settings.model, attempt, "calling Gemini");
            match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.settings.max_retries => {
                    let delay = self.settings.initial_backoff * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.settings.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying Gemini request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a Prompt, temperature: f64) -> Self {
        Self {
            system_instruction: RequestContent {
                role: None,
                parts: vec![RequestPart {
                    text: &prompt.system,
                }],
            },
            contents: vec![RequestContent {
                role: Some("user"),
                parts: vec![RequestPart { text: &prompt.user }],
            }],
            generation_config: GenerationConfig { temperature },
        }
    }
}

#[derive(Serialize)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, GeminiError> {
        let block_reason = self.prompt_feedback.and_then(|feedback| feedback.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = block_reason
                .map(|reason| format!("prompt blocked: {reason}"))
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(GeminiError::EmptyResponse(reason));
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            let reason = candidate
                .finish_reason
                .map(|reason| format!("finish reason: {reason}"))
                .unwrap_or_else(|| "empty candidate".to_string());
            return Err(GeminiError::EmptyResponse(reason));
        }
        Ok(text)
    }
}
