use async_openai::{
    Client as OpenAiClient,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;
use crate::error::{Result, ThreadsmithError};
use crate::models::Provider;

#[cfg(test)]
use mockall::automock;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_SYSTEM_PROMPT: &str = "Sen viral Twitter içerik üreticisisin. Türkçe içerik üret.";

/// A text-generation backend: prompt in, plain text out.
///
/// Implementations make exactly one call per prompt and never retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// ───────────────────────────────────────────────────────────────────────────────
// Gemini
// ───────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiReplyContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyPart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        non_empty(text)
    }
}

pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(cfg: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            base_url: cfg
                .base_url
                .clone()
                .unwrap_or_else(|| GEMINI_API_URL.to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::info!("Requesting generation from Gemini model {}", self.model);

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: self.max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ThreadsmithError::backend(Provider::Gemini, format!("request failed: {e}"))
            })?;

        let response = check_status(Provider::Gemini, response).await?;
        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            ThreadsmithError::backend(Provider::Gemini, format!("failed to parse response: {e}"))
        })?;

        parsed
            .into_text()
            .ok_or_else(|| ThreadsmithError::backend(Provider::Gemini, "response contained no text"))
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// OpenAI
// ───────────────────────────────────────────────────────────────────────────────

pub struct OpenAiGenerator {
    client: OpenAiClient<OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl OpenAiGenerator {
    pub fn new(cfg: &BackendConfig) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(cfg.api_key.clone());
        if let Some(base) = &cfg.base_url {
            config = config.with_api_base(base.clone());
        }
        Self {
            client: OpenAiClient::with_config(config),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::info!("Requesting generation from OpenAI model {}", self.model);

        let to_backend =
            |e: async_openai::error::OpenAIError| ThreadsmithError::backend(Provider::OpenAi, e.to_string());

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(OPENAI_SYSTEM_PROMPT)
            .build()
            .map_err(to_backend)?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(to_backend)?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .max_completion_tokens(self.max_tokens)
            .messages([system.into(), user.into()])
            .build()
            .map_err(to_backend)?;

        let response = self.client.chat().create(request).await.map_err(to_backend)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .and_then(non_empty)
            .ok_or_else(|| ThreadsmithError::backend(Provider::OpenAi, "response contained no text"))
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Anthropic
// ───────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl AnthropicResponse {
    /// Text of the first text block
    fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .and_then(non_empty)
    }
}

pub struct AnthropicGenerator {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl AnthropicGenerator {
    pub fn new(cfg: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            base_url: cfg
                .base_url
                .clone()
                .unwrap_or_else(|| ANTHROPIC_API_URL.to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::info!("Requesting generation from Anthropic model {}", self.model);

        let body = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ThreadsmithError::backend(Provider::Anthropic, format!("request failed: {e}"))
            })?;

        let response = check_status(Provider::Anthropic, response).await?;
        let parsed: AnthropicResponse = response.json().await.map_err(|e| {
            ThreadsmithError::backend(
                Provider::Anthropic,
                format!("failed to parse response: {e}"),
            )
        })?;

        parsed.into_text().ok_or_else(|| {
            ThreadsmithError::backend(Provider::Anthropic, "response contained no text")
        })
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Helpers
// ───────────────────────────────────────────────────────────────────────────────

async fn check_status(provider: Provider, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ThreadsmithError::backend(
        provider,
        format!("HTTP {status}: {body}"),
    ))
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}
