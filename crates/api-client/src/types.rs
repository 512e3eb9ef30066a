// In crates/api-client/src/types.rs

use serde::{Deserialize, Serialize};

// --- NewsAPI `/v2/everything` ---

/// The top-level response of the everything endpoint.
///
/// On failure NewsAPI answers with `status = "error"` plus `code` and `message`
/// instead of `articles`.
#[derive(Debug, Deserialize, Clone)]
pub struct NewsResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<Article>,
    pub code: Option<String>,
    pub message: Option<String>,
}

/// A single article. Only the title is consumed downstream.
#[derive(Debug, Deserialize, Clone)]
pub struct Article {
    pub title: Option<String>,
}

// --- Yahoo Finance `/v8/finance/chart/{ticker}` ---

#[derive(Debug, Deserialize, Clone)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    /// Bar open times, in Unix seconds. Absent when the range holds no bars.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChartMeta {
    /// Exchange offset from UTC, in seconds.
    #[serde(default, rename = "gmtoffset")]
    pub gmt_offset: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Indicators {
    pub quote: Vec<Quote>,
}

/// OHLCV columns, aligned with `ChartResult::timestamp`. Missing bars are `null`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

// --- Chat models ---

/// One turn of a chat conversation, shared by every provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }
}

/// Request body of Ollama's `/api/chat`.
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
pub struct OllamaOptions {
    pub temperature: f64,
}

/// Response body of Ollama's `/api/chat` with `stream = false`.
#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    pub message: Option<ChatMessage>,
    pub error: Option<String>,
}

/// Request body of OpenAI's `/v1/chat/completions`.
#[derive(Debug, Serialize)]
pub struct OpenAiChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiChatResponse {
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
    pub error: Option<OpenAiError>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiChoice {
    pub message: OpenAiReply,
}

/// The assistant message. `content` may be null (e.g. refusals, tool calls).
#[derive(Debug, Deserialize)]
pub struct OpenAiReply {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}
