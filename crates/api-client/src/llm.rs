// In crates/api-client/src/llm.rs

use app_config::{LlmProvider, LlmSettings};
use async_trait::async_trait;

use crate::types::{
    ChatMessage, OllamaChatRequest, OllamaChatResponse, OllamaOptions, OpenAiChatRequest,
    OpenAiChatResponse,
};
use crate::{Error, Result, RetryPolicy, TextGenerator, build_http_client, send_for_text, with_retry};

/// Creates the text generator selected in the settings.
pub fn text_generator(settings: &LlmSettings, retry: RetryPolicy) -> Result<Box<dyn TextGenerator>> {
    let generator: Box<dyn TextGenerator> = match settings.provider {
        LlmProvider::Ollama => Box::new(OllamaClient::new(settings, retry)?),
        LlmProvider::OpenAi => Box::new(OpenAiClient::new(settings, retry)?),
    };
    tracing::info!(
        provider = generator.name(),
        model = %settings.resolved_model(),
        "Text generator ready."
    );
    Ok(generator)
}

/// Client for a local Ollama server (`POST /api/chat`).
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: Option<f64>,
    retry: RetryPolicy,
}

impl OllamaClient {
    pub fn new(settings: &LlmSettings, retry: RetryPolicy) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(&retry)?,
            base_url: settings.resolved_base_url().trim_end_matches('/').to_string(),
            model: settings.resolved_model(),
            temperature: settings.temperature,
            retry,
        })
    }

    async fn chat_once(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let body = OllamaChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: self.temperature.map(|temperature| OllamaOptions { temperature }),
        };

        let (status, text) = send_for_text(self.http_client.post(&url).json(&body)).await?;
        if status == 429 || status >= 500 {
            return Err(Error::HttpStatus { status, body: text });
        }
        parse_ollama_reply(status, &text)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        with_retry(&self.retry, "llm.ollama.chat", || self.chat_once(messages)).await
    }
}

/// Extracts the assistant text from an Ollama chat reply.
pub fn parse_ollama_reply(status: u16, body: &str) -> Result<String> {
    let response: OllamaChatResponse = serde_json::from_str(body).map_err(|e| {
        // A non-JSON body on an error status is more useful verbatim.
        if status >= 400 {
            Error::HttpStatus { status, body: body.to_string() }
        } else {
            Error::DeserializationFailed(e)
        }
    })?;

    if let Some(msg) = response.error {
        return Err(Error::ApiError { code: status.to_string(), msg });
    }
    if status >= 400 {
        return Err(Error::HttpStatus { status, body: body.to_string() });
    }

    // A reply without a message is treated as empty text; the classifier
    // decides what empty text means.
    Ok(response.message.map(|m| m.content).unwrap_or_default())
}

/// Client for the OpenAI chat completions API, or any server that speaks it.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f64>,
    retry: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(settings: &LlmSettings, retry: RetryPolicy) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::ClientBuildError("OpenAI provider requires an API key".into()))?;

        Ok(Self {
            http_client: build_http_client(&retry)?,
            api_key,
            base_url: settings.resolved_base_url().trim_end_matches('/').to_string(),
            model: settings.resolved_model(),
            temperature: settings.temperature,
            retry,
        })
    }

    async fn complete_once(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = OpenAiChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let request = self.http_client.post(&url).bearer_auth(&self.api_key).json(&body);
        let (status, text) = send_for_text(request).await?;
        if status == 429 || status >= 500 {
            return Err(Error::HttpStatus { status, body: text });
        }
        parse_openai_reply(status, &text)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        with_retry(&self.retry, "llm.openai.chat", || self.complete_once(messages)).await
    }
}

/// Extracts the first choice's text from a chat completions reply.
pub fn parse_openai_reply(status: u16, body: &str) -> Result<String> {
    let response: OpenAiChatResponse = serde_json::from_str(body).map_err(|e| {
        if status >= 400 {
            Error::HttpStatus { status, body: body.to_string() }
        } else {
            Error::DeserializationFailed(e)
        }
    })?;

    if let Some(error) = response.error {
        let code = error
            .code
            .or(error.error_type)
            .unwrap_or_else(|| status.to_string());
        return Err(Error::ApiError { code, msg: error.message });
    }
    if status >= 400 {
        return Err(Error::HttpStatus { status, body: body.to_string() });
    }

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default())
}
