// In crates/api-client/src/lib.rs

use async_trait::async_trait;
use core_types::{Headline, PriceSeries};

pub mod error;
pub mod llm;
pub mod news;
pub mod prices;
pub mod retry;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use llm::{OllamaClient, OpenAiClient, text_generator};
pub use types::ChatMessage;
pub use news::NewsApiClient;
pub use prices::YahooPriceClient;
pub use retry::{RetryPolicy, with_retry};

/// A search service that returns headlines about a company.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// The name of the provider, for logs.
    fn name(&self) -> &'static str;

    /// Fetches headlines for `company`, most relevant first.
    ///
    /// Blank and removed titles are already filtered out. An empty vector is a
    /// valid answer, not an error.
    async fn headlines(&self, company: &str) -> Result<Vec<Headline>>;
}

/// A market data service that returns recent daily closes.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches the trailing daily close series for `ticker`.
    ///
    /// An unknown ticker or a series with no closes is an error; callers never
    /// receive an empty series.
    async fn daily_closes(&self, ticker: &str) -> Result<PriceSeries>;
}

/// A chat-style text generation model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Sends one conversation and returns the raw text of the reply.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Builds the shared HTTP client with the configured per-request timeout.
pub(crate) fn build_http_client(policy: &RetryPolicy) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(policy.timeout)
        .user_agent(concat!("sentiment-trader/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::ClientBuildError(e.to_string()))
}

/// Sends a request and returns the status code and body text.
pub(crate) async fn send_for_text(request: reqwest::RequestBuilder) -> Result<(u16, String)> {
    let response = request.send().await.map_err(Error::RequestFailed)?;
    let status = response.status().as_u16();
    let text = response.text().await.map_err(Error::RequestFailed)?;
    Ok((status, text))
}
