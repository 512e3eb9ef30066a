// In crates/api-client/src/news.rs

use app_config::NewsSettings;
use async_trait::async_trait;
use core_types::Headline;

use crate::types::NewsResponse;
use crate::{Error, NewsSource, Result, RetryPolicy, build_http_client, send_for_text, with_retry};

/// Client for the NewsAPI "everything" search.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    /// The persistent HTTP client.
    http_client: reqwest::Client,
    api_key: String,
    /// The base URL, e.g. `https://newsapi.org`.
    base_url: String,
    language: String,
    sort_by: String,
    page_size: u32,
    retry: RetryPolicy,
}

impl NewsApiClient {
    /// Constructs a new client from the news settings.
    pub fn new(settings: &NewsSettings, retry: RetryPolicy) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(&retry)?,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            language: settings.language.clone(),
            sort_by: settings.sort_by.clone(),
            page_size: settings.page_size,
            retry,
        })
    }

    async fn fetch_once(&self, company: &str) -> Result<Vec<Headline>> {
        let url = format!("{}/v2/everything", self.base_url);
        let page_size = self.page_size.to_string();
        let request = self
            .http_client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", company),
                ("language", self.language.as_str()),
                ("sortBy", self.sort_by.as_str()),
                ("pageSize", page_size.as_str()),
            ]);

        let (status, body) = send_for_text(request).await?;
        if status == 429 || status >= 500 {
            return Err(Error::HttpStatus { status, body });
        }
        parse_headlines(&body)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &'static str {
        "NewsAPI"
    }

    async fn headlines(&self, company: &str) -> Result<Vec<Headline>> {
        if company.trim().is_empty() {
            return Err(Error::InvalidInput("company name must not be empty".into()));
        }

        let headlines = with_retry(&self.retry, "news.everything", || self.fetch_once(company)).await?;
        tracing::debug!(company, count = headlines.len(), "Fetched headlines.");
        Ok(headlines)
    }
}

/// Parses an everything-endpoint body into usable headlines, in service order.
///
/// Articles with a missing, blank or removed title are dropped.
pub fn parse_headlines(body: &str) -> Result<Vec<Headline>> {
    let response: NewsResponse = serde_json::from_str(body).map_err(Error::DeserializationFailed)?;

    // NewsAPI returns an error object on failure, so we check for that first.
    if response.status != "ok" {
        return Err(Error::ApiError {
            code: response.code.unwrap_or_else(|| response.status.clone()),
            msg: response.message.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    let total = response.articles.len();
    let headlines: Vec<Headline> = response
        .articles
        .into_iter()
        .filter_map(|article| article.title.and_then(Headline::new))
        .collect();

    if headlines.len() < total {
        tracing::debug!(dropped = total - headlines.len(), "Dropped blank or removed articles.");
    }
    Ok(headlines)
}
