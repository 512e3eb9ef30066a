// In crates/app-config/src/types.rs

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Settings for the news-search service.
    #[serde(default)]
    pub news: NewsSettings,
    /// Settings for the daily price service.
    #[serde(default)]
    pub prices: PriceSettings,
    /// Settings for the language model used to classify headlines.
    #[serde(default)]
    pub llm: LlmSettings,
    /// Timeout and retry policy shared by every outbound call.
    #[serde(default)]
    pub http: HttpSettings,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
    /// Path of the JSON key store holding the service credentials.
    pub key_store_path: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            log_level: "info".into(),
            key_store_path: "ignore/keys.json".into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct NewsSettings {
    /// The NewsAPI key. Usually filled from the key store.
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub sort_by: String,
    /// Number of articles requested per query.
    pub page_size: u32,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://newsapi.org".into(),
            language: "en".into(),
            sort_by: "relevancy".into(),
            page_size: 20,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PriceSettings {
    pub base_url: String,
    /// Trailing window, in the chart service's notation (e.g. "1mo").
    pub range: String,
    /// Bar size (e.g. "1d").
    pub interval: String,
}

impl Default for PriceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".into(),
            range: "1mo".into(),
            interval: "1d".into(),
        }
    }
}

/// Which inference backend answers the classification prompts.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// A local Ollama server.
    #[default]
    Ollama,
    /// The OpenAI chat completions API (or any compatible server).
    #[serde(alias = "gpt")]
    OpenAi,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    /// Overrides the provider's default endpoint.
    pub base_url: Option<String>,
    /// Overrides the provider's default model.
    pub model: Option<String>,
    /// Required for `openai`, ignored by `ollama`.
    pub api_key: Option<String>,
    pub temperature: Option<f64>,
    /// How many headlines may be classified at once. 1 means strictly sequential.
    pub classification_concurrency: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            base_url: None,
            model: None,
            api_key: None,
            temperature: None,
            classification_concurrency: 1,
        }
    }
}

impl LlmSettings {
    pub fn resolved_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            match self.provider {
                LlmProvider::Ollama => "http://localhost:11434",
                LlmProvider::OpenAi => "https://api.openai.com",
            }
            .to_string()
        })
    }

    pub fn resolved_model(&self) -> String {
        self.model.clone().unwrap_or_else(|| {
            match self.provider {
                LlmProvider::Ollama => "deepseek-r1:7b",
                LlmProvider::OpenAi => "gpt-4o-mini",
            }
            .to_string()
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct HttpSettings {
    /// Upper bound for a single request, in seconds.
    pub timeout_secs: u64,
    /// Extra attempts after a transient transport failure.
    pub max_retries: u32,
    /// Pause before each retry, in milliseconds.
    pub retry_backoff_ms: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 1,
            retry_backoff_ms: 500,
        }
    }
}

// --- Credentials file ---

/// The JSON key store (`{"news_api": "...", "gpt": "..."}`).
#[derive(Deserialize, Debug, Clone, Default)]
pub struct KeyStore {
    pub news_api: Option<String>,
    pub gpt: Option<String>,
}
