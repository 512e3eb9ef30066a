// In crates/app-config/src/lib.rs

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{
    AppSettings, HttpSettings, KeyStore, LlmProvider, LlmSettings, NewsSettings, PriceSettings,
    Settings,
};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file, if present.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
/// 4. Fills any credential still missing from the JSON key store.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let builder = Config::builder()
        .add_source(File::with_name("config/base").required(false))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        // e.g. `APP__NEWS__API_KEY=...`
        .add_source(Environment::with_prefix("APP").separator("__"));

    let mut settings = build_settings(builder)?;

    let key_store_path = settings.app.key_store_path.clone();
    if Path::new(&key_store_path).exists() {
        let keys = load_key_store(&key_store_path)?;
        settings.apply_key_store(keys);
    }

    settings.validate()?;
    Ok(settings)
}

/// Builds and deserializes an already-layered configuration.
pub fn build_settings(builder: ConfigBuilder<DefaultState>) -> Result<Settings> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    Ok(settings)
}

/// Reads the JSON key store from disk.
pub fn load_key_store(path: impl AsRef<Path>) -> Result<KeyStore> {
    let content = std::fs::read_to_string(path)?;

    let keys: KeyStore = serde_json::from_str(&content)?;
    Ok(keys)
}

impl Settings {
    /// Copies credentials from the key store into any slot that is still empty.
    /// Values that came from configuration files or the environment win.
    pub fn apply_key_store(&mut self, keys: KeyStore) {
        if self.news.api_key.trim().is_empty() {
            if let Some(key) = keys.news_api {
                self.news.api_key = key;
            }
        }
        if self.llm.api_key.is_none() {
            self.llm.api_key = keys.gpt;
        }
    }

    /// Checks that every credential the configured services need is present.
    pub fn validate(&self) -> Result<()> {
        if self.news.api_key.trim().is_empty() {
            return Err(Error::MissingCredential("news.api_key"));
        }
        let has_llm_key = self
            .llm
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        if self.llm.provider == LlmProvider::OpenAi && !has_llm_key {
            return Err(Error::MissingCredential("llm.api_key"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        build_settings(Config::builder().add_source(File::from_str(toml, FileFormat::Toml))).unwrap()
    }

    #[test]
    fn test_defaults_match_original_constants() {
        let settings = from_toml("");
        assert_eq!(settings.news.page_size, 20);
        assert_eq!(settings.news.language, "en");
        assert_eq!(settings.news.sort_by, "relevancy");
        assert_eq!(settings.prices.range, "1mo");
        assert_eq!(settings.prices.interval, "1d");
        assert_eq!(settings.llm.provider, LlmProvider::Ollama);
        assert_eq!(settings.llm.resolved_model(), "deepseek-r1:7b");
        assert_eq!(settings.llm.classification_concurrency, 1);
        assert_eq!(settings.http.max_retries, 1);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let settings = from_toml(
            r#"
            [llm]
            provider = "openai"
            model = "gpt-4o"
            classification_concurrency = 4

            [http]
            timeout_secs = 5
            "#,
        );
        assert_eq!(settings.llm.provider, LlmProvider::OpenAi);
        assert_eq!(settings.llm.resolved_model(), "gpt-4o");
        assert_eq!(settings.llm.resolved_base_url(), "https://api.openai.com");
        assert_eq!(settings.llm.classification_concurrency, 4);
        assert_eq!(settings.http.timeout_secs, 5);
        assert_eq!(settings.http.max_retries, 1);
    }

    #[test]
    fn test_key_store_fills_missing_credentials_only() {
        let keys: KeyStore =
            serde_json::from_str(r#"{"news_api": "news-key", "gpt": "gpt-key"}"#).unwrap();

        let mut settings = Settings::default();
        settings.apply_key_store(keys.clone());
        assert_eq!(settings.news.api_key, "news-key");
        assert_eq!(settings.llm.api_key.as_deref(), Some("gpt-key"));

        let mut settings = Settings::default();
        settings.news.api_key = "from-env".into();
        settings.apply_key_store(keys);
        assert_eq!(settings.news.api_key, "from-env");
    }

    #[test]
    fn test_validate_requires_news_key() {
        let settings = Settings::default();
        assert!(matches!(
            settings.validate(),
            Err(Error::MissingCredential("news.api_key"))
        ));
    }

    #[test]
    fn test_validate_requires_llm_key_for_openai_only() {
        let mut settings = Settings::default();
        settings.news.api_key = "k".into();
        assert!(settings.validate().is_ok());

        settings.llm.provider = LlmProvider::OpenAi;
        assert!(matches!(
            settings.validate(),
            Err(Error::MissingCredential("llm.api_key"))
        ));

        settings.llm.api_key = Some("sk-test".into());
        assert!(settings.validate().is_ok());
    }
}
