// In crates/sentiment/src/classifier.rs

use std::sync::LazyLock;

use api_client::{ChatMessage, TextGenerator};
use core_types::{Headline, SentimentLabel};
use futures::{StreamExt, TryStreamExt, stream};
use regex::Regex;

use crate::{Error, Result};

/// Reasoning models (e.g. deepseek-r1) prefix their answer with a `<think>` block.
static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("static regex is valid"));

/// Builds the two-message conversation used to classify one headline.
pub fn prompt(company: &str, headline: &Headline) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "Classify the sentiment of the following news item title about {company} as 'positive', 'negative', or 'neutral': "
        )),
        ChatMessage::user(format!("question: {headline}")),
    ]
}

/// Maps a raw model reply to a label.
///
/// The reply is stripped of reasoning blocks, trimmed and lower-cased, then must
/// equal one of the three labels exactly. Everything else is `Neutral`.
pub fn parse_label(raw: &str) -> SentimentLabel {
    normalize(raw).parse::<SentimentLabel>().unwrap_or_else(|_| {
        tracing::debug!(reply = %raw, "Unrecognized model reply, using neutral.");
        SentimentLabel::Neutral
    })
}

fn normalize(raw: &str) -> String {
    THINK_BLOCK.replace_all(raw, "").trim().to_lowercase()
}

/// Classifies headlines with a language model, one request per headline.
pub struct SentimentClassifier {
    generator: Box<dyn TextGenerator>,
    /// Maximum number of in-flight requests in `classify_all`.
    concurrency: usize,
}

impl SentimentClassifier {
    /// Creates a classifier that sends requests strictly one at a time.
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator, concurrency: 1 }
    }

    /// Allows up to `concurrency` requests in flight. Results keep headline order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Produces exactly one label for `headline`.
    ///
    /// Fails only when the model cannot be reached; a reply that is not a label
    /// falls back to `Neutral`.
    pub async fn classify(&self, company: &str, headline: &Headline) -> Result<SentimentLabel> {
        let raw = self
            .generator
            .generate(&prompt(company, headline))
            .await
            .map_err(|source| Error::Generation {
                headline: headline.to_string(),
                source,
            })?;

        let label = parse_label(&raw);
        tracing::debug!(%headline, %label, "Headline classified.");
        Ok(label)
    }

    /// Classifies every headline. The i-th label belongs to the i-th headline.
    pub async fn classify_all(&self, company: &str, headlines: &[Headline]) -> Result<Vec<SentimentLabel>> {
        tracing::info!(
            model = self.generator.name(),
            count = headlines.len(),
            concurrency = self.concurrency,
            "Classifying headlines."
        );

        stream::iter(headlines)
            .map(|headline| self.classify(company, headline))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}
