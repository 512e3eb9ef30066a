// In crates/engine/src/lib.rs

pub mod error;
pub mod state;

use api_client::{NewsApiClient, NewsSource, PriceSource, RetryPolicy, YahooPriceClient};
use app_config::Settings;
use core_types::{Decision, Headline, SentimentLabel, SentimentScore};
use sentiment::SentimentClassifier;
use strategies::{DecisionRule, SignAgreement};

pub use error::{Error, Result, Stage};
pub use state::PipelineState;
use state::StateTracker;

/// Everything a run produces.
///
/// `decision`, `sentiments` and `scores` are filled the same way on every path;
/// on the no-news path the sentiment fields are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub decision: Decision,
    /// Headlines that were classified, in the order the news service returned them.
    pub headlines: Vec<Headline>,
    pub sentiments: Option<Vec<SentimentLabel>>,
    pub scores: Option<Vec<SentimentScore>>,
    pub avg_sentiment: Option<f64>,
    pub recent_change: Option<f64>,
    /// States visited, from `Start` to `Done`.
    pub states: Vec<PipelineState>,
}

/// Sequences news retrieval, classification, aggregation, price lookup and the decision rule.
pub struct Pipeline {
    news: Box<dyn NewsSource>,
    prices: Box<dyn PriceSource>,
    classifier: SentimentClassifier,
    rule: Box<dyn DecisionRule>,
}

impl Pipeline {
    pub fn new(
        news: Box<dyn NewsSource>,
        prices: Box<dyn PriceSource>,
        classifier: SentimentClassifier,
        rule: Box<dyn DecisionRule>,
    ) -> Self {
        Self {
            news,
            prices,
            classifier,
            rule,
        }
    }

    /// Wires the production clients described by `settings`.
    pub fn from_settings(settings: &Settings) -> api_client::Result<Self> {
        let retry = RetryPolicy::from(&settings.http);

        let news = NewsApiClient::new(&settings.news, retry)?;
        let prices = YahooPriceClient::new(&settings.prices, retry)?;
        let generator = api_client::text_generator(&settings.llm, retry)?;
        let classifier = SentimentClassifier::new(generator)
            .with_concurrency(settings.llm.classification_concurrency);

        Ok(Self::new(
            Box::new(news),
            Box::new(prices),
            classifier,
            Box::new(SignAgreement),
        ))
    }

    /// Runs the whole pipeline once for a company and its ticker.
    ///
    /// No partial decision is ever returned: a failure in any stage aborts the run.
    pub async fn run(&self, company: &str, ticker: &str) -> Result<PipelineOutcome> {
        let mut state = StateTracker::new();
        tracing::info!(company, ticker, "Starting pipeline run.");

        // --- 1. News ---
        let headlines = self.news.headlines(company).await.map_err(Error::News)?;
        state.advance(PipelineState::NewsFetched);
        tracing::info!(source = self.news.name(), count = headlines.len(), "Headlines retrieved.");

        if headlines.is_empty() {
            state.advance(PipelineState::NoNews);
            tracing::info!(company, "No news was retrieved. Keeping position.");
            state.advance(PipelineState::Done);
            return Ok(PipelineOutcome {
                decision: Decision::Keep,
                headlines,
                sentiments: None,
                scores: None,
                avg_sentiment: None,
                recent_change: None,
                states: state.into_history(),
            });
        }

        // --- 2. Sentiment ---
        let labels = self.classifier.classify_all(company, &headlines).await?;
        let aggregate = sentiment::aggregate(&labels);
        state.advance(PipelineState::SentimentsComputed);
        tracing::info!(avg_sentiment = aggregate.mean, "Sentiment aggregated.");

        // --- 3. Price ---
        let series = self.prices.daily_closes(ticker).await.map_err(Error::Price)?;
        let recent_change = series
            .recent_change()
            .map_err(|e| Error::Price(api_client::Error::from(e)))?;
        state.advance(PipelineState::PriceFetched);
        tracing::info!(source = self.prices.name(), points = series.len(), recent_change, "Price trend computed.");

        // --- 4. Decision ---
        let decision = self.rule.decide(aggregate.mean, recent_change);
        state.advance(PipelineState::Decided);
        tracing::info!(rule = self.rule.name(), %decision, "Pipeline decided.");

        state.advance(PipelineState::Done);
        Ok(PipelineOutcome {
            decision,
            headlines,
            sentiments: Some(labels),
            scores: Some(aggregate.scores),
            avg_sentiment: Some(aggregate.mean),
            recent_change: Some(recent_change),
            states: state.into_history(),
        })
    }
}
