// In crates/core-types/src/types.rs

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Placeholder title that news services use for articles taken down after indexing.
pub const REMOVED_SENTINEL: &str = "[Removed]";

/// A news article title that is worth classifying.
///
/// The only way to build one is [`Headline::new`], which rejects blank titles and
/// the removed-article placeholder, so every `Headline` in the system is usable input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Headline(String);

impl Headline {
    /// Validates a raw title. Returns `None` for empty, whitespace-only or removed titles.
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        if title.trim().is_empty() || title.contains(REMOVED_SENTINEL) {
            return None;
        }
        Some(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Headline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The categorical sentiment of a single headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    pub fn score(self) -> SentimentScore {
        SentimentScore::from(self)
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    /// Strict parse: only the exact lower-case label is accepted.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(format!("unrecognized sentiment label: {other:?}")),
        }
    }
}

/// Numeric encoding of a [`SentimentLabel`]: always one of -1, 0 or +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SentimentScore(i8);

impl SentimentScore {
    pub fn value(self) -> i8 {
        self.0
    }
}

impl From<SentimentLabel> for SentimentScore {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => SentimentScore(1),
            SentimentLabel::Negative => SentimentScore(-1),
            SentimentLabel::Neutral => SentimentScore(0),
        }
    }
}

impl fmt::Display for SentimentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single daily bar, reduced to the closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Chronologically ordered daily closes for one ticker.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series, sorting points by date.
    ///
    /// Every close must be a finite, strictly positive number, otherwise the
    /// day-over-day change would be undefined.
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !(p.close.is_finite() && p.close > 0.0)) {
            return Err(Error::NonPositivePrice {
                date: bad.date,
                close: bad.close,
            });
        }
        points.sort_by_key(|p| p.date);
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Relative change `(close[t] - close[t-1]) / close[t-1]` for every `t >= 1`.
    pub fn percent_changes(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|w| (w[1].close - w[0].close) / w[0].close)
            .collect()
    }

    /// The change between the two most recent closes.
    pub fn recent_change(&self) -> Result<f64> {
        match self.points.as_slice() {
            [.., prev, last] => Ok((last.close - prev.close) / prev.close),
            _ => Err(Error::InsufficientHistory {
                required: 2,
                available: self.points.len(),
            }),
        }
    }
}

/// The final, actionable output of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Buy,
    Sell,
    Keep,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::Buy => "Buy",
            Decision::Sell => "Sell",
            Decision::Keep => "Keep",
        };
        f.write_str(s)
    }
}
