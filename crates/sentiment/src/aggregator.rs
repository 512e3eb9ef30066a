// In crates/sentiment/src/aggregator.rs

use core_types::{SentimentLabel, SentimentScore};

/// Numeric view of a batch of labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregate {
    /// One score per label, in label order.
    pub scores: Vec<SentimentScore>,
    /// Arithmetic mean of `scores`; 0.0 when there are none.
    pub mean: f64,
}

pub fn scores(labels: &[SentimentLabel]) -> Vec<SentimentScore> {
    labels.iter().map(|&label| SentimentScore::from(label)).collect()
}

pub fn mean(scores: &[SentimentScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: i64 = scores.iter().map(|s| i64::from(s.value())).sum();
    sum as f64 / scores.len() as f64
}

pub fn aggregate(labels: &[SentimentLabel]) -> Aggregate {
    let scores = scores(labels);
    let mean = mean(&scores);
    Aggregate { scores, mean }
}
