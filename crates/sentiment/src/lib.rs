// In crates/sentiment/src/lib.rs

pub mod aggregator;
pub mod classifier;
pub mod error;

// Re-export public types
pub use aggregator::{Aggregate, aggregate, mean, scores};
pub use classifier::{SentimentClassifier, parse_label, prompt};
pub use error::{Error, Result};
