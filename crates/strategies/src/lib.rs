// In crates/strategies/src/lib.rs

use core_types::Decision;
pub mod sign_agreement;

pub use sign_agreement::SignAgreement;

/// The universal interface for turning the two pipeline signals into a decision.
///
/// A rule receives the mean sentiment score of the recent headlines and the most
/// recent day-over-day percent change of the closing price.
pub trait DecisionRule: Send + Sync {
    /// The name of the rule.
    fn name(&self) -> &'static str;

    fn decide(&self, avg_sentiment: f64, recent_change: f64) -> Decision;
}

/// Applies the default rule, [`SignAgreement`].
pub fn decide(avg_sentiment: f64, recent_change: f64) -> Decision {
    SignAgreement.decide(avg_sentiment, recent_change)
}
