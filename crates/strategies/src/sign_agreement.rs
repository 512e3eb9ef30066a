// In crates/strategies/src/sign_agreement.rs

use crate::DecisionRule;
use core_types::Decision;

/// Acts only when sentiment and price momentum point the same way.
///
/// | avg_sentiment | recent_change | decision |
/// |---------------|---------------|----------|
/// | > 0           | > 0           | Buy      |
/// | < 0           | < 0           | Sell     |
/// | anything else |               | Keep     |
///
/// Magnitudes are ignored. A zero (or NaN) on either axis is Keep.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignAgreement;

impl DecisionRule for SignAgreement {
    fn name(&self) -> &'static str {
        "SignAgreement"
    }

    fn decide(&self, avg_sentiment: f64, recent_change: f64) -> Decision {
        let decision = if avg_sentiment > 0.0 && recent_change > 0.0 {
            Decision::Buy
        } else if avg_sentiment < 0.0 && recent_change < 0.0 {
            Decision::Sell
        } else {
            Decision::Keep
        };

        tracing::debug!(rule = self.name(), avg_sentiment, recent_change, %decision, "Decision made.");
        decision
    }
}
