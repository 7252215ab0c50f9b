use std::time::Duration;

use chrono::{DateTime, Utc};
use launchpad_core::{LaunchpadConfig, LaunchpadError};
use launchpad_data::TransactionKind;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of a simulated transaction submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub hash: String,
    pub kind: TransactionKind,
    pub symbol: String,
    pub amount: f64,
    pub submitted_at: DateTime<Utc>,
    pub confirmed_at: DateTime<Utc>,
}

/// Stands in for a chain client: every submission confirms after a fixed delay.
#[derive(Debug, Clone)]
pub struct TransactionSimulator {
    delay: Duration,
}

impl TransactionSimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &LaunchpadConfig) -> Self {
        Self::new(config.transaction_delay())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submit and wait for confirmation. Dropping the future before it
    /// resolves abandons the submission without side effects.
    pub async fn submit(
        &self,
        kind: TransactionKind,
        symbol: &str,
        amount: f64,
    ) -> Result<TxReceipt, LaunchpadError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LaunchpadError::InvalidAmount(format!(
                "transaction amount must be positive, got {amount}"
            )));
        }
        let submitted_at = Utc::now();
        tokio::time::sleep(self.delay).await;

        let receipt = TxReceipt {
            hash: format!("0x{}", uuid::Uuid::new_v4().simple()),
            kind,
            symbol: symbol.to_ascii_uppercase(),
            amount,
            submitted_at,
            confirmed_at: Utc::now(),
        };
        info!(hash = %receipt.hash, kind = receipt.kind.label(), amount, "transaction confirmed");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_confirms_after_delay() {
        let sim = TransactionSimulator::new(Duration::from_millis(20));
        let started = std::time::Instant::now();
        let receipt = sim.submit(TransactionKind::Buy, "cnpy", 5.0).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(receipt.symbol, "CNPY");
        assert!(receipt.hash.starts_with("0x"));
        assert!(receipt.confirmed_at >= receipt.submitted_at);
    }

    #[tokio::test]
    async fn receipts_have_unique_hashes() {
        let sim = TransactionSimulator::new(Duration::ZERO);
        let a = sim.submit(TransactionKind::Sell, "CNPY", 1.0).await.unwrap();
        let b = sim.submit(TransactionKind::Sell, "CNPY", 1.0).await.unwrap();
        assert_ne!(a.hash, b.hash);
    }

    #[tokio::test]
    async fn rejects_non_positive_amounts() {
        let sim = TransactionSimulator::new(Duration::ZERO);
        assert!(sim.submit(TransactionKind::Buy, "CNPY", 0.0).await.is_err());
        assert!(sim.submit(TransactionKind::Buy, "CNPY", -3.0).await.is_err());
    }

    #[tokio::test]
    async fn dropped_submission_never_completes() {
        let sim = TransactionSimulator::new(Duration::from_secs(60));
        let result = tokio::time::timeout(
            Duration::from_millis(10),
            sim.submit(TransactionKind::Stake, "CNPY", 1.0),
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn from_config_uses_transaction_delay() {
        let config = LaunchpadConfig {
            transaction_delay_ms: 750,
            ..Default::default()
        };
        assert_eq!(
            TransactionSimulator::from_config(&config).delay(),
            Duration::from_millis(750)
        );
    }
}
