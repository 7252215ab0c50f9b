use tracing::info;

use launchpad_core::{CNPY, LaunchpadConfig, LaunchpadError};
use launchpad_data::TransactionKind;
use launchpad_wallet::{TransactionSimulator, TxReceipt, WalletSession};

/// CNPY staking form.
#[derive(Debug, Clone, PartialEq)]
pub struct StakingForm {
    pub amount_input: String,
    pub apy_pct: f64,
    /// CNPY staked during this session.
    pub staked: f64,
}

impl StakingForm {
    pub fn new(apy_pct: f64) -> Self {
        Self {
            amount_input: String::new(),
            apy_pct,
            staked: 0.0,
        }
    }

    pub fn from_config(config: &LaunchpadConfig) -> Self {
        Self::new(config.staking_apy_pct)
    }

    /// Parse the input and check it against `available` CNPY.
    pub fn validate(&self, available: f64) -> Result<f64, LaunchpadError> {
        let amount: f64 = self
            .amount_input
            .trim()
            .parse()
            .map_err(|_| LaunchpadError::InvalidAmount(format!("{:?} is not a number", self.amount_input)))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LaunchpadError::InvalidAmount(format!(
                "stake must be positive, got {amount}"
            )));
        }
        if amount > available {
            return Err(LaunchpadError::InsufficientFunds {
                symbol: CNPY.into(),
                required: amount,
                available,
            });
        }
        Ok(amount)
    }

    /// Rewards after one year at the configured APY.
    pub fn projected_yearly_reward(&self, amount: f64) -> f64 {
        amount.max(0.0) * self.apy_pct / 100.0
    }

    /// Rewards for the currently entered amount, if it parses.
    pub fn projected_reward_for_input(&self) -> Option<f64> {
        self.amount_input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .map(|a| self.projected_yearly_reward(a))
    }

    /// Submit the stake and debit CNPY once it confirms.
    pub async fn stake(
        &mut self,
        session: &mut WalletSession,
        simulator: &TransactionSimulator,
    ) -> Result<TxReceipt, LaunchpadError> {
        let amount = self.validate(session.balance(CNPY))?;
        let receipt = simulator.submit(TransactionKind::Stake, CNPY, amount).await?;
        let remaining = session.adjust_balance(CNPY, -amount)?;
        self.staked += amount;
        self.amount_input.clear();
        info!(amount, remaining, tx = %receipt.hash, "CNPY staked");
        Ok(receipt)
    }
}
