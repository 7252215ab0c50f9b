use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use launchpad_core::LaunchpadError;
use launchpad_data::TransactionKind;
use launchpad_wallet::{TransactionSimulator, TxReceipt};

#[derive(Debug, Clone, PartialEq)]
pub enum DialogState {
    Closed,
    Editing,
    Pending { started_at: DateTime<Utc> },
    Confirmed(TxReceipt),
    Failed(String),
}

/// Modal that collects an amount and walks a transaction from entry to
/// confirmation.
#[derive(Debug, Clone)]
pub struct TransactionDialog {
    pub kind: TransactionKind,
    pub symbol: String,
    pub amount_input: String,
    state: DialogState,
    celebrate: bool,
}

impl TransactionDialog {
    pub fn new(kind: TransactionKind, symbol: impl Into<String>) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
            amount_input: String::new(),
            state: DialogState::Closed,
            celebrate: false,
        }
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn open(&mut self) {
        self.amount_input.clear();
        self.celebrate = false;
        self.state = DialogState::Editing;
    }

    /// Closing discards the input and any pending or finished transaction.
    pub fn close(&mut self) {
        if matches!(self.state, DialogState::Pending { .. }) {
            debug!(kind = self.kind.label(), "pending transaction discarded");
        }
        self.amount_input.clear();
        self.celebrate = false;
        self.state = DialogState::Closed;
    }

    pub fn parsed_amount(&self) -> Option<f64> {
        self.amount_input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
    }

    pub fn can_submit(&self) -> bool {
        self.state == DialogState::Editing && self.parsed_amount().is_some()
    }

    /// Submit and wait for confirmation. The receipt is kept in
    /// [`DialogState::Confirmed`] until the dialog closes.
    pub async fn submit(
        &mut self,
        simulator: &TransactionSimulator,
    ) -> Result<TxReceipt, LaunchpadError> {
        if self.state != DialogState::Editing {
            return Err(LaunchpadError::Validation("dialog is not accepting input".into()));
        }
        let amount = self.parsed_amount().ok_or_else(|| {
            LaunchpadError::InvalidAmount(format!("{:?} is not a positive number", self.amount_input))
        })?;

        self.state = DialogState::Pending {
            started_at: Utc::now(),
        };
        match simulator.submit(self.kind, &self.symbol, amount).await {
            Ok(receipt) => {
                self.state = DialogState::Confirmed(receipt.clone());
                self.celebrate = true;
                Ok(receipt)
            }
            Err(e) => {
                warn!(kind = self.kind.label(), error = %e, "transaction failed");
                self.state = DialogState::Failed(e.user_message());
                Err(e)
            }
        }
    }

    /// Whether the confirmation animation should play.
    pub fn should_celebrate(&self) -> bool {
        self.celebrate
    }

    /// Called once the confirmation animation has finished.
    pub fn acknowledge(&mut self) {
        self.celebrate = false;
    }
}
