use launchpad_data::{LpPosition, Wallet, WalletTransaction};
use launchpad_wallet::{ExternalChain, WalletSession};

use crate::format::{format_usd, truncate_address};

/// Wallet activity rows shown before "view all".
pub const RECENT_TX_LIMIT: usize = 5;

/// One holding row, override already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRow {
    pub symbol: String,
    pub name: String,
    pub balance: f64,
    pub price: f64,
    pub value: f64,
    /// Share of the aggregate portfolio value, in percent.
    pub share_pct: f64,
}

/// Connection state of one external chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalRow {
    pub chain: ExternalChain,
    pub address: Option<String>,
    pub usdc: f64,
    pub usdt: f64,
}

/// All data needed to render the wallet panel.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletPanelData {
    pub connected: bool,
    pub display_name: Option<String>,
    pub address: Option<String>,
    pub current_wallet: Option<Wallet>,
    pub linked_wallets: Vec<Wallet>,
    /// Highest value first.
    pub assets: Vec<AssetRow>,
    pub total_value: f64,
    pub lp_positions: Vec<LpPosition>,
    /// Newest first.
    pub recent_transactions: Vec<WalletTransaction>,
    pub external: Vec<ExternalRow>,
}

impl WalletPanelData {
    pub fn from_session(session: &WalletSession) -> Self {
        let total_value = session.aggregate_value();
        let mut assets: Vec<AssetRow> = session
            .effective_assets()
            .into_iter()
            .map(|a| {
                let value = a.value();
                AssetRow {
                    share_pct: if total_value > 0.0 {
                        value / total_value * 100.0
                    } else {
                        0.0
                    },
                    symbol: a.symbol,
                    name: a.name,
                    balance: a.balance,
                    price: a.price,
                    value,
                }
            })
            .collect();
        assets.sort_by(|a, b| b.value.total_cmp(&a.value));

        let snapshot = session.current_snapshot();
        let mut lp_positions = snapshot.lp_positions.clone();
        lp_positions.sort_by(|a, b| b.value_usd.total_cmp(&a.value_usd));

        let mut recent_transactions = snapshot.transactions.clone();
        recent_transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent_transactions.truncate(RECENT_TX_LIMIT);

        let external = ExternalChain::ALL
            .into_iter()
            .map(|chain| {
                let wallet = session.external().wallet(chain);
                ExternalRow {
                    chain,
                    address: wallet.address.clone(),
                    usdc: wallet.balance("USDC"),
                    usdt: wallet.balance("USDT"),
                }
            })
            .collect();

        Self {
            connected: session.is_connected(),
            display_name: session.user().map(|u| u.display_name.clone()),
            address: session.session().map(|s| s.address.clone()),
            current_wallet: session.current_wallet().cloned(),
            linked_wallets: session.linked_wallets().to_vec(),
            assets,
            total_value,
            lp_positions,
            recent_transactions,
            external,
        }
    }

    /// `0x7a3f...0f29`, or a prompt when disconnected.
    pub fn address_label(&self) -> String {
        self.address
            .as_deref()
            .map_or_else(|| "Not connected".to_string(), truncate_address)
    }

    pub fn total_label(&self) -> String {
        format_usd(self.total_value)
    }

    pub fn lp_total(&self) -> f64 {
        self.lp_positions.iter().map(|p| p.value_usd).sum()
    }
}
