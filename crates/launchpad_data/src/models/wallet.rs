use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ledger::TransactionKind;

/// A wallet linked to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,
    pub nickname: String,
    pub icon: String,
}

/// A launchpad user, identified by an external-chain address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub address: String,
    pub display_name: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    /// The account the app falls back to when nobody has signed in.
    #[serde(default)]
    pub demo: bool,
}

/// A token holding inside a wallet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,
    pub name: String,
    pub balance: f64,
    pub price: f64,
}

impl Asset {
    /// USD value of the holding.
    pub fn value(&self) -> f64 {
        self.balance * self.price
    }
}

/// A user's share of a liquidity pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpPosition {
    pub pool_id: String,
    pub token_a_amount: f64,
    pub token_b_amount: f64,
    pub value_usd: f64,
    pub share_pct: f64,
}

/// Wallet activity as shown in the wallet panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub hash: String,
    pub kind: TransactionKind,
    pub symbol: String,
    pub amount: f64,
    pub value_usd: f64,
    pub timestamp: DateTime<Utc>,
}

/// Point-in-time holdings for one user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WalletSnapshot {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub lp_positions: Vec<LpPosition>,
    #[serde(default)]
    pub transactions: Vec<WalletTransaction>,
    /// Stated total; when absent the sum of asset values is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,
}

impl WalletSnapshot {
    /// Looks up an asset by symbol, ignoring ASCII case.
    pub fn asset(&self, symbol: &str) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Balance of `symbol`, or zero if the wallet does not hold it.
    pub fn balance(&self, symbol: &str) -> f64 {
        self.asset(symbol).map_or(0.0, |a| a.balance)
    }

    pub fn total_value(&self) -> f64 {
        self.total_value
            .unwrap_or_else(|| self.assets.iter().map(Asset::value).sum())
    }

    pub fn lp_position(&self, pool_id: &str) -> Option<&LpPosition> {
        self.lp_positions.iter().find(|p| p.pool_id == pool_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(symbol: &str, balance: f64, price: f64) -> Asset {
        Asset {
            symbol: symbol.into(),
            name: symbol.into(),
            balance,
            price,
        }
    }

    #[test]
    fn asset_value_is_balance_times_price() {
        assert_eq!(asset("CNPY", 750.0, 2.0).value(), 1500.0);
    }

    #[test]
    fn total_prefers_stated_value() {
        let snapshot = WalletSnapshot {
            assets: vec![asset("CNPY", 1.0, 1.0)],
            total_value: Some(99.0),
            ..Default::default()
        };
        assert_eq!(snapshot.total_value(), 99.0);
    }

    #[test]
    fn total_falls_back_to_asset_sum() {
        let snapshot = WalletSnapshot {
            assets: vec![asset("CNPY", 10.0, 2.0), asset("USDC", 5.0, 1.0)],
            ..Default::default()
        };
        assert_eq!(snapshot.total_value(), 25.0);
    }

    #[test]
    fn lookup_ignores_case_and_defaults_to_zero() {
        let snapshot = WalletSnapshot {
            assets: vec![asset("CNPY", 10.0, 2.0)],
            ..Default::default()
        };
        assert_eq!(snapshot.balance("cnpy"), 10.0);
        assert_eq!(snapshot.balance("DOGE"), 0.0);
        assert!(snapshot.asset("doge").is_none());
    }

    #[test]
    fn empty_snapshot_serializes_without_total() {
        let json = serde_json::to_string(&WalletSnapshot::default()).unwrap();
        assert!(!json.contains("total_value"));
        let parsed: WalletSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, WalletSnapshot::default());
    }
}
