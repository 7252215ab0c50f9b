use std::collections::BTreeMap;
use std::fmt;

use launchpad_core::LaunchpadError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Stablecoins tracked on external chains.
pub const STABLECOINS: [&str; 2] = ["USDC", "USDT"];

/// Chains a user can bridge stablecoins in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalChain {
    Ethereum,
    Solana,
}

impl ExternalChain {
    pub const ALL: [ExternalChain; 2] = [ExternalChain::Ethereum, ExternalChain::Solana];

    /// Human-readable label for the chain.
    pub fn label(&self) -> &'static str {
        match self {
            ExternalChain::Ethereum => "Ethereum",
            ExternalChain::Solana => "Solana",
        }
    }

    /// Balances a freshly connected wallet shows.
    fn seed_balances(&self) -> BTreeMap<String, f64> {
        let seed: [(&str, f64); 2] = match self {
            ExternalChain::Ethereum => [("USDC", 2_500.0), ("USDT", 1_000.0)],
            ExternalChain::Solana => [("USDC", 1_500.0), ("USDT", 250.0)],
        };
        seed.into_iter().map(|(s, b)| (s.to_string(), b)).collect()
    }
}

impl fmt::Display for ExternalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Connection state and stablecoin balances on one external chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalChainWallet {
    pub connected: bool,
    pub address: Option<String>,
    pub balances: BTreeMap<String, f64>,
}

impl ExternalChainWallet {
    pub fn balance(&self, symbol: &str) -> f64 {
        self.balances
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
            .map_or(0.0, |(_, b)| *b)
    }
}

/// External wallets for every supported chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalWallets {
    wallets: BTreeMap<ExternalChain, ExternalChainWallet>,
}

impl ExternalWallets {
    pub fn new() -> Self {
        Self {
            wallets: ExternalChain::ALL
                .into_iter()
                .map(|chain| (chain, ExternalChainWallet::default()))
                .collect(),
        }
    }

    pub fn wallet(&self, chain: ExternalChain) -> &ExternalChainWallet {
        // Every chain is inserted by `new`.
        &self.wallets[&chain]
    }

    fn wallet_mut(&mut self, chain: ExternalChain) -> &mut ExternalChainWallet {
        self.wallets.entry(chain).or_default()
    }

    pub fn is_connected(&self, chain: ExternalChain) -> bool {
        self.wallet(chain).connected
    }

    pub fn balance(&self, chain: ExternalChain, symbol: &str) -> f64 {
        self.wallet(chain).balance(symbol)
    }

    /// Simulated wallet connection. Seeds the demo stablecoin balances.
    pub fn connect(&mut self, chain: ExternalChain, address: &str) -> Result<(), LaunchpadError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(LaunchpadError::InvalidIdentity(format!(
                "empty {chain} address"
            )));
        }
        let wallet = self.wallet_mut(chain);
        wallet.connected = true;
        wallet.address = Some(address.to_string());
        wallet.balances = chain.seed_balances();
        info!(chain = %chain, address, "external wallet connected");
        Ok(())
    }

    pub fn disconnect(&mut self, chain: ExternalChain) {
        *self.wallet_mut(chain) = ExternalChainWallet::default();
        info!(chain = %chain, "external wallet disconnected");
    }

    /// Moves up to `amount` of a stablecoin off the external chain. The
    /// balance is clamped at zero; returns the amount actually moved.
    pub fn withdraw(
        &mut self,
        chain: ExternalChain,
        symbol: &str,
        amount: f64,
    ) -> Result<f64, LaunchpadError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LaunchpadError::InvalidAmount(format!(
                "deposit amount must be positive, got {amount}"
            )));
        }
        if !STABLECOINS.iter().any(|s| s.eq_ignore_ascii_case(symbol)) {
            return Err(LaunchpadError::Validation(format!(
                "{symbol} cannot be deposited from {chain}"
            )));
        }
        let wallet = self.wallet_mut(chain);
        if !wallet.connected {
            return Err(LaunchpadError::Validation(format!(
                "connect a {chain} wallet first"
            )));
        }
        let key = symbol.to_ascii_uppercase();
        let balance = wallet.balances.entry(key).or_insert(0.0);
        let moved = amount.min(*balance);
        *balance = (*balance - amount).max(0.0);
        Ok(moved)
    }

    /// Connected chain addresses, as persisted.
    pub fn addresses(&self) -> BTreeMap<ExternalChain, String> {
        self.wallets
            .iter()
            .filter(|(_, w)| w.connected)
            .filter_map(|(chain, w)| w.address.clone().map(|a| (*chain, a)))
            .collect()
    }

    /// Reconnect every chain with a stored address.
    pub fn restore(&mut self, addresses: &BTreeMap<ExternalChain, String>) {
        for (chain, address) in addresses {
            // Stored addresses were validated when first connected.
            let _ = self.connect(*chain, address);
        }
    }
}

impl Default for ExternalWallets {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected_with_no_balances() {
        let wallets = ExternalWallets::new();
        for chain in ExternalChain::ALL {
            assert!(!wallets.is_connected(chain));
            assert_eq!(wallets.balance(chain, "USDC"), 0.0);
        }
        assert!(wallets.addresses().is_empty());
    }

    #[test]
    fn connect_seeds_balances() {
        let mut wallets = ExternalWallets::new();
        wallets.connect(ExternalChain::Ethereum, "0xabc").unwrap();

        assert!(wallets.is_connected(ExternalChain::Ethereum));
        assert_eq!(wallets.balance(ExternalChain::Ethereum, "USDC"), 2_500.0);
        assert_eq!(wallets.balance(ExternalChain::Ethereum, "usdt"), 1_000.0);
        assert!(!wallets.is_connected(ExternalChain::Solana));
    }

    #[test]
    fn connect_rejects_blank_address() {
        let mut wallets = ExternalWallets::new();
        assert!(wallets.connect(ExternalChain::Solana, "   ").is_err());
        assert!(!wallets.is_connected(ExternalChain::Solana));
    }

    #[test]
    fn withdraw_clamps_at_zero() {
        let mut wallets = ExternalWallets::new();
        wallets.connect(ExternalChain::Solana, "SoLaddr").unwrap();

        let moved = wallets.withdraw(ExternalChain::Solana, "USDT", 1_000.0).unwrap();
        assert_eq!(moved, 250.0);
        assert_eq!(wallets.balance(ExternalChain::Solana, "USDT"), 0.0);

        let moved = wallets.withdraw(ExternalChain::Solana, "USDT", 10.0).unwrap();
        assert_eq!(moved, 0.0);
        assert_eq!(wallets.balance(ExternalChain::Solana, "USDT"), 0.0);
    }

    #[test]
    fn withdraw_partial() {
        let mut wallets = ExternalWallets::new();
        wallets.connect(ExternalChain::Ethereum, "0xabc").unwrap();
        let moved = wallets.withdraw(ExternalChain::Ethereum, "usdc", 400.0).unwrap();
        assert_eq!(moved, 400.0);
        assert_eq!(wallets.balance(ExternalChain::Ethereum, "USDC"), 2_100.0);
    }

    #[test]
    fn withdraw_requires_connection_and_valid_input() {
        let mut wallets = ExternalWallets::new();
        assert!(wallets.withdraw(ExternalChain::Ethereum, "USDC", 1.0).is_err());

        wallets.connect(ExternalChain::Ethereum, "0xabc").unwrap();
        assert!(wallets.withdraw(ExternalChain::Ethereum, "USDC", -1.0).is_err());
        assert!(wallets.withdraw(ExternalChain::Ethereum, "USDC", f64::NAN).is_err());
        assert!(wallets.withdraw(ExternalChain::Ethereum, "ETH", 1.0).is_err());
    }

    #[test]
    fn disconnect_drops_balances() {
        let mut wallets = ExternalWallets::new();
        wallets.connect(ExternalChain::Ethereum, "0xabc").unwrap();
        wallets.disconnect(ExternalChain::Ethereum);
        assert_eq!(wallets.wallet(ExternalChain::Ethereum), &ExternalChainWallet::default());
    }

    #[test]
    fn addresses_round_trip_through_restore() {
        let mut wallets = ExternalWallets::new();
        wallets.connect(ExternalChain::Ethereum, "0xabc").unwrap();
        wallets.connect(ExternalChain::Solana, "SoLaddr").unwrap();

        let json = serde_json::to_string(&wallets.addresses()).unwrap();
        let stored: BTreeMap<ExternalChain, String> = serde_json::from_str(&json).unwrap();

        let mut restored = ExternalWallets::new();
        restored.restore(&stored);
        assert_eq!(restored.addresses(), wallets.addresses());
        assert_eq!(restored.balance(ExternalChain::Solana, "USDC"), 1_500.0);
    }

    #[test]
    fn chain_serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&ExternalChain::Ethereum).unwrap(),
            "\"ethereum\""
        );
    }
}
