use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of a chain's price chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub chain_id: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
}

/// A tradable token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub price: f64,
}

/// One side of a liquidity pool pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolToken {
    pub symbol: String,
    pub name: String,
}

impl PoolToken {
    /// Case-insensitive substring match against symbol or display name.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.symbol.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

/// A liquidity pool on the mock DEX.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPool {
    pub id: String,
    pub token_a: PoolToken,
    pub token_b: PoolToken,
    /// Annual yield rate, in percent.
    pub apr: f64,
    pub tvl: f64,
    pub volume_24h: f64,
    pub created_at: DateTime<Utc>,
}

impl LiquidityPool {
    /// `"CNPY/USDC"` style pair label.
    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.token_a.symbol, self.token_b.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str, name: &str) -> PoolToken {
        PoolToken {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    #[test]
    fn pool_token_matches_symbol_or_name() {
        let usdc = token("USDC", "USD Coin");
        assert!(usdc.matches("usdc"));
        assert!(usdc.matches("coin"));
        assert!(usdc.matches("usd"));
        assert!(!usdc.matches("tether"));
    }

    #[test]
    fn pair_label_joins_symbols() {
        let pool = LiquidityPool {
            id: "cnpy-usdc".into(),
            token_a: token("CNPY", "Canopy"),
            token_b: token("USDC", "USD Coin"),
            apr: 18.5,
            tvl: 1.0,
            volume_24h: 1.0,
            created_at: Utc::now(),
        };
        assert_eq!(pool.pair_label(), "CNPY/USDC");
    }
}
