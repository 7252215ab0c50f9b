use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, info};

use launchpad_core::LaunchpadError;

use crate::models::{
    Block, Chain, ChainTransaction, LiquidityPool, Milestone, PricePoint, Token, User,
    WalletSnapshot,
};

// ---------------------------------------------------------------------------
// Embedded fixtures
// ---------------------------------------------------------------------------

#[derive(rust_embed::RustEmbed)]
#[folder = "fixtures/"]
struct Fixtures;

fn parse_fixture<T: DeserializeOwned>(name: &str) -> Result<T> {
    let file = Fixtures::get(name)
        .ok_or_else(|| LaunchpadError::Fixture(format!("missing fixture {name}")))?;
    let parsed = serde_json::from_slice(&file.data)
        .with_context(|| format!("Failed to parse fixture {name}"))?;
    debug!(fixture = name, "fixture parsed");
    Ok(parsed)
}

/// On-disk shape of `wallet_snapshots.json`.
#[derive(Debug, Deserialize)]
struct SnapshotFixture {
    default: WalletSnapshot,
    #[serde(default)]
    by_user: HashMap<String, WalletSnapshot>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read-only view over every static fixture.
#[derive(Debug, Clone)]
pub struct Catalog {
    chains: Vec<Chain>,
    transactions: Vec<ChainTransaction>,
    blocks: Vec<Block>,
    price_history: Vec<PricePoint>,
    milestones: Vec<Milestone>,
    tokens: Vec<Token>,
    pools: Vec<LiquidityPool>,
    users: Vec<User>,
    default_snapshot: WalletSnapshot,
    /// Keyed by lower-cased address.
    snapshots: HashMap<String, WalletSnapshot>,
}

impl Catalog {
    /// Parse the fixtures bundled into the binary.
    pub fn embedded() -> Result<Self> {
        let snapshots: SnapshotFixture = parse_fixture("wallet_snapshots.json")?;
        let catalog = Self {
            chains: parse_fixture("chains.json")?,
            transactions: parse_fixture("transactions.json")?,
            blocks: parse_fixture("blocks.json")?,
            price_history: parse_fixture("price_history.json")?,
            milestones: parse_fixture("milestones.json")?,
            tokens: parse_fixture("tokens.json")?,
            pools: parse_fixture("pools.json")?,
            users: parse_fixture("users.json")?,
            default_snapshot: snapshots.default,
            snapshots: snapshots
                .by_user
                .into_iter()
                .map(|(address, snapshot)| (address.to_lowercase(), snapshot))
                .collect(),
        };
        info!(
            chains = catalog.chains.len(),
            pools = catalog.pools.len(),
            users = catalog.users.len(),
            "fixture catalog loaded"
        );
        Ok(catalog)
    }

    // -- Chains ---------------------------------------------------------------

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Transactions of one chain, newest first.
    pub fn transactions_for(&self, chain_id: &str) -> Vec<&ChainTransaction> {
        let mut txs: Vec<_> = self
            .transactions
            .iter()
            .filter(|t| t.chain_id == chain_id)
            .collect();
        txs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        txs
    }

    pub fn transaction(&self, hash: &str) -> Option<&ChainTransaction> {
        self.transactions
            .iter()
            .find(|t| t.hash.eq_ignore_ascii_case(hash))
    }

    /// Blocks of one chain, highest first.
    pub fn blocks_for(&self, chain_id: &str) -> Vec<&Block> {
        let mut blocks: Vec<_> = self
            .blocks
            .iter()
            .filter(|b| b.chain_id == chain_id)
            .collect();
        blocks.sort_by(|a, b| b.height.cmp(&a.height));
        blocks
    }

    pub fn block(&self, chain_id: &str, height: u64) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.chain_id == chain_id && b.height == height)
    }

    /// Transactions included in a block.
    pub fn block_transactions(&self, chain_id: &str, height: u64) -> Vec<&ChainTransaction> {
        self.transactions
            .iter()
            .filter(|t| t.chain_id == chain_id && t.block_height == height)
            .collect()
    }

    /// Price samples of one chain, oldest first.
    pub fn price_history(&self, chain_id: &str) -> Vec<&PricePoint> {
        let mut points: Vec<_> = self
            .price_history
            .iter()
            .filter(|p| p.chain_id == chain_id)
            .collect();
        points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        points
    }

    pub fn milestones_for(&self, chain_id: &str) -> Vec<Milestone> {
        self.milestones
            .iter()
            .filter(|m| m.chain_id == chain_id)
            .cloned()
            .collect()
    }

    // -- Market ---------------------------------------------------------------

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, symbol: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn pools(&self) -> &[LiquidityPool] {
        &self.pools
    }

    // -- Users & wallets ------------------------------------------------------

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, address: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.address.eq_ignore_ascii_case(address))
    }

    /// The account used when nobody has signed in.
    pub fn demo_user(&self) -> Option<&User> {
        self.users.iter().find(|u| u.demo)
    }

    /// Per-user snapshot, if the fixtures carry one for `address`.
    pub fn snapshot_for(&self, address: &str) -> Option<&WalletSnapshot> {
        self.snapshots.get(&address.to_lowercase())
    }

    /// Snapshot shown when no per-user data exists.
    pub fn default_snapshot(&self) -> &WalletSnapshot {
        &self.default_snapshot
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
