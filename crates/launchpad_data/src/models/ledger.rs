use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Buy,
    Sell,
    Transfer,
    Stake,
    Launch,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Transfer => "Transfer",
            Self::Stake => "Stake",
            Self::Launch => "Launch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

/// A transaction recorded on a launched chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainTransaction {
    pub hash: String,
    pub chain_id: String,
    pub kind: TransactionKind,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub value_usd: f64,
    pub block_height: u64,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}

/// A block produced by a launched chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub chain_id: String,
    pub height: u64,
    pub hash: String,
    pub parent_hash: String,
    pub proposer: String,
    pub tx_count: u32,
    pub size_bytes: u64,
    pub timestamp: DateTime<Utc>,
}
