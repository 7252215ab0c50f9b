use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a launched chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainStatus {
    /// Still in the wizard, never launched.
    Draft,
    /// Trading on the bonding curve, not yet graduated.
    Virtual,
    /// Running as its own network.
    Graduated,
}

impl ChainStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Virtual => "Virtual",
            Self::Graduated => "Graduated",
        }
    }
}

/// A chain launched through the launchpad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub description: String,
    pub creator: String,
    pub status: ChainStatus,
    pub price: f64,
    pub market_cap: f64,
    pub holders: u64,
    pub volume_24h: f64,
    pub created_at: DateTime<Utc>,
}
