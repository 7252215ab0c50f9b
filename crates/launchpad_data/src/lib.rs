//! Static fixture data: the launchpad's stand-in for a backend.

pub mod catalog;
pub mod models;

pub use catalog::Catalog;
pub use models::{
    Asset, Block, Chain, ChainStatus, ChainTransaction, LiquidityPool, LpPosition, Milestone,
    PoolToken, PricePoint, Token, TransactionKind, TransactionStatus, User, Wallet,
    WalletSnapshot, WalletTransaction,
};
