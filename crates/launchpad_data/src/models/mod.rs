pub mod chain;
pub mod ledger;
pub mod market;
pub mod milestone;
pub mod wallet;

pub use chain::{Chain, ChainStatus};
pub use ledger::{Block, ChainTransaction, TransactionKind, TransactionStatus};
pub use market::{LiquidityPool, PoolToken, PricePoint, Token};
pub use milestone::Milestone;
pub use wallet::{Asset, LpPosition, User, Wallet, WalletSnapshot, WalletTransaction};
