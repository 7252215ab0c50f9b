// Wallet session state + simulated wallet flows

pub mod auth;
pub mod external;
pub mod sell_orders;
pub mod session;
pub mod simulator;

// Re-export primary types for convenient access.
pub use auth::{GithubIdentity, derive_address, simulate_github_login, validate_github_username};
pub use external::{ExternalChain, ExternalChainWallet, ExternalWallets};
pub use sell_orders::{OrderStatus, SellOrder, SellOrderBook};
pub use session::{Session, SessionSource, WalletSession};
pub use simulator::{TransactionSimulator, TxReceipt};
