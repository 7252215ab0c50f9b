pub mod config;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::LaunchpadConfig;
pub use error::{ErrorCategory, LaunchpadError};
pub use storage::{
    KeyValueStore, MemoryStore, SqliteStore, StorageKey, clear_session_keys, read_json_or_default,
    write_json,
};

/// Symbol of the showcased chain's native token.
pub const CNPY: &str = "CNPY";
