use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::config::LaunchpadConfig;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Every key the launchpad persists in local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Address of the connected user.
    WalletAddress,
    /// `"true"` while a session is connected.
    WalletConnected,
    /// JSON map of external chain -> connected address.
    ExternalChainAddresses,
    /// JSON-serialized wallet snapshot that takes precedence over fixtures.
    SnapshotOverride,
    /// JSON-serialized currently selected linked wallet.
    CurrentWallet,
    /// JSON list of recently selected pool ids, most recent first.
    RecentPools,
    /// JSON list of the user's sell orders.
    SellOrders,
}

impl StorageKey {
    pub const ALL: [StorageKey; 7] = [
        StorageKey::WalletAddress,
        StorageKey::WalletConnected,
        StorageKey::ExternalChainAddresses,
        StorageKey::SnapshotOverride,
        StorageKey::CurrentWallet,
        StorageKey::RecentPools,
        StorageKey::SellOrders,
    ];

    /// Keys that belong to a connected session and are dropped on disconnect.
    pub const SESSION: [StorageKey; 5] = [
        StorageKey::WalletAddress,
        StorageKey::WalletConnected,
        StorageKey::ExternalChainAddresses,
        StorageKey::SnapshotOverride,
        StorageKey::CurrentWallet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WalletAddress => "wallet_address",
            Self::WalletConnected => "wallet_connected",
            Self::ExternalChainAddresses => "external_chain_addresses",
            Self::SnapshotOverride => "wallet_snapshot_override",
            Self::CurrentWallet => "current_wallet",
            Self::RecentPools => "recent_pool_ids",
            Self::SellOrders => "user_sell_orders",
        }
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Local string key/value persistence, the browser-storage equivalent.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Result<Option<String>>;
    fn set(&self, key: StorageKey, value: &str) -> Result<()>;
    fn remove(&self, key: StorageKey) -> Result<()>;
}

/// Read and deserialize a JSON value. Missing keys, read failures and corrupt
/// JSON all yield `T::default()`.
pub fn read_json_or_default<T>(store: &dyn KeyValueStore, key: StorageKey) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(key = key.as_str(), "storage read failed: {e:#}");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key = key.as_str(), "discarding corrupt stored JSON: {e}");
            T::default()
        }
    }
}

/// Serialize a value as JSON and store it.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize {}", key.as_str()))?;
    store.set(key, &json)
}

/// Remove every session-scoped key.
pub fn clear_session_keys(store: &dyn KeyValueStore) -> Result<()> {
    for key in StorageKey::SESSION {
        store.remove(key)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// SQLite backend
// ---------------------------------------------------------------------------

/// SQLite-backed key/value store at `~/.launchpad/storage.db`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the store at the default location.
    pub fn open() -> Result<Self> {
        LaunchpadConfig::ensure_dirs()?;
        let path = LaunchpadConfig::storage_path()?;
        Self::open_at(&path)
    }

    /// Opens (or creates) the store at the given path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open storage: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!("Storage opened at {}", path.display());
        Ok(store)
    }

    /// Opens an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory storage")?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .lock()
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS kv_entries (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                );
                ",
            )
            .context("Failed to initialize storage schema")?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT value FROM kv_entries WHERE key = ?1",
            params![key.as_str()],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .with_context(|| format!("Failed to read {}", key.as_str()))
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.conn
            .lock()
            .execute(
                "INSERT INTO kv_entries (key, value, updated_at)
                 VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key.as_str(), value],
            )
            .with_context(|| format!("Failed to write {}", key.as_str()))?;
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.conn
            .lock()
            .execute(
                "DELETE FROM kv_entries WHERE key = ?1",
                params![key.as_str()],
            )
            .with_context(|| format!("Failed to remove {}", key.as_str()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Volatile store, used by tests and when the SQLite file cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries.read().get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.entries.write().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.entries.write().remove(&key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn backends() -> Vec<Box<dyn KeyValueStore>> {
        vec![
            Box::new(MemoryStore::new()),
            Box::new(SqliteStore::open_in_memory().expect("in-memory sqlite")),
        ]
    }

    #[test]
    fn test_key_names_are_unique() {
        let mut names: Vec<_> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), StorageKey::ALL.len());
    }

    #[test]
    fn test_session_keys_exclude_preferences() {
        assert!(!StorageKey::SESSION.contains(&StorageKey::RecentPools));
        assert!(!StorageKey::SESSION.contains(&StorageKey::SellOrders));
    }

    #[test]
    fn test_set_get_remove() {
        for store in backends() {
            assert_eq!(store.get(StorageKey::WalletAddress).unwrap(), None);

            store.set(StorageKey::WalletAddress, "0xabc").unwrap();
            assert_eq!(
                store.get(StorageKey::WalletAddress).unwrap().as_deref(),
                Some("0xabc")
            );

            store.remove(StorageKey::WalletAddress).unwrap();
            assert_eq!(store.get(StorageKey::WalletAddress).unwrap(), None);
        }
    }

    #[test]
    fn test_set_overwrites() {
        for store in backends() {
            store.set(StorageKey::WalletConnected, "true").unwrap();
            store.set(StorageKey::WalletConnected, "false").unwrap();
            assert_eq!(
                store.get(StorageKey::WalletConnected).unwrap().as_deref(),
                Some("false")
            );
        }
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        for store in backends() {
            assert!(store.remove(StorageKey::SellOrders).is_ok());
        }
    }

    #[test]
    fn test_json_round_trip() {
        for store in backends() {
            let ids = vec!["pool-1".to_string(), "pool-2".to_string()];
            write_json(store.as_ref(), StorageKey::RecentPools, &ids).unwrap();
            let loaded: Vec<String> = read_json_or_default(store.as_ref(), StorageKey::RecentPools);
            assert_eq!(loaded, ids);
        }
    }

    #[test]
    fn test_corrupt_json_yields_default() {
        for store in backends() {
            store.set(StorageKey::RecentPools, "[\"pool-1\", ").unwrap();
            let loaded: Vec<String> = read_json_or_default(store.as_ref(), StorageKey::RecentPools);
            assert!(loaded.is_empty());
        }
    }

    #[test]
    fn test_wrong_shape_yields_default() {
        let store = MemoryStore::new();
        store.set(StorageKey::SellOrders, r#"{"not":"a list"}"#).unwrap();
        let loaded: Vec<String> = read_json_or_default(&store, StorageKey::SellOrders);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_clear_session_keys_keeps_preferences() {
        for store in backends() {
            for key in StorageKey::ALL {
                store.set(key, "x").unwrap();
            }
            clear_session_keys(store.as_ref()).unwrap();

            for key in StorageKey::SESSION {
                assert_eq!(store.get(key).unwrap(), None, "{} not cleared", key.as_str());
            }
            assert!(store.get(StorageKey::RecentPools).unwrap().is_some());
            assert!(store.get(StorageKey::SellOrders).unwrap().is_some());
        }
    }

    #[test]
    fn test_sqlite_file_persists_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.db");
        {
            let store = SqliteStore::open_at(&path).unwrap();
            store.set(StorageKey::WalletAddress, "0xfeed").unwrap();
        }
        let reopened = SqliteStore::open_at(&path).unwrap();
        assert_eq!(
            reopened.get(StorageKey::WalletAddress).unwrap().as_deref(),
            Some("0xfeed")
        );
    }

    #[test]
    fn test_memory_store_len() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set(StorageKey::CurrentWallet, "{}").unwrap();
        assert_eq!(store.len(), 1);
    }
}
