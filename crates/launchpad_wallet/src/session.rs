use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use launchpad_core::{
    CNPY, KeyValueStore, LaunchpadError, StorageKey, clear_session_keys, read_json_or_default,
    write_json,
};
use launchpad_data::{Asset, Catalog, User, Wallet, WalletSnapshot};

use crate::external::{ExternalChain, ExternalWallets};

/// How the active session came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionSource {
    /// The caller supplied an address.
    Explicit,
    /// Read back from local storage.
    Restored,
    /// No identity and nothing stored: the demo account.
    Handshake,
}

/// The single active user session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub address: String,
    pub source: SessionSource,
    pub connected_at: DateTime<Utc>,
}

/// Wallet state shared by every panel: connection, active wallet, balance
/// overrides, and external-chain balances.
///
/// Reads never fail. Unknown users fall back to the default snapshot and
/// unknown symbols read as zero.
pub struct WalletSession {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
    session: Option<Session>,
    current_wallet: Option<Wallet>,
    snapshot_override: Option<WalletSnapshot>,
    cnpy_override: Option<f64>,
    external: ExternalWallets,
}

impl WalletSession {
    /// Create the manager, restoring a persisted session if one exists.
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Arc<Catalog>) -> Self {
        let mut manager = Self {
            store,
            catalog,
            session: None,
            current_wallet: None,
            snapshot_override: None,
            cnpy_override: None,
            external: ExternalWallets::new(),
        };
        if let Some(address) = manager.stored_address() {
            manager.restore(address);
        } else {
            manager.load_snapshot_override();
        }
        manager
    }

    // -- Connection -----------------------------------------------------------

    /// Connect a session.
    ///
    /// An explicit identity wins. Without one the stored session is restored,
    /// falling back to the demo account. Connecting a different address
    /// replaces the current session.
    pub fn connect(&mut self, identity: Option<&str>) -> Result<Session> {
        let (address, source) = match identity {
            Some(id) => {
                let id = id.trim();
                if id.is_empty() {
                    return Err(LaunchpadError::InvalidIdentity("empty address".into()).into());
                }
                (id.to_string(), SessionSource::Explicit)
            }
            None => match self.stored_address() {
                Some(stored) => (stored, SessionSource::Restored),
                None => {
                    let demo = self.catalog.demo_user().ok_or_else(|| {
                        LaunchpadError::InvalidIdentity("no demo account available".into())
                    })?;
                    (demo.address.clone(), SessionSource::Handshake)
                }
            },
        };

        let replacing = match &self.session {
            Some(existing) if existing.address.eq_ignore_ascii_case(&address) => {
                return Ok(existing.clone());
            }
            Some(existing) => Some(existing.address.clone()),
            None => None,
        };
        if let Some(from) = replacing {
            info!(from = %from, to = %address, "replacing active session");
            self.reset();
            clear_session_keys(self.store.as_ref())?;
        }

        if source == SessionSource::Restored {
            self.restore(address);
        } else {
            self.start(address, source)?;
        }

        self.session
            .clone()
            .ok_or_else(|| LaunchpadError::Storage("session was not created".into()).into())
    }

    /// Drop the session and every persisted session key. Recent pools and sell
    /// orders are kept.
    pub fn disconnect(&mut self) -> Result<()> {
        let previous = self.session.as_ref().map(|s| s.address.clone());
        self.reset();
        clear_session_keys(self.store.as_ref())?;
        info!(address = previous.as_deref().unwrap_or("-"), "wallet disconnected");
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Fixture record for the connected user, if any.
    pub fn user(&self) -> Option<&User> {
        self.session
            .as_ref()
            .and_then(|s| self.catalog.user(&s.address))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn stored_address(&self) -> Option<String> {
        let connected = self
            .read_raw(StorageKey::WalletConnected)
            .is_some_and(|v| v == "true");
        if !connected {
            return None;
        }
        self.read_raw(StorageKey::WalletAddress)
            .filter(|a| !a.trim().is_empty())
    }

    fn read_raw(&self, key: StorageKey) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key.as_str(), "storage read failed: {e:#}");
                None
            }
        }
    }

    /// An override persisted while disconnected survives restarts and applies
    /// to whichever session connects next.
    fn load_snapshot_override(&mut self) {
        self.snapshot_override =
            read_json_or_default(self.store.as_ref(), StorageKey::SnapshotOverride);
    }

    fn start(&mut self, address: String, source: SessionSource) -> Result<()> {
        self.store.set(StorageKey::WalletAddress, &address)?;
        self.store.set(StorageKey::WalletConnected, "true")?;
        self.load_snapshot_override();

        self.current_wallet = self
            .catalog
            .user(&address)
            .and_then(|u| u.wallets.first().cloned());
        if let Some(wallet) = &self.current_wallet {
            write_json(self.store.as_ref(), StorageKey::CurrentWallet, wallet)?;
        }

        info!(address = %address, source = ?source, "wallet connected");
        self.session = Some(Session {
            address,
            source,
            connected_at: Utc::now(),
        });
        Ok(())
    }

    fn restore(&mut self, address: String) {
        let store = self.store.as_ref();
        self.current_wallet = read_json_or_default(store, StorageKey::CurrentWallet);
        let addresses: BTreeMap<ExternalChain, String> =
            read_json_or_default(store, StorageKey::ExternalChainAddresses);
        self.external.restore(&addresses);
        self.load_snapshot_override();

        info!(address = %address, "session restored from storage");
        self.session = Some(Session {
            address,
            source: SessionSource::Restored,
            connected_at: Utc::now(),
        });
    }

    fn reset(&mut self) {
        self.session = None;
        self.current_wallet = None;
        self.snapshot_override = None;
        self.cnpy_override = None;
        self.external = ExternalWallets::new();
    }

    // -- Snapshot resolution --------------------------------------------------

    /// The snapshot every read is based on: explicit override data, then the
    /// connected user's fixture snapshot, then the default demo snapshot.
    pub fn current_snapshot(&self) -> &WalletSnapshot {
        if let Some(snapshot) = &self.snapshot_override {
            return snapshot;
        }
        self.session
            .as_ref()
            .and_then(|s| self.catalog.snapshot_for(&s.address))
            .unwrap_or_else(|| self.catalog.default_snapshot())
    }

    /// Persist a snapshot that takes precedence over the fixtures. Any CNPY
    /// balance override is dropped since it was seeded from the old data.
    pub fn set_snapshot_override(&mut self, snapshot: WalletSnapshot) -> Result<()> {
        write_json(self.store.as_ref(), StorageKey::SnapshotOverride, &snapshot)?;
        self.snapshot_override = Some(snapshot);
        self.cnpy_override = None;
        debug!("snapshot override set");
        Ok(())
    }

    pub fn clear_snapshot_override(&mut self) -> Result<()> {
        self.store.remove(StorageKey::SnapshotOverride)?;
        self.snapshot_override = None;
        self.cnpy_override = None;
        Ok(())
    }

    // -- Balances -------------------------------------------------------------

    /// Effective balance of `symbol`. Unknown symbols read as zero.
    pub fn balance(&self, symbol: &str) -> f64 {
        if symbol.eq_ignore_ascii_case(CNPY) {
            if let Some(balance) = self.cnpy_override {
                return balance;
            }
        }
        self.current_snapshot().balance(symbol)
    }

    /// In-session CNPY override, if one is active.
    pub fn cnpy_override(&self) -> Option<f64> {
        self.cnpy_override
    }

    /// Apply a relative change to a balance and return the new effective
    /// balance, never below zero. Only CNPY can be adjusted; other symbols
    /// are left untouched.
    pub fn adjust_balance(&mut self, symbol: &str, delta: f64) -> Result<f64, LaunchpadError> {
        if !delta.is_finite() {
            return Err(LaunchpadError::InvalidAmount(format!(
                "balance change must be finite, got {delta}"
            )));
        }
        if !symbol.eq_ignore_ascii_case(CNPY) {
            debug!(symbol, delta, "ignoring balance adjustment for non-CNPY asset");
            return Ok(self.balance(symbol));
        }

        let current = self.balance(CNPY);
        let next = (current + delta).max(0.0);
        if current + delta < 0.0 {
            warn!(current, delta, "balance adjustment clamped at zero");
        }
        self.cnpy_override = Some(next);
        debug!(current, delta, next, "CNPY balance adjusted");
        Ok(next)
    }

    /// Total portfolio value with the CNPY override applied:
    /// `snapshot_total - original_cnpy_value + override * cnpy_price`.
    pub fn aggregate_value(&self) -> f64 {
        let snapshot = self.current_snapshot();
        let total = snapshot.total_value();
        let Some(balance) = self.cnpy_override else {
            return total;
        };
        let (original_value, price) = match snapshot.asset(CNPY) {
            Some(asset) => (asset.value(), asset.price),
            None => (0.0, self.catalog.token(CNPY).map_or(0.0, |t| t.price)),
        };
        total - original_value + balance * price
    }

    /// Snapshot assets with the CNPY override merged in.
    pub fn effective_assets(&self) -> Vec<Asset> {
        self.current_snapshot()
            .assets
            .iter()
            .cloned()
            .map(|mut asset| {
                if asset.symbol.eq_ignore_ascii_case(CNPY) {
                    if let Some(balance) = self.cnpy_override {
                        asset.balance = balance;
                    }
                }
                asset
            })
            .collect()
    }

    // -- Linked wallets -------------------------------------------------------

    /// Wallets linked to the connected user.
    pub fn linked_wallets(&self) -> &[Wallet] {
        self.user()
            .map(|u| u.wallets.as_slice())
            .unwrap_or_default()
    }

    pub fn current_wallet(&self) -> Option<&Wallet> {
        self.current_wallet.as_ref()
    }

    /// Switch to another linked wallet and persist the choice.
    pub fn select_wallet(&mut self, address: &str) -> Result<Wallet> {
        let wallet = self
            .linked_wallets()
            .iter()
            .find(|w| w.address.eq_ignore_ascii_case(address))
            .cloned()
            .ok_or_else(|| LaunchpadError::NotFound(format!("linked wallet {address}")))?;
        write_json(self.store.as_ref(), StorageKey::CurrentWallet, &wallet)?;
        info!(wallet = %wallet.nickname, "current wallet selected");
        self.current_wallet = Some(wallet.clone());
        Ok(wallet)
    }

    // -- External chains ------------------------------------------------------

    pub fn external(&self) -> &ExternalWallets {
        &self.external
    }

    pub fn connect_external(&mut self, chain: ExternalChain, address: &str) -> Result<()> {
        self.external.connect(chain, address)?;
        self.persist_external()
    }

    pub fn disconnect_external(&mut self, chain: ExternalChain) -> Result<()> {
        self.external.disconnect(chain);
        self.persist_external()
    }

    /// Move stablecoins in from an external chain and credit them as CNPY at
    /// the current CNPY price. Returns the CNPY credited.
    pub fn deposit_from_external(
        &mut self,
        chain: ExternalChain,
        symbol: &str,
        amount: f64,
    ) -> Result<f64, LaunchpadError> {
        let moved = self.external.withdraw(chain, symbol, amount)?;
        let price = self
            .current_snapshot()
            .asset(CNPY)
            .map(|a| a.price)
            .or_else(|| self.catalog.token(CNPY).map(|t| t.price))
            .unwrap_or(0.0);
        let credited = if price > 0.0 { moved / price } else { 0.0 };
        if credited > 0.0 {
            self.adjust_balance(CNPY, credited)?;
        }
        info!(chain = %chain, symbol, moved, credited, "external deposit");
        Ok(credited)
    }

    fn persist_external(&self) -> Result<()> {
        let addresses = self.external.addresses();
        if addresses.is_empty() {
            self.store.remove(StorageKey::ExternalChainAddresses)
        } else {
            write_json(
                self.store.as_ref(),
                StorageKey::ExternalChainAddresses,
                &addresses,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
