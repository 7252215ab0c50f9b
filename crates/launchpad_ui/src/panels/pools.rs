use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use launchpad_core::{KeyValueStore, StorageKey, read_json_or_default, write_json};
use launchpad_data::{LiquidityPool, LpPosition, WalletSnapshot};

/// Maximum number of recently selected pools remembered.
pub const RECENT_POOLS_LIMIT: usize = 5;

/// Pool list with search, APR ordering and a persisted recency list.
pub struct PoolSelector {
    pools: Vec<LiquidityPool>,
    recent: Vec<String>,
    store: Arc<dyn KeyValueStore>,
}

impl PoolSelector {
    pub fn new(pools: Vec<LiquidityPool>, store: Arc<dyn KeyValueStore>) -> Self {
        let stored: Vec<String> = read_json_or_default(store.as_ref(), StorageKey::RecentPools);
        let mut recent: Vec<String> = Vec::with_capacity(RECENT_POOLS_LIMIT);
        for id in stored {
            if !recent.contains(&id) {
                recent.push(id);
            }
        }
        recent.truncate(RECENT_POOLS_LIMIT);
        Self {
            pools,
            recent,
            store,
        }
    }

    pub fn pool(&self, id: &str) -> Option<&LiquidityPool> {
        self.pools.iter().find(|p| p.id == id)
    }

    /// Pools sorted by APR, highest first, optionally filtered by a token
    /// symbol or name on either side of the pair. Equal APRs keep fixture
    /// order.
    pub fn list_pools(&self, query: Option<&str>) -> Vec<&LiquidityPool> {
        let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
        let mut pools: Vec<_> = self
            .pools
            .iter()
            .filter(|p| needle.is_empty() || p.token_a.matches(&needle) || p.token_b.matches(&needle))
            .collect();
        pools.sort_by(|a, b| b.apr.total_cmp(&a.apr));
        pools
    }

    /// Record a selection. Unknown ids are ignored and return `false`.
    pub fn select_pool(&mut self, id: &str) -> Result<bool> {
        if self.pool(id).is_none() {
            debug!(pool = id, "ignoring selection of unknown pool");
            return Ok(false);
        }
        self.recent.retain(|r| r != id);
        self.recent.insert(0, id.to_string());
        self.recent.truncate(RECENT_POOLS_LIMIT);
        write_json(self.store.as_ref(), StorageKey::RecentPools, &self.recent)?;
        info!(pool = id, recent = self.recent.len(), "pool selected");
        Ok(true)
    }

    /// Recently selected ids, most recent first.
    pub fn recent_pool_ids(&self) -> &[String] {
        &self.recent
    }

    /// Recent selections that still exist in the pool list.
    pub fn recent_pools(&self) -> Vec<&LiquidityPool> {
        self.recent.iter().filter_map(|id| self.pool(id)).collect()
    }

    /// Pools the snapshot holds a position in, largest position first.
    pub fn pools_with_positions<'a>(
        &'a self,
        snapshot: &'a WalletSnapshot,
    ) -> Vec<(&'a LiquidityPool, &'a LpPosition)> {
        let mut held: Vec<_> = snapshot
            .lp_positions
            .iter()
            .filter_map(|pos| self.pool(&pos.pool_id).map(|pool| (pool, pos)))
            .collect();
        held.sort_by(|a, b| b.1.value_usd.total_cmp(&a.1.value_usd));
        held
    }
}
