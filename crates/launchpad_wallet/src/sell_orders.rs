use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use launchpad_core::{KeyValueStore, LaunchpadError, StorageKey, read_json_or_default, write_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Cancelled,
    Filled,
}

/// A limit sell order the user placed on a chain's token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellOrder {
    pub id: String,
    pub chain_id: String,
    pub amount: f64,
    pub price_usd: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl SellOrder {
    pub fn total_usd(&self) -> f64 {
        self.amount * self.price_usd
    }
}

/// The user's sell orders, persisted as one JSON list. Nothing is ever matched.
pub struct SellOrderBook {
    store: Arc<dyn KeyValueStore>,
}

impl SellOrderBook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Every stored order, oldest first. Corrupt storage reads as empty.
    pub fn list(&self) -> Vec<SellOrder> {
        read_json_or_default(self.store.as_ref(), StorageKey::SellOrders)
    }

    /// Open orders for one chain, newest first.
    pub fn open_orders(&self, chain_id: &str) -> Vec<SellOrder> {
        let mut orders: Vec<_> = self
            .list()
            .into_iter()
            .filter(|o| o.chain_id == chain_id && o.status == OrderStatus::Open)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    pub fn place(&self, chain_id: &str, amount: f64, price_usd: f64) -> Result<SellOrder> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LaunchpadError::InvalidAmount(format!(
                "order amount must be positive, got {amount}"
            ))
            .into());
        }
        if !price_usd.is_finite() || price_usd <= 0.0 {
            return Err(LaunchpadError::InvalidAmount(format!(
                "order price must be positive, got {price_usd}"
            ))
            .into());
        }

        let order = SellOrder {
            id: uuid::Uuid::new_v4().to_string(),
            chain_id: chain_id.to_string(),
            amount,
            price_usd,
            status: OrderStatus::Open,
            created_at: Utc::now(),
        };
        let mut orders = self.list();
        orders.push(order.clone());
        write_json(self.store.as_ref(), StorageKey::SellOrders, &orders)?;
        info!(order_id = %order.id, chain = chain_id, amount, price_usd, "sell order placed");
        Ok(order)
    }

    /// Cancel an open order. Returns `false` if no open order has that id.
    pub fn cancel(&self, id: &str) -> Result<bool> {
        let mut orders = self.list();
        let Some(order) = orders
            .iter_mut()
            .find(|o| o.id == id && o.status == OrderStatus::Open)
        else {
            return Ok(false);
        };
        order.status = OrderStatus::Cancelled;
        write_json(self.store.as_ref(), StorageKey::SellOrders, &orders)?;
        info!(order_id = id, "sell order cancelled");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::{MemoryStore, SqliteStore};

    fn book() -> (Arc<MemoryStore>, SellOrderBook) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), SellOrderBook::new(store))
    }

    #[test]
    fn empty_by_default() {
        let (_, book) = book();
        assert!(book.list().is_empty());
    }

    #[test]
    fn place_and_list() {
        let (_, book) = book();
        let order = book.place("photosync", 50.0, 2.5).unwrap();

        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.total_usd(), 125.0);
        assert_eq!(book.list(), vec![order]);
    }

    #[test]
    fn open_orders_filter_by_chain_and_status() {
        let (_, book) = book();
        let a = book.place("photosync", 1.0, 1.0).unwrap();
        book.place("gamechain", 1.0, 1.0).unwrap();
        let c = book.place("photosync", 2.0, 1.0).unwrap();
        book.cancel(&a.id).unwrap();

        let open = book.open_orders("photosync");
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, c.id);
    }

    #[test]
    fn cancel_only_affects_open_orders() {
        let (_, book) = book();
        let order = book.place("photosync", 1.0, 1.0).unwrap();

        assert!(book.cancel(&order.id).unwrap());
        assert!(!book.cancel(&order.id).unwrap());
        assert!(!book.cancel("missing").unwrap());
        assert_eq!(book.list()[0].status, OrderStatus::Cancelled);
    }

    #[test]
    fn rejects_bad_amounts() {
        let (_, book) = book();
        assert!(book.place("photosync", 0.0, 1.0).is_err());
        assert!(book.place("photosync", 1.0, -1.0).is_err());
        assert!(book.place("photosync", f64::NAN, 1.0).is_err());
        assert!(book.list().is_empty());
    }

    #[test]
    fn corrupt_storage_reads_as_empty_and_recovers() {
        let (store, book) = book();
        store.set(StorageKey::SellOrders, "[{\"id\": ").unwrap();
        assert!(book.list().is_empty());

        book.place("photosync", 1.0, 1.0).unwrap();
        assert_eq!(book.list().len(), 1);
    }

    #[test]
    fn persists_in_sqlite() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.db");
        let id = {
            let book = SellOrderBook::new(Arc::new(SqliteStore::open_at(&path).unwrap()));
            book.place("gamechain", 10.0, 0.5).unwrap().id
        };
        let book = SellOrderBook::new(Arc::new(SqliteStore::open_at(&path).unwrap()));
        assert_eq!(book.list()[0].id, id);
    }
}
