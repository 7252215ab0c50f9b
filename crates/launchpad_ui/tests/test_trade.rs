use std::sync::Arc;
use std::time::Duration;

use launchpad_core::{LaunchpadError, MemoryStore};
use launchpad_data::Catalog;
use launchpad_ui::panels::trade::*;
use launchpad_wallet::{OrderStatus, SellOrderBook, TransactionSimulator, WalletSession};

fn catalog() -> Catalog {
    Catalog::embedded().expect("fixtures")
}

fn session() -> WalletSession {
    WalletSession::new(Arc::new(MemoryStore::new()), Arc::new(catalog()))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn buy_quote_adds_one_percent_fee() {
    let q = quote(&catalog(), "photosync", TradeSide::Buy, 100.0).unwrap();
    assert_eq!(q.ticker, "PHOTO");
    assert_eq!(q.gross_cnpy, 100.0);
    assert_eq!(q.fee_cnpy, 1.0);
    assert_eq!(q.net_cnpy(), 101.0);
}

#[test]
fn sell_quote_subtracts_fee() {
    let q = quote(&catalog(), "gamechain", TradeSide::Sell, 100.0).unwrap();
    assert!(close(q.gross_cnpy, 21.0));
    assert!(close(q.net_cnpy(), 20.79));
}

#[test]
fn quote_rejects_bad_input() {
    let catalog = catalog();
    assert!(matches!(
        quote(&catalog, "nope", TradeSide::Buy, 1.0),
        Err(LaunchpadError::NotFound(_))
    ));
    assert!(matches!(
        quote(&catalog, "photosync", TradeSide::Buy, 0.0),
        Err(LaunchpadError::InvalidAmount(_))
    ));
    assert!(quote(&catalog, "photosync", TradeSide::Buy, f64::INFINITY).is_err());
}

#[test]
fn quote_expires_with_countdown() {
    let catalog = catalog();
    let mut form = TradeForm::new("photosync", 3);
    form.amount_input = "10".into();
    form.refresh_quote(&catalog).unwrap();

    assert!(form.quote().is_some());
    assert!(!form.tick());
    assert!(!form.tick());
    assert_eq!(form.countdown().label(), "00:01");
    assert!(form.tick());
    assert!(form.quote().is_none());

    form.refresh_quote(&catalog).unwrap();
    assert!(form.quote().is_some());
    assert_eq!(form.countdown().remaining_secs(), 3);
}

#[test]
fn tick_without_quote_does_nothing() {
    let mut form = TradeForm::new("photosync", 1);
    assert!(!form.tick());
    assert_eq!(form.countdown().remaining_secs(), 1);
}

#[test]
fn refresh_rejects_unparseable_amount() {
    let mut form = TradeForm::new("photosync", 30);
    form.amount_input = "ten".into();
    assert!(form.refresh_quote(&catalog()).is_err());
    assert!(form.quote().is_none());
}

#[tokio::test]
async fn execute_buy_debits_cost() {
    let mut session = session();
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut form = TradeForm::new("photosync", 30);
    form.amount_input = "100".into();
    form.refresh_quote(session.catalog()).unwrap();

    let receipt = form.execute_buy(&mut session, &sim).await.unwrap();

    assert_eq!(receipt.symbol, "PHOTO");
    assert_eq!(session.balance("CNPY"), 649.0);
    assert!(form.quote().is_none());
}

#[tokio::test]
async fn execute_buy_needs_live_quote() {
    let mut session = session();
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut form = TradeForm::new("photosync", 30);

    assert!(matches!(
        form.execute_buy(&mut session, &sim).await,
        Err(LaunchpadError::Validation(_))
    ));
}

#[tokio::test]
async fn execute_buy_over_balance_fails_cleanly() {
    let mut session = session();
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut form = TradeForm::new("photosync", 30);
    form.amount_input = "1000".into();
    form.refresh_quote(session.catalog()).unwrap();

    assert!(matches!(
        form.execute_buy(&mut session, &sim).await,
        Err(LaunchpadError::InsufficientFunds { .. })
    ));
    assert_eq!(session.cnpy_override(), None);
    assert!(form.quote().is_some());
}

#[test]
fn sell_orders_go_to_the_book() {
    let book = SellOrderBook::new(Arc::new(MemoryStore::new()));
    let form = TradeForm::new("gamechain", 30);

    let order = form.place_sell_order(&book, 500.0, 0.5).unwrap();

    assert_eq!(order.chain_id, "gamechain");
    assert_eq!(order.status, OrderStatus::Open);
    assert_eq!(book.open_orders("gamechain").len(), 1);
    assert!(form.place_sell_order(&book, -1.0, 0.5).is_err());
}
