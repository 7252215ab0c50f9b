use std::sync::Arc;
use std::time::Duration;

use launchpad_core::{LaunchpadConfig, LaunchpadError, MemoryStore};
use launchpad_data::Catalog;
use launchpad_ui::panels::staking::*;
use launchpad_wallet::{TransactionSimulator, WalletSession};

fn session() -> WalletSession {
    let catalog = Arc::new(Catalog::embedded().expect("fixtures"));
    WalletSession::new(Arc::new(MemoryStore::new()), catalog)
}

fn form(amount: &str) -> StakingForm {
    let mut form = StakingForm::new(12.0);
    form.amount_input = amount.into();
    form
}

#[test]
fn from_config_uses_apy() {
    let config = LaunchpadConfig {
        staking_apy_pct: 8.5,
        ..Default::default()
    };
    assert_eq!(StakingForm::from_config(&config).apy_pct, 8.5);
}

#[test]
fn validate_checks_amount_and_balance() {
    assert_eq!(form("100").validate(750.0).unwrap(), 100.0);
    assert_eq!(form(" 750 ").validate(750.0).unwrap(), 750.0);

    assert!(matches!(form("abc").validate(750.0), Err(LaunchpadError::InvalidAmount(_))));
    assert!(matches!(form("0").validate(750.0), Err(LaunchpadError::InvalidAmount(_))));
    assert!(matches!(form("-1").validate(750.0), Err(LaunchpadError::InvalidAmount(_))));
    assert!(matches!(
        form("751").validate(750.0),
        Err(LaunchpadError::InsufficientFunds { .. })
    ));
}

#[test]
fn projected_reward_uses_apy() {
    let form = form("500");
    assert_eq!(form.projected_yearly_reward(500.0), 60.0);
    assert_eq!(form.projected_reward_for_input(), Some(60.0));
}

#[test]
fn unparseable_input_has_no_reward() {
    assert_eq!(form("nope").projected_reward_for_input(), None);
    assert_eq!(form("-3").projected_reward_for_input(), None);
}

#[tokio::test]
async fn stake_debits_cnpy_after_confirmation() {
    let mut session = session();
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut form = form("200");

    let receipt = form.stake(&mut session, &sim).await.unwrap();

    assert_eq!(receipt.symbol, "CNPY");
    assert_eq!(receipt.amount, 200.0);
    assert_eq!(session.balance("CNPY"), 550.0);
    assert_eq!(form.staked, 200.0);
    assert!(form.amount_input.is_empty());
}

#[tokio::test]
async fn stake_over_balance_changes_nothing() {
    let mut session = session();
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut form = form("10000");

    assert!(form.stake(&mut session, &sim).await.is_err());
    assert_eq!(session.cnpy_override(), None);
    assert_eq!(form.staked, 0.0);
}
