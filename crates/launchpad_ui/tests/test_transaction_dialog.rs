use std::time::Duration;

use launchpad_data::TransactionKind;
use launchpad_ui::components::transaction_dialog::*;
use launchpad_wallet::TransactionSimulator;

fn editing(amount: &str) -> TransactionDialog {
    let mut dialog = TransactionDialog::new(TransactionKind::Buy, "cnpy");
    dialog.open();
    dialog.amount_input = amount.into();
    dialog
}

#[test]
fn starts_closed() {
    let dialog = TransactionDialog::new(TransactionKind::Stake, "CNPY");
    assert_eq!(dialog.state(), &DialogState::Closed);
    assert!(!dialog.is_open());
    assert!(!dialog.can_submit());
}

#[test]
fn can_submit_needs_positive_amount() {
    assert!(editing("12.5").can_submit());
    assert!(!editing("").can_submit());
    assert!(!editing("0").can_submit());
    assert!(!editing("-4").can_submit());
    assert!(!editing("NaN").can_submit());
}

#[tokio::test]
async fn submit_moves_to_confirmed_and_celebrates() {
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut dialog = editing("5");

    let receipt = dialog.submit(&sim).await.unwrap();

    assert_eq!(receipt.symbol, "CNPY");
    assert_eq!(dialog.state(), &DialogState::Confirmed(receipt));
    assert!(dialog.should_celebrate());
    dialog.acknowledge();
    assert!(!dialog.should_celebrate());
    assert!(dialog.is_open());
}

#[tokio::test]
async fn submit_rejected_outside_editing() {
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut dialog = TransactionDialog::new(TransactionKind::Buy, "CNPY");
    dialog.amount_input = "5".into();
    assert!(dialog.submit(&sim).await.is_err());
    assert_eq!(dialog.state(), &DialogState::Closed);
}

#[tokio::test]
async fn invalid_amount_stays_editing() {
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut dialog = editing("abc");
    assert!(dialog.submit(&sim).await.is_err());
    assert_eq!(dialog.state(), &DialogState::Editing);
}

#[tokio::test]
async fn closing_while_pending_discards_everything() {
    let sim = TransactionSimulator::new(Duration::from_secs(60));
    let mut dialog = editing("5");

    let result = tokio::time::timeout(Duration::from_millis(10), dialog.submit(&sim)).await;
    assert!(result.is_err());
    assert!(matches!(dialog.state(), DialogState::Pending { .. }));

    dialog.close();
    assert_eq!(dialog.state(), &DialogState::Closed);
    assert!(dialog.amount_input.is_empty());
    assert!(!dialog.should_celebrate());
}

#[tokio::test]
async fn reopening_starts_fresh() {
    let sim = TransactionSimulator::new(Duration::ZERO);
    let mut dialog = editing("5");
    dialog.submit(&sim).await.unwrap();

    dialog.close();
    dialog.open();
    assert_eq!(dialog.state(), &DialogState::Editing);
    assert!(dialog.amount_input.is_empty());
    assert!(!dialog.should_celebrate());
}
