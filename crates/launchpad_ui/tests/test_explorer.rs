use launchpad_data::Catalog;
use launchpad_ui::panels::explorer::*;

fn catalog() -> Catalog {
    Catalog::embedded().expect("fixtures")
}

#[test]
fn transaction_detail_counts_confirmations() {
    let detail = transaction_detail(&catalog(), "photosync", "0xtx01photo").unwrap();
    assert_eq!(detail.transaction.block_height, 1040);
    assert_eq!(detail.block.as_ref().map(|b| b.height), Some(1040));
    assert_eq!(detail.confirmations, 5);
}

#[test]
fn transaction_in_latest_block_has_one_confirmation() {
    let detail = transaction_detail(&catalog(), "photosync", "0xtx06photo").unwrap();
    assert_eq!(detail.confirmations, 1);
}

#[test]
fn transaction_hash_lookup_ignores_case() {
    assert!(transaction_detail(&catalog(), "photosync", "0xTX01PHOTO").is_some());
}

#[test]
fn transaction_on_other_chain_is_none() {
    assert!(transaction_detail(&catalog(), "gamechain", "0xtx01photo").is_none());
    assert!(transaction_detail(&catalog(), "photosync", "0xdead").is_none());
}

#[test]
fn block_detail_lists_transactions_and_neighbours() {
    let detail = block_detail(&catalog(), "photosync", 1041).unwrap();
    let hashes: Vec<&str> = detail.transactions.iter().map(|t| t.hash.as_str()).collect();
    assert_eq!(hashes, ["0xtx02photo", "0xtx03photo"]);
    assert_eq!(detail.transactions.len() as u32, detail.block.tx_count);
    assert_eq!(detail.previous_height, Some(1040));
    assert_eq!(detail.next_height, Some(1042));
    assert_eq!(detail.confirmations, 4);
}

#[test]
fn edge_blocks_have_no_neighbour() {
    let catalog = catalog();
    let first = block_detail(&catalog, "photosync", 1040).unwrap();
    assert_eq!(first.previous_height, None);
    let last = block_detail(&catalog, "photosync", 1044).unwrap();
    assert_eq!(last.next_height, None);
}

#[test]
fn empty_block_has_no_transactions() {
    let detail = block_detail(&catalog(), "photosync", 1043).unwrap();
    assert!(detail.transactions.is_empty());
}

#[test]
fn unknown_block_is_none() {
    assert!(block_detail(&catalog(), "photosync", 9_999).is_none());
    assert!(block_detail(&catalog(), "nope", 1040).is_none());
}
