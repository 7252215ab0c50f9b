use launchpad_data::{Block, Catalog, ChainTransaction};

/// A transaction with its block context.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetail {
    pub transaction: ChainTransaction,
    pub block: Option<Block>,
    /// Blocks produced since inclusion, counting the including block.
    pub confirmations: u64,
}

/// A block with the transactions it carries and its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDetail {
    pub block: Block,
    pub transactions: Vec<ChainTransaction>,
    pub previous_height: Option<u64>,
    pub next_height: Option<u64>,
    pub confirmations: u64,
}

fn latest_height(catalog: &Catalog, chain_id: &str) -> Option<u64> {
    catalog.blocks_for(chain_id).first().map(|b| b.height)
}

fn confirmations(latest: Option<u64>, height: u64) -> u64 {
    latest.map_or(0, |l| l.saturating_sub(height) + 1)
}

/// Look up a transaction on `chain_id`. A hash from another chain is `None`.
pub fn transaction_detail(catalog: &Catalog, chain_id: &str, hash: &str) -> Option<TransactionDetail> {
    let tx = catalog
        .transaction(hash)
        .filter(|t| t.chain_id == chain_id)?;
    let block = catalog.block(chain_id, tx.block_height).cloned();
    let confirmations = if block.is_some() {
        confirmations(latest_height(catalog, chain_id), tx.block_height)
    } else {
        0
    };
    Some(TransactionDetail {
        transaction: tx.clone(),
        block,
        confirmations,
    })
}

pub fn block_detail(catalog: &Catalog, chain_id: &str, height: u64) -> Option<BlockDetail> {
    let block = catalog.block(chain_id, height)?.clone();
    let previous_height = height
        .checked_sub(1)
        .filter(|h| catalog.block(chain_id, *h).is_some());
    let next_height = height
        .checked_add(1)
        .filter(|h| catalog.block(chain_id, *h).is_some());
    Some(BlockDetail {
        transactions: catalog
            .block_transactions(chain_id, height)
            .into_iter()
            .cloned()
            .collect(),
        confirmations: confirmations(latest_height(catalog, chain_id), height),
        block,
        previous_height,
        next_height,
    })
}
