use std::fmt::Write;
use std::sync::Arc;

use anyhow::Result;

use launchpad_core::{KeyValueStore, LaunchpadConfig};
use launchpad_ui::Route;
use launchpad_ui::format::{
    format_amount, format_compact_usd, format_pct, format_usd, truncate_address,
};
use launchpad_ui::panels::chain_detail::{ChainDetailData, Timeframe};
use launchpad_ui::panels::explorer::{block_detail, transaction_detail};
use launchpad_ui::panels::launch_wizard::{Language, LaunchWizardData, WizardStep};
use launchpad_ui::panels::pools::PoolSelector;
use launchpad_ui::panels::staking::StakingForm;
use launchpad_ui::panels::trade::{TradeSide, quote};
use launchpad_ui::panels::wallet::WalletPanelData;
use launchpad_wallet::{SellOrderBook, WalletSession};

/// Plain-text rendering of one screen.
pub fn render(
    route: &Route,
    config: &LaunchpadConfig,
    session: &WalletSession,
    store: Arc<dyn KeyValueStore>,
) -> Result<String> {
    let mut out = String::new();
    match route {
        Route::Launch(step) => launch(&mut out, *step, config)?,
        Route::Chain { chain_id } => chain(&mut out, session, chain_id)?,
        Route::Transaction { chain_id, hash } => transaction(&mut out, session, chain_id, hash)?,
        Route::Block { chain_id, height } => block(&mut out, session, chain_id, *height)?,
        Route::Wallet => wallet(&mut out, session, config, store)?,
        Route::Trade => trade(&mut out, session, store)?,
    }
    Ok(out)
}

fn launch(out: &mut String, step: WizardStep, config: &LaunchpadConfig) -> Result<()> {
    let data = LaunchWizardData::from_config(config);
    writeln!(out, "Launch a chain")?;
    for s in WizardStep::ALL {
        let marker = if s == step { ">" } else { " " };
        writeln!(out, "{marker} {}. {}", s.index() + 1, s.label())?;
    }
    match step {
        WizardStep::SelectLanguage => {
            for lang in Language::ALL {
                writeln!(out, "  - {} ({})", lang.name(), lang.template())?;
            }
        }
        WizardStep::Review => {
            writeln!(out, "Launch fee: {} CNPY", format_amount(data.launch_fee))?;
        }
        _ => {}
    }
    Ok(())
}

fn chain(out: &mut String, session: &WalletSession, chain_id: &str) -> Result<()> {
    let Some(detail) = ChainDetailData::load(session.catalog(), chain_id, Timeframe::default())
    else {
        writeln!(out, "Chain {chain_id} not found")?;
        return Ok(());
    };
    let c = &detail.chain;
    writeln!(out, "{} ({}) [{}]", c.name, c.ticker, c.status.label())?;
    writeln!(out, "{}", c.description)?;
    writeln!(
        out,
        "Price {} ({} {})  Market cap {}  Holders {}",
        format_usd(detail.latest_price()),
        format_pct(detail.price_change_pct),
        detail.timeframe.label(),
        format_compact_usd(c.market_cap),
        c.holders
    )?;
    writeln!(
        out,
        "Milestones {}/{}",
        detail.completed_milestones(),
        detail.milestones.len()
    )?;
    for m in &detail.milestones {
        writeln!(
            out,
            "  [{}] {} {:.0}%",
            m.icon.key(),
            m.milestone.name,
            m.progress_pct()
        )?;
    }
    writeln!(out, "Recent blocks")?;
    for b in &detail.recent_blocks {
        writeln!(out, "  #{} {} txs", b.height, b.tx_count)?;
    }
    writeln!(out, "Recent transactions")?;
    for t in &detail.recent_transactions {
        writeln!(
            out,
            "  {} {} {}",
            truncate_address(&t.hash),
            t.kind.label(),
            format_usd(t.value_usd)
        )?;
    }
    Ok(())
}

fn transaction(out: &mut String, session: &WalletSession, chain_id: &str, hash: &str) -> Result<()> {
    match transaction_detail(session.catalog(), chain_id, hash) {
        Some(d) => {
            let t = &d.transaction;
            writeln!(out, "Transaction {}", t.hash)?;
            writeln!(out, "  {} {} ({})", t.kind.label(), format_amount(t.amount), format_usd(t.value_usd))?;
            writeln!(out, "  from {} to {}", truncate_address(&t.from), truncate_address(&t.to))?;
            writeln!(out, "  block #{} ({} confirmations)", t.block_height, d.confirmations)?;
        }
        None => writeln!(out, "Transaction {hash} not found on {chain_id}")?,
    }
    Ok(())
}

fn block(out: &mut String, session: &WalletSession, chain_id: &str, height: u64) -> Result<()> {
    match block_detail(session.catalog(), chain_id, height) {
        Some(d) => {
            writeln!(out, "Block #{} {}", d.block.height, truncate_address(&d.block.hash))?;
            writeln!(out, "  proposer {}", truncate_address(&d.block.proposer))?;
            writeln!(out, "  {} bytes, {} confirmations", d.block.size_bytes, d.confirmations)?;
            for t in &d.transactions {
                writeln!(out, "  - {} {}", t.hash, t.kind.label())?;
            }
        }
        None => writeln!(out, "Block {height} not found on {chain_id}")?,
    }
    Ok(())
}

fn wallet(
    out: &mut String,
    session: &WalletSession,
    config: &LaunchpadConfig,
    store: Arc<dyn KeyValueStore>,
) -> Result<()> {
    let data = WalletPanelData::from_session(session);
    writeln!(
        out,
        "{} {}",
        data.display_name.as_deref().unwrap_or("Wallet"),
        data.address_label()
    )?;
    writeln!(out, "Total {}", data.total_label())?;
    for a in &data.assets {
        writeln!(
            out,
            "  {:<6} {:>14} {:>14} {:>6.1}%",
            a.symbol,
            format_amount(a.balance),
            format_usd(a.value),
            a.share_pct
        )?;
    }
    if !data.lp_positions.is_empty() {
        writeln!(out, "Liquidity {}", format_usd(data.lp_total()))?;
        for p in &data.lp_positions {
            writeln!(out, "  {} {}", p.pool_id, format_usd(p.value_usd))?;
        }
    }

    let staking = StakingForm::from_config(config);
    let cnpy = session.balance(launchpad_core::CNPY);
    writeln!(
        out,
        "Staking {}% APY: {} CNPY/yr if fully staked",
        staking.apy_pct,
        format_amount(staking.projected_yearly_reward(cnpy))
    )?;

    let orders = SellOrderBook::new(store).list();
    if !orders.is_empty() {
        writeln!(out, "Sell orders")?;
        for o in orders {
            writeln!(out, "  {} {} @ {} [{:?}]", o.chain_id, format_amount(o.amount), format_usd(o.price_usd), o.status)?;
        }
    }
    Ok(())
}

fn trade(out: &mut String, session: &WalletSession, store: Arc<dyn KeyValueStore>) -> Result<()> {
    let catalog = session.catalog();
    writeln!(out, "Buy 100 tokens")?;
    for c in catalog.chains() {
        let q = quote(catalog, &c.id, TradeSide::Buy, 100.0)?;
        writeln!(
            out,
            "  {:<6} {} CNPY (fee {})",
            q.ticker,
            format_amount(q.net_cnpy()),
            format_amount(q.fee_cnpy)
        )?;
    }

    let selector = PoolSelector::new(catalog.pools().to_vec(), store);
    let recent = selector.recent_pools();
    if !recent.is_empty() {
        writeln!(out, "Recent pools")?;
        for p in recent {
            writeln!(out, "  {}", p.pair_label())?;
        }
    }
    writeln!(out, "Pools")?;
    for p in selector.list_pools(None) {
        writeln!(
            out,
            "  {:<12} APR {:>5.1}%  TVL {}",
            p.pair_label(),
            p.apr,
            format_compact_usd(p.tvl)
        )?;
    }
    Ok(())
}
