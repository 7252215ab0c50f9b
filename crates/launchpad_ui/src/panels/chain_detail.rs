use chrono::Duration;
use tracing::debug;

use launchpad_data::{Block, Catalog, Chain, ChainTransaction, PricePoint};

use super::milestones::{EnrichedMilestone, completed_count, enrich};

/// How many transactions and blocks the detail view lists.
pub const RECENT_LIMIT: usize = 10;

/// Price chart window, measured back from the newest sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    All,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hour => "1H",
            Self::Day => "1D",
            Self::Week => "1W",
            Self::Month => "1M",
            Self::All => "All",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label))
    }

    /// `None` means unbounded.
    pub fn window(self) -> Option<Duration> {
        match self {
            Self::Hour => Some(Duration::hours(1)),
            Self::Day => Some(Duration::days(1)),
            Self::Week => Some(Duration::weeks(1)),
            Self::Month => Some(Duration::days(30)),
            Self::All => None,
        }
    }
}

/// Everything the chain detail page shows.
#[derive(Debug, Clone)]
pub struct ChainDetailData {
    pub chain: Chain,
    pub timeframe: Timeframe,
    /// Oldest first.
    pub prices: Vec<PricePoint>,
    pub price_change_pct: f64,
    /// Newest first, at most [`RECENT_LIMIT`].
    pub recent_transactions: Vec<ChainTransaction>,
    /// Highest first, at most [`RECENT_LIMIT`].
    pub recent_blocks: Vec<Block>,
    pub milestones: Vec<EnrichedMilestone>,
}

impl ChainDetailData {
    /// Build the page for `chain_id`. Unknown chains yield `None`.
    pub fn load(catalog: &Catalog, chain_id: &str, timeframe: Timeframe) -> Option<Self> {
        let chain = catalog.chain(chain_id)?.clone();
        let prices = window_prices(catalog.price_history(chain_id), timeframe);
        let price_change_pct = price_change_pct(&prices);

        let recent_transactions = catalog
            .transactions_for(chain_id)
            .into_iter()
            .take(RECENT_LIMIT)
            .cloned()
            .collect();
        let recent_blocks = catalog
            .blocks_for(chain_id)
            .into_iter()
            .take(RECENT_LIMIT)
            .cloned()
            .collect();
        let milestones = enrich(catalog.milestones_for(chain_id));

        debug!(
            chain = chain_id,
            timeframe = timeframe.label(),
            points = prices.len(),
            "chain detail loaded"
        );
        Some(Self {
            chain,
            timeframe,
            prices,
            price_change_pct,
            recent_transactions,
            recent_blocks,
            milestones,
        })
    }

    /// Re-window the chart without reloading the rest of the page.
    pub fn set_timeframe(&mut self, catalog: &Catalog, timeframe: Timeframe) {
        self.prices = window_prices(catalog.price_history(&self.chain.id), timeframe);
        self.price_change_pct = price_change_pct(&self.prices);
        self.timeframe = timeframe;
    }

    /// Newest sampled price, falling back to the chain record.
    pub fn latest_price(&self) -> f64 {
        self.prices.last().map_or(self.chain.price, |p| p.price)
    }

    /// `(low, high)` across the window.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.prices.iter().map(|p| p.price);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    pub fn window_volume(&self) -> f64 {
        self.prices.iter().map(|p| p.volume).sum()
    }

    pub fn completed_milestones(&self) -> usize {
        completed_count(&self.milestones)
    }
}

fn window_prices(history: Vec<&PricePoint>, timeframe: Timeframe) -> Vec<PricePoint> {
    let Some(newest) = history.last().map(|p| p.timestamp) else {
        return Vec::new();
    };
    let start = timeframe.window().map(|w| newest - w);
    history
        .into_iter()
        .filter(|p| start.is_none_or(|s| p.timestamp >= s))
        .cloned()
        .collect()
}

/// Change from the first to the last sample, in percent.
fn price_change_pct(prices: &[PricePoint]) -> f64 {
    match (prices.first(), prices.last()) {
        (Some(first), Some(last)) if prices.len() > 1 && first.price > 0.0 => {
            (last.price / first.price - 1.0) * 100.0
        }
        _ => 0.0,
    }
}
