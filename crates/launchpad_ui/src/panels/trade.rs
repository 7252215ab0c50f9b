use tracing::{debug, info};

use launchpad_core::{CNPY, LaunchpadError};
use launchpad_data::{Catalog, TransactionKind};
use launchpad_wallet::{SellOrder, SellOrderBook, TransactionSimulator, TxReceipt, WalletSession};

use crate::components::Countdown;

/// Fee charged on every trade, in percent of the gross CNPY amount.
pub const TRADE_FEE_PCT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A priced trade of `amount` chain tokens against CNPY.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeQuote {
    pub side: TradeSide,
    pub chain_id: String,
    pub ticker: String,
    pub amount: f64,
    pub token_price: f64,
    pub cnpy_price: f64,
    pub gross_cnpy: f64,
    pub fee_cnpy: f64,
}

impl TradeQuote {
    /// CNPY paid on a buy, or received on a sell.
    pub fn net_cnpy(&self) -> f64 {
        match self.side {
            TradeSide::Buy => self.gross_cnpy + self.fee_cnpy,
            TradeSide::Sell => self.gross_cnpy - self.fee_cnpy,
        }
    }
}

/// Price a trade from the chain's listed price and the CNPY token price.
pub fn quote(
    catalog: &Catalog,
    chain_id: &str,
    side: TradeSide,
    amount: f64,
) -> Result<TradeQuote, LaunchpadError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LaunchpadError::InvalidAmount(format!(
            "trade amount must be positive, got {amount}"
        )));
    }
    let chain = catalog
        .chain(chain_id)
        .ok_or_else(|| LaunchpadError::NotFound(format!("chain {chain_id}")))?;
    let cnpy_price = catalog
        .token(CNPY)
        .map(|t| t.price)
        .filter(|p| *p > 0.0)
        .ok_or_else(|| LaunchpadError::NotFound(format!("{CNPY} price")))?;

    let gross_cnpy = amount * chain.price / cnpy_price;
    Ok(TradeQuote {
        side,
        chain_id: chain.id.clone(),
        ticker: chain.ticker.clone(),
        amount,
        token_price: chain.price,
        cnpy_price,
        gross_cnpy,
        fee_cnpy: gross_cnpy * TRADE_FEE_PCT / 100.0,
    })
}

/// Trade form for one chain. Quotes expire when the countdown runs out.
#[derive(Debug, Clone)]
pub struct TradeForm {
    pub chain_id: String,
    pub side: TradeSide,
    pub amount_input: String,
    quote: Option<TradeQuote>,
    countdown: Countdown,
}

impl TradeForm {
    pub fn new(chain_id: impl Into<String>, quote_secs: u32) -> Self {
        Self {
            chain_id: chain_id.into(),
            side: TradeSide::Buy,
            amount_input: String::new(),
            quote: None,
            countdown: Countdown::new(quote_secs),
        }
    }

    /// Re-price the entered amount and restart the countdown.
    pub fn refresh_quote(&mut self, catalog: &Catalog) -> Result<&TradeQuote, LaunchpadError> {
        let amount: f64 = self.amount_input.trim().parse().map_err(|_| {
            LaunchpadError::InvalidAmount(format!("{:?} is not a number", self.amount_input))
        })?;
        let fresh = quote(catalog, &self.chain_id, self.side, amount)?;
        self.countdown.reset();
        debug!(chain = %self.chain_id, amount, net = fresh.net_cnpy(), "quote refreshed");
        Ok(&*self.quote.insert(fresh))
    }

    /// One-second tick. Returns `true` when the quote just expired.
    pub fn tick(&mut self) -> bool {
        if self.quote.is_none() {
            return false;
        }
        let expired = self.countdown.tick();
        if expired {
            debug!(chain = %self.chain_id, "quote expired");
        }
        expired
    }

    /// The live quote, if it has not expired.
    pub fn quote(&self) -> Option<&TradeQuote> {
        self.quote.as_ref().filter(|_| !self.countdown.is_finished())
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Execute the live buy quote, debiting CNPY after confirmation.
    pub async fn execute_buy(
        &mut self,
        session: &mut WalletSession,
        simulator: &TransactionSimulator,
    ) -> Result<TxReceipt, LaunchpadError> {
        let quote = self
            .quote()
            .filter(|q| q.side == TradeSide::Buy)
            .cloned()
            .ok_or_else(|| LaunchpadError::Validation("quote expired, refresh to continue".into()))?;

        let cost = quote.net_cnpy();
        let available = session.balance(CNPY);
        if cost > available {
            return Err(LaunchpadError::InsufficientFunds {
                symbol: CNPY.into(),
                required: cost,
                available,
            });
        }

        let receipt = simulator
            .submit(TransactionKind::Buy, &quote.ticker, quote.amount)
            .await?;
        session.adjust_balance(CNPY, -cost)?;
        self.quote = None;
        self.amount_input.clear();
        info!(chain = %quote.chain_id, amount = quote.amount, cost, tx = %receipt.hash, "buy executed");
        Ok(receipt)
    }

    /// List chain tokens for sale at a fixed USD price.
    pub fn place_sell_order(
        &self,
        book: &SellOrderBook,
        amount: f64,
        price_usd: f64,
    ) -> anyhow::Result<SellOrder> {
        book.place(&self.chain_id, amount, price_usd)
    }
}
