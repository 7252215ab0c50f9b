use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use launchpad_core::{CNPY, LaunchpadConfig, LaunchpadError};
use launchpad_data::TransactionKind;
use launchpad_wallet::{GithubIdentity, TransactionSimulator, WalletSession, simulate_github_login};

static TICKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3,5}$").expect("ticker pattern is valid"));

/// Allowed range for the target block time, in seconds.
pub const BLOCK_TIME_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

/// Largest share of supply the creator may keep.
pub const MAX_CREATOR_ALLOCATION_PCT: f64 = 50.0;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Which step of the wizard the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectLanguage,
    ConnectRepository,
    ChainDetails,
    Tokenomics,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::SelectLanguage,
        Self::ConnectRepository,
        Self::ChainDetails,
        Self::Tokenomics,
        Self::Review,
    ];

    /// Zero-based index for the stepper.
    pub fn index(self) -> usize {
        match self {
            Self::SelectLanguage => 0,
            Self::ConnectRepository => 1,
            Self::ChainDetails => 2,
            Self::Tokenomics => 3,
            Self::Review => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SelectLanguage => "Language",
            Self::ConnectRepository => "Repository",
            Self::ChainDetails => "Chain Details",
            Self::Tokenomics => "Tokenomics",
            Self::Review => "Review & Launch",
        }
    }

    /// Path segment under `/launchpad/`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::SelectLanguage => "language",
            Self::ConnectRepository => "repository",
            Self::ChainDetails => "details",
            Self::Tokenomics => "tokenomics",
            Self::Review => "review",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

/// Languages a chain template is offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Go,
    Rust,
    TypeScript,
    Python,
}

impl Language {
    pub const ALL: [Language; 4] = [Self::Go, Self::Rust, Self::TypeScript, Self::Python];

    pub fn name(self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
        }
    }

    /// Starter template the repository is expected to be forked from.
    pub fn template(self) -> &'static str {
        match self {
            Self::Go => "canopy-go-template",
            Self::Rust => "canopy-rust-template",
            Self::TypeScript => "canopy-ts-template",
            Self::Python => "canopy-py-template",
        }
    }
}

/// Current launch status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStatus {
    NotStarted,
    Launching,
    Launched { chain_id: String, tx_hash: String },
    Failed(String),
}

/// All data needed to drive the chain launch wizard.
#[derive(Debug, Clone)]
pub struct LaunchWizardData {
    pub current_step: WizardStep,
    pub language: Option<Language>,
    pub github: Option<GithubIdentity>,
    pub repository_url: String,
    pub chain_name: String,
    pub ticker: String,
    pub description: String,
    pub block_time_secs: u32,
    pub total_supply: String,
    pub creator_allocation_pct: f64,
    pub launch_fee: f64,
    pub wallet_balance: Option<f64>,
    pub status: LaunchStatus,
}

impl LaunchWizardData {
    /// Fresh wizard on step 1 charging `launch_fee` CNPY.
    pub fn new(launch_fee: f64) -> Self {
        Self {
            current_step: WizardStep::SelectLanguage,
            language: None,
            github: None,
            repository_url: String::new(),
            chain_name: String::new(),
            ticker: String::new(),
            description: String::new(),
            block_time_secs: 10,
            total_supply: String::new(),
            creator_allocation_pct: 10.0,
            launch_fee,
            wallet_balance: None,
            status: LaunchStatus::NotStarted,
        }
    }

    pub fn from_config(config: &LaunchpadConfig) -> Self {
        Self::new(config.launch_fee_cnpy)
    }

    /// Advance to the next step if the current one validates.
    /// Returns `true` if the step actually changed.
    pub fn advance_step(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        if let Some(next) = self.current_step.next() {
            self.current_step = next;
            return true;
        }
        false
    }

    /// Go back one step. Never validates.
    pub fn go_back(&mut self) -> bool {
        if let Some(prev) = self.current_step.prev() {
            self.current_step = prev;
            return true;
        }
        false
    }

    /// Whether the current step's fields are valid. The review step is
    /// left by launching, not by advancing.
    pub fn can_advance(&self) -> bool {
        self.current_step != WizardStep::Review && self.validate_step(self.current_step).is_ok()
    }

    /// Check the fields owned by `step`.
    pub fn validate_step(&self, step: WizardStep) -> Result<(), LaunchpadError> {
        match step {
            WizardStep::SelectLanguage => {
                if self.language.is_none() {
                    return Err(LaunchpadError::Validation("pick a language".into()));
                }
            }
            WizardStep::ConnectRepository => {
                if self.github.is_none() {
                    return Err(LaunchpadError::Validation("connect GitHub first".into()));
                }
                if !validate_url(self.repository_url.trim()) {
                    return Err(LaunchpadError::Validation(format!(
                        "repository URL must be http(s): {:?}",
                        self.repository_url
                    )));
                }
            }
            WizardStep::ChainDetails => {
                if self.chain_name.trim().is_empty() {
                    return Err(LaunchpadError::Validation("chain name is required".into()));
                }
                if !validate_ticker(&self.ticker) {
                    return Err(LaunchpadError::Validation(format!(
                        "ticker must be 3-5 uppercase letters, got {:?}",
                        self.ticker
                    )));
                }
                if !BLOCK_TIME_RANGE.contains(&self.block_time_secs) {
                    return Err(LaunchpadError::Validation(format!(
                        "block time must be between 1 and 60 seconds, got {}",
                        self.block_time_secs
                    )));
                }
            }
            WizardStep::Tokenomics => {
                self.parsed_supply()?;
                if !(0.0..=MAX_CREATOR_ALLOCATION_PCT).contains(&self.creator_allocation_pct) {
                    return Err(LaunchpadError::Validation(format!(
                        "creator allocation must be 0-{MAX_CREATOR_ALLOCATION_PCT}%"
                    )));
                }
            }
            WizardStep::Review => {
                for step in &WizardStep::ALL[..WizardStep::Review.index()] {
                    self.validate_step(*step)?;
                }
            }
        }
        Ok(())
    }

    /// Total supply as entered, accepting `_` and `,` separators.
    pub fn parsed_supply(&self) -> Result<u64, LaunchpadError> {
        let cleaned: String = self
            .total_supply
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != ',')
            .collect();
        match cleaned.parse::<u64>() {
            Ok(supply) if supply > 0 => Ok(supply),
            _ => Err(LaunchpadError::Validation(format!(
                "total supply must be a positive whole number, got {:?}",
                self.total_supply
            ))),
        }
    }

    /// Chain id the launched chain will be listed under.
    pub fn chain_id(&self) -> String {
        slugify(&self.chain_name)
    }

    /// Reset the wizard back to step 1 with all fields cleared.
    pub fn reset(&mut self) {
        *self = Self::new(self.launch_fee);
    }

    /// Whether the last known balance covers the launch fee.
    pub fn has_sufficient_funds(&self) -> bool {
        self.wallet_balance
            .is_some_and(|balance| balance >= self.launch_fee)
    }

    /// Simulated GitHub OAuth. On failure the previous identity is kept.
    pub async fn connect_github(
        &mut self,
        username: &str,
        delay: Duration,
    ) -> Result<GithubIdentity, LaunchpadError> {
        let identity = simulate_github_login(username, delay).await?;
        self.github = Some(identity.clone());
        Ok(identity)
    }

    /// Submit the launch and charge the fee once the transaction confirms.
    /// Returns the new chain id. Validation and balance failures leave the
    /// wallet untouched.
    pub async fn launch(
        &mut self,
        session: &mut WalletSession,
        simulator: &TransactionSimulator,
    ) -> Result<String, LaunchpadError> {
        if self.current_step != WizardStep::Review {
            return Err(LaunchpadError::Validation(
                "finish every step before launching".into(),
            ));
        }
        self.validate_step(WizardStep::Review)?;

        let available = session.balance(CNPY);
        self.wallet_balance = Some(available);
        if !self.has_sufficient_funds() {
            let err = LaunchpadError::InsufficientFunds {
                symbol: CNPY.into(),
                required: self.launch_fee,
                available,
            };
            warn!(required = self.launch_fee, available, "launch rejected");
            self.status = LaunchStatus::Failed(err.user_message());
            return Err(err);
        }

        self.status = LaunchStatus::Launching;
        let receipt = match simulator
            .submit(TransactionKind::Launch, CNPY, self.launch_fee)
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                self.status = LaunchStatus::Failed(e.user_message());
                return Err(e);
            }
        };

        let remaining = session.adjust_balance(CNPY, -self.launch_fee)?;
        self.wallet_balance = Some(remaining);

        let chain_id = self.chain_id();
        info!(
            chain = %chain_id,
            ticker = %self.ticker,
            language = self.language.map(Language::name).unwrap_or("-"),
            tx = %receipt.hash,
            "chain launched"
        );
        self.status = LaunchStatus::Launched {
            chain_id: chain_id.clone(),
            tx_hash: receipt.hash,
        };
        Ok(chain_id)
    }
}

impl Default for LaunchWizardData {
    fn default() -> Self {
        Self::from_config(&LaunchpadConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Accepts http(s) URLs with a host.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}

pub fn validate_ticker(ticker: &str) -> bool {
    TICKER_RE.is_match(ticker)
}

/// Lower-case, ASCII alphanumerics joined by single hyphens.
fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
