use std::fmt;

use crate::panels::launch_wizard::WizardStep;

/// Every navigable screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Launch(WizardStep),
    Chain { chain_id: String },
    Transaction { chain_id: String, hash: String },
    Block { chain_id: String, height: u64 },
    Wallet,
    Trade,
}

impl Route {
    /// Parse a path such as `/chains/photosync/blocks/1044`. Trailing slashes
    /// are ignored; anything unrecognised is `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["launchpad"] => Some(Self::Launch(WizardStep::SelectLanguage)),
            ["launchpad", step] => WizardStep::from_slug(step).map(Self::Launch),
            ["chains", id] => Some(Self::Chain {
                chain_id: (*id).to_string(),
            }),
            ["chains", id, "transactions", hash] => Some(Self::Transaction {
                chain_id: (*id).to_string(),
                hash: (*hash).to_string(),
            }),
            ["chains", id, "blocks", height] => height.parse().ok().map(|height| Self::Block {
                chain_id: (*id).to_string(),
                height,
            }),
            ["wallet"] => Some(Self::Wallet),
            ["trade"] => Some(Self::Trade),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Launch(step) => format!("/launchpad/{}", step.slug()),
            Self::Chain { chain_id } => format!("/chains/{chain_id}"),
            Self::Transaction { chain_id, hash } => {
                format!("/chains/{chain_id}/transactions/{hash}")
            }
            Self::Block { chain_id, height } => format!("/chains/{chain_id}/blocks/{height}"),
            Self::Wallet => "/wallet".into(),
            Self::Trade => "/trade".into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
