use serde::{Deserialize, Serialize};

/// A gamified achievement tied to a chain's growth metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub chain_id: String,
    pub name: String,
    pub description: String,
    /// Icon key, resolved to a display icon by the UI.
    #[serde(default)]
    pub icon: Option<String>,
    pub requirement: f64,
    pub current: f64,
    /// Explicit completion flag; when absent it is derived from progress.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl AsRef<Milestone> for Milestone {
    fn as_ref(&self) -> &Milestone {
        self
    }
}
