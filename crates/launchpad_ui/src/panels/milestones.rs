use launchpad_data::Milestone;

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

/// Display icons a milestone can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MilestoneIcon {
    Rocket,
    Users,
    TrendingUp,
    GraduationCap,
    BarChart,
    Trophy,
    Coins,
    /// Shown for keys the table does not know.
    Flag,
}

impl MilestoneIcon {
    /// Look up an icon key. Unknown or missing keys map to [`MilestoneIcon::Flag`].
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(|k| k.trim().to_ascii_lowercase()).as_deref() {
            Some("rocket") => Self::Rocket,
            Some("users") => Self::Users,
            Some("trending-up") => Self::TrendingUp,
            Some("graduation-cap") => Self::GraduationCap,
            Some("bar-chart") => Self::BarChart,
            Some("trophy") => Self::Trophy,
            Some("coins") => Self::Coins,
            _ => Self::Flag,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Rocket => "rocket",
            Self::Users => "users",
            Self::TrendingUp => "trending-up",
            Self::GraduationCap => "graduation-cap",
            Self::BarChart => "bar-chart",
            Self::Trophy => "trophy",
            Self::Coins => "coins",
            Self::Flag => "flag",
        }
    }
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// A milestone with its display icon and resolved completion state.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMilestone {
    pub milestone: Milestone,
    pub icon: MilestoneIcon,
    pub completed: bool,
}

impl EnrichedMilestone {
    pub fn new(milestone: Milestone) -> Self {
        let icon = MilestoneIcon::from_key(milestone.icon.as_deref());
        let completed = milestone
            .completed
            .unwrap_or(milestone.current >= milestone.requirement);
        Self {
            milestone,
            icon,
            completed,
        }
    }

    /// Progress toward the requirement, `0.0..=100.0`. Completed milestones
    /// always read 100.
    pub fn progress_pct(&self) -> f64 {
        if self.completed {
            return 100.0;
        }
        let m = &self.milestone;
        if m.requirement <= 0.0 {
            return 0.0;
        }
        (m.current / m.requirement * 100.0).clamp(0.0, 100.0)
    }
}

impl AsRef<Milestone> for EnrichedMilestone {
    fn as_ref(&self) -> &Milestone {
        &self.milestone
    }
}

/// Attach icons and completion state. Order is preserved, and enriching
/// already-enriched records yields the same result.
pub fn enrich<I>(milestones: I) -> Vec<EnrichedMilestone>
where
    I: IntoIterator,
    I::Item: AsRef<Milestone>,
{
    milestones
        .into_iter()
        .map(|m| EnrichedMilestone::new(m.as_ref().clone()))
        .collect()
}

pub fn completed_count(milestones: &[EnrichedMilestone]) -> usize {
    milestones.iter().filter(|m| m.completed).count()
}
