use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTier {
    pub threshold: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl RewardTier {
    pub fn new(threshold: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            threshold,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Tiers shown on the dashboard when nothing is configured.
pub fn default_tiers() -> Vec<RewardTier> {
    vec![
        RewardTier::new(1, "10% discount", "On your first subscription"),
        RewardTier::new(5, "Exclusive masterclass", "Private session with the founders"),
        RewardTier::new(10, "One month free", "Full access at no cost"),
    ]
}

/// First tier whose threshold is above `count`, i.e. the next reward still to unlock.
///
/// `tiers` must be sorted by ascending threshold.
pub fn next_tier(tiers: &[RewardTier], count: i64) -> Option<&RewardTier> {
    tiers.iter().find(|t| t.threshold > count)
}

pub fn unlocked_count(tiers: &[RewardTier], count: i64) -> usize {
    tiers.iter().filter(|t| t.threshold <= count).count()
}

/// Thresholds must be positive and strictly increasing.
pub fn validate_tiers(tiers: &[RewardTier]) -> Result<(), String> {
    let mut previous = 0;
    for tier in tiers {
        if tier.threshold <= previous {
            return Err(format!(
                "reward tier thresholds must be positive and strictly increasing (got {} after {previous})",
                tier.threshold
            ));
        }
        if tier.title.trim().is_empty() {
            return Err(format!("reward tier {} has an empty title", tier.threshold));
        }
        previous = tier.threshold;
    }
    Ok(())
}
