//! Player behavior flags
//!
//! Behavior is fixed for the lifetime of a run. Variants differ only in the
//! values chosen here, which is what makes A/B comparisons between variants
//! meaningful.

use serde::{Deserialize, Serialize};

use crate::core::rng::SimRng;

/// Which eligible candy a player feeds to the target animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedCandyChoice {
    /// Always the highest candy level on the board
    #[default]
    Highest,
    /// Always the lowest candy level that still qualifies
    Lowest,
    /// Uniform pick among the qualifying levels
    Random,
}

/// Tie-break when several feed actions are pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrder {
    Shuffle,
    /// Sort by (animal level, rarity), highest first
    #[default]
    LevelRarityDesc,
    /// Sort by (rarity, animal level), highest first
    RarityLevelDesc,
    LevelRarityAsc,
    RarityLevelAsc,
}

/// When to swap a benched animal into a habitat socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapPolicy {
    Never,
    /// Replace the weakest active animal with the strongest benched one
    /// whenever the benched level is strictly higher
    #[default]
    Upgrade,
    /// Historical rule: replace the highest-level active animal with the
    /// lowest-level benched one when the benched level is lower. Kept so
    /// older datasets can be reproduced.
    Legacy,
}

/// Whether the player watches optional reward videos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoChoice {
    #[default]
    Never,
    Always,
    Random,
}

impl VideoChoice {
    pub fn decide(self, rng: &mut SimRng) -> bool {
        match self {
            VideoChoice::Never => false,
            VideoChoice::Always => true,
            VideoChoice::Random => rng.boolean(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Behavior {
    pub feed_candy: FeedCandyChoice,
    pub feed_order: FeedOrder,
    pub swap: SwapPolicy,
    pub video: VideoChoice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_from_toml() {
        let behavior: Behavior = toml::from_str(
            r#"
            feed_candy = "random"
            feed_order = "rarity_level_asc"
            swap = "legacy"
            "#,
        )
        .unwrap();

        assert_eq!(behavior.feed_candy, FeedCandyChoice::Random);
        assert_eq!(behavior.feed_order, FeedOrder::RarityLevelAsc);
        assert_eq!(behavior.swap, SwapPolicy::Legacy);
        // Missing keys fall back to defaults
        assert_eq!(behavior.video, VideoChoice::Never);
    }

    #[test]
    fn test_video_choice_fixed_modes_ignore_rng() {
        let mut rng = SimRng::seed_from_u64(0);
        for _ in 0..10 {
            assert!(VideoChoice::Always.decide(&mut rng));
            assert!(!VideoChoice::Never.decide(&mut rng));
        }
    }
}
