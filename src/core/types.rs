//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Simulation frame counter (one frame = `1 / ticks_per_second` seconds)
pub type Tick = u64;

/// Whole in-game seconds
pub type Seconds = u64;

/// Seconds in one in-game day
pub const SECONDS_PER_DAY: Seconds = 86_400;

/// Animal type identifier (a row in the animals table)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalTypeId(pub u32);

/// Unique identifier of an owned animal.
///
/// Issued from a per-player counter that only moves forward, so a uid is
/// never handed out twice within a run, donated animals included.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalUid(pub u32);

/// Progression egg identifier (sequential after table expansion)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EggId(pub u32);

/// Reward (gacha) table identifier
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardId(pub u32);

/// Simulated player / run identifier
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

/// Rarity bands run 1 (common) to 5 (legendary)
pub const RARITY_MIN: u8 = 1;
pub const RARITY_MAX: u8 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_ordering() {
        let a = AnimalUid(1);
        let b = AnimalUid(2);
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_display_forwards_inner() {
        assert_eq!(AnimalTypeId(17).to_string(), "17");
        assert_eq!(RewardId(3).to_string(), "3");
    }

    #[test]
    fn test_ids_deserialize_transparently() {
        #[derive(Deserialize)]
        struct Row {
            animal_id: AnimalTypeId,
            reward_id: RewardId,
        }

        let row: Row = toml::from_str("animal_id = 4\nreward_id = 9").unwrap();
        assert_eq!(row.animal_id, AnimalTypeId(4));
        assert_eq!(row.reward_id, RewardId(9));
    }
}
