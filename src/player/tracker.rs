//! Per-interval activity counters, cleared after every snapshot

use serde::{Deserialize, Serialize};

use crate::core::types::{AnimalTypeId, AnimalUid, EggId, RewardId};
use crate::player::currency::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub animal: AnimalUid,
    pub candy_level: u32,
}

/// A reward draw granted by an egg, or by a level-up when `egg` is `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRecord {
    pub egg: Option<EggId>,
    pub reward: RewardId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub wheel: usize,
    pub animal: AnimalTypeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    pub out: AnimalUid,
    pub into: AnimalUid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    pub actions: u32,
    pub animals_earned: u32,
    pub animal_ids: Vec<AnimalTypeId>,
    pub candies_bought: Vec<u32>,
    /// Level of each candy produced by a merge
    pub candies_merged: Vec<u32>,
    pub feeds: Vec<FeedRecord>,
    pub rewards: Vec<RewardRecord>,
    pub level_ups: u32,
    pub free_crates: u32,
    pub spins: Vec<SpinRecord>,
    pub swaps: Vec<SwapRecord>,
    pub donations: u32,
    pub videos_watched: u32,

    pub cash_earned: u64,
    pub cash_spent: u64,
    pub treats_earned: u64,
    pub treats_spent: u64,
    pub gems_earned: u64,
    pub gems_spent: u64,
}

impl Tracker {
    pub fn record_earn(&mut self, currency: Currency, amount: u64) {
        let slot = match currency {
            Currency::Cash => &mut self.cash_earned,
            Currency::Treats => &mut self.treats_earned,
            Currency::Gems => &mut self.gems_earned,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn record_spend(&mut self, currency: Currency, amount: u64) {
        let slot = match currency {
            Currency::Cash => &mut self.cash_spent,
            Currency::Treats => &mut self.treats_spent,
            Currency::Gems => &mut self.gems_spent,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = Tracker::default();
        tracker.actions = 4;
        tracker.candies_bought.push(2);
        tracker.record_earn(Currency::Cash, 50);
        tracker.record_spend(Currency::Treats, 5);

        assert_eq!(tracker.cash_earned, 50);
        assert_eq!(tracker.treats_spent, 5);

        tracker.reset();
        assert_eq!(tracker, Tracker::default());
    }
}
