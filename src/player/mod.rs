//! Player state: currencies, animals, progression and activity counters

pub mod animal;
pub mod behavior;
pub mod currency;
pub mod tracker;

use crate::core::config::SimSettings;
use crate::core::types::PlayerId;
use animal::Inventory;
use currency::{Currency, Wallet};
use tracker::Tracker;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub variant: String,
    pub level: u32,
    /// Total experience, never decreases
    pub xp: u64,
    pub wallet: Wallet,
    pub inventory: Inventory,
    /// Optional videos watched in the current limit window
    pub videos_watched: u32,
    pub tracker: Tracker,
}

impl Player {
    pub fn new(id: PlayerId, settings: &SimSettings) -> Self {
        Self {
            id,
            variant: settings.variant_label.clone(),
            level: 1,
            xp: 0,
            wallet: Wallet::new(
                settings.soft_start,
                settings.secondary_start,
                settings.premium_start,
            ),
            inventory: Inventory::new(),
            videos_watched: 0,
            tracker: Tracker::default(),
        }
    }

    pub fn balance(&self, currency: Currency) -> u64 {
        self.wallet.ledger(currency).balance
    }

    pub fn earn(&mut self, currency: Currency, amount: u64) {
        if amount == 0 {
            return;
        }
        self.wallet.ledger_mut(currency).earn(amount);
        self.tracker.record_earn(currency, amount);
    }

    /// Returns false without effect when the balance is short
    pub fn spend(&mut self, currency: Currency, amount: u64) -> bool {
        if !self.wallet.ledger_mut(currency).spend(amount) {
            return false;
        }
        self.tracker.record_spend(currency, amount);
        true
    }

    /// Sets where every animal of the set has been collected
    pub fn completed_sets(&self, set_size: impl Fn(u32) -> Option<usize>) -> Vec<u32> {
        self.inventory
            .set_counts()
            .into_iter()
            .filter(|&(set_id, count)| set_size(set_id).is_some_and(|size| count >= size))
            .map(|(set_id, _)| set_id)
            .collect()
    }
}
