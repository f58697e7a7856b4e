//! Raw economy table rows as they appear in the economy file

use serde::{Deserialize, Serialize};

use crate::core::types::{AnimalTypeId, RewardId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRow {
    pub animal_id: AnimalTypeId,
    pub name: String,
    #[serde(default)]
    pub family: String,
    pub set_id: u32,
    #[serde(default)]
    pub set_name: String,
    pub rarity: u8,
    /// Player level at which the animal enters reward pools
    pub level_unlocked: u32,
    /// Cash per second while socketed
    pub revenue: u64,
    /// Treats granted when the animal is earned
    pub treats_earned: u64,
}

/// Habitat socket `socket_id` opens at `unlock_level`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketRow {
    pub socket_id: u32,
    pub unlock_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandyRow {
    pub candy_level: u32,
    /// Cash price, also the egg progress earned when fed
    pub candy_cost: u64,
    pub xp_earned: u64,
}

/// Board size becomes `candy_slots` from `unlock_level` on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandySlotRow {
    pub candy_slot_id: u32,
    pub candy_slots: u32,
    pub unlock_level: u32,
}

/// Display label for amounts of `1000^curr_number` and up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyLabelRow {
    pub curr_number: u32,
    pub curr_name: String,
    pub curr_letters: String,
}

/// `egg_count` consecutive eggs, each needing `goal` progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggRow {
    pub player_level: u32,
    pub egg_count: u32,
    pub goal: u64,
    pub reward_id: RewardId,
}

/// Reward table with one gate per rarity band (index 0 = rarity 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRow {
    pub reward_id: RewardId,
    #[serde(default)]
    pub name: String,
    pub rarity: [u32; 5],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLevelRow {
    pub player_level: u32,
    pub xp_req_next: u64,
    /// Total xp needed to leave this level
    pub xp_req_total: u64,
    /// Candy levels the player may buy at this level
    pub candy_level_min: u32,
    pub candy_level_max: u32,
    /// Cash granted on leaving this level
    pub lur_soft: u64,
    /// Optional reward draw granted on leaving this level
    #[serde(default, alias = "lur_egg_id")]
    pub lur_reward_id: Option<RewardId>,
}

/// Free crate contents from `player_level` on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtpRow {
    pub player_level: u32,
    #[serde(default)]
    pub rtp_target_animals: u32,
    /// Cash
    #[serde(default)]
    pub rtp_target_revenue: u64,
    /// Gems
    #[serde(default)]
    pub rtp_target_stars: u64,
    #[serde(default)]
    pub reward_id: Option<RewardId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopCurrency {
    Gems,
    #[serde(rename = "IAP")]
    Iap,
    #[serde(rename = "OW")]
    Offerwall,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRow {
    pub shop_id: u32,
    pub currency: ShopCurrency,
    /// Cash delivered by the offer
    pub soft_amount: u64,
    /// Price in `currency` units
    pub cost: f64,
}

/// Every table of an economy file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyTables {
    pub animals: Vec<AnimalRow>,
    pub sockets: Vec<SocketRow>,
    pub candies: Vec<CandyRow>,
    pub candy_slots: Vec<CandySlotRow>,
    #[serde(default)]
    pub currency_labels: Vec<CurrencyLabelRow>,
    #[serde(default)]
    pub eggs: Vec<EggRow>,
    pub rewards: Vec<RewardRow>,
    pub player_levels: Vec<PlayerLevelRow>,
    #[serde(default)]
    pub rtp: Vec<RtpRow>,
    #[serde(default)]
    pub shop: Vec<ShopRow>,
}
