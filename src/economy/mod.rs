//! Economy configuration
//!
//! Immutable lookup tables for one economy, validated once at load. All
//! threshold tables are checked to be ascending so level scans can use
//! binary search, and every cross-table reference is resolved up front.
//! Lookups return `Option` and never panic on ids or levels outside the
//! table coverage.

pub mod loader;
pub mod tables;

use ahash::{AHashMap, AHashSet};

use crate::core::config::SimSettings;
use crate::core::error::ConfigError;
use crate::core::types::{AnimalTypeId, EggId, RewardId, RARITY_MAX, RARITY_MIN};
use tables::{
    AnimalRow, CandyRow, CurrencyLabelRow, EconomyTables, PlayerLevelRow, RewardRow, RtpRow,
};

pub use loader::{load_economy, parse_economy};

/// One progression egg after expanding the egg table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Egg {
    pub id: EggId,
    pub player_level: u32,
    pub goal: u64,
    pub reward_id: RewardId,
}

#[derive(Debug, Clone)]
pub struct EconomyConfig {
    /// Ascending by `level_unlocked`
    animals: Vec<AnimalRow>,
    animal_index: AHashMap<AnimalTypeId, usize>,
    set_sizes: AHashMap<u32, usize>,
    /// Indexed by `candy_level - 1`
    candies: Vec<CandyRow>,
    /// Indexed by player level (entry 0 unused)
    socket_caps: Vec<usize>,
    slot_caps: Vec<usize>,
    currency_labels: Vec<CurrencyLabelRow>,
    /// Indexed by `egg_id - 1`
    eggs: Vec<Egg>,
    rewards: AHashMap<RewardId, RewardRow>,
    /// Indexed by `player_level - 1`
    player_levels: Vec<PlayerLevelRow>,
    /// Ascending by `player_level`
    rtp: Vec<RtpRow>,
}

impl EconomyConfig {
    /// Validate raw tables and build lookup indices
    pub fn from_tables(tables: EconomyTables) -> Result<Self, ConfigError> {
        let EconomyTables {
            animals,
            sockets,
            candies,
            candy_slots,
            currency_labels,
            eggs,
            rewards,
            player_levels,
            rtp,
            shop,
        } = tables;

        require_rows("animals", animals.len())?;
        require_rows("sockets", sockets.len())?;
        require_rows("candies", candies.len())?;
        require_rows("candy_slots", candy_slots.len())?;
        require_rows("rewards", rewards.len())?;
        require_rows("player_levels", player_levels.len())?;

        // --- animals
        require_ascending("animals", "level_unlocked", animals.iter().map(|a| a.level_unlocked))?;
        let mut animal_index = AHashMap::with_capacity(animals.len());
        let mut set_sizes: AHashMap<u32, usize> = AHashMap::new();
        for (row, animal) in animals.iter().enumerate() {
            if !(RARITY_MIN..=RARITY_MAX).contains(&animal.rarity) {
                return Err(ConfigError::InvalidValue {
                    table: "animals",
                    row,
                    reason: format!("rarity {} outside {}..={}", animal.rarity, RARITY_MIN, RARITY_MAX),
                });
            }
            if animal_index.insert(animal.animal_id, row).is_some() {
                return Err(ConfigError::Duplicate {
                    table: "animals",
                    what: "animal_id",
                    id: animal.animal_id.0,
                });
            }
            *set_sizes.entry(animal.set_id).or_default() += 1;
        }

        // --- candies: levels 1..=n with no gaps
        for (row, candy) in candies.iter().enumerate() {
            if candy.candy_level as usize != row + 1 {
                return Err(ConfigError::Unsorted {
                    table: "candies",
                    column: "candy_level",
                    row,
                });
            }
        }

        // --- player levels: 1..=n with no gaps, non-decreasing xp
        for (row, level) in player_levels.iter().enumerate() {
            if level.player_level as usize != row + 1 {
                return Err(ConfigError::Unsorted {
                    table: "player_levels",
                    column: "player_level",
                    row,
                });
            }
        }
        require_ascending(
            "player_levels",
            "xp_req_total",
            player_levels.iter().map(|l| l.xp_req_total),
        )?;

        // --- rewards
        let mut reward_index = AHashMap::with_capacity(rewards.len());
        for reward in rewards {
            let id = reward.reward_id;
            if reward_index.insert(id, reward).is_some() {
                return Err(ConfigError::Duplicate {
                    table: "rewards",
                    what: "reward_id",
                    id: id.0,
                });
            }
        }
        let require_reward = |table: &'static str, row: usize, id: RewardId| {
            if reward_index.contains_key(&id) {
                Ok(())
            } else {
                Err(ConfigError::MissingReference {
                    table,
                    row,
                    what: "reward_id",
                    id: id.0,
                })
            }
        };

        for (row, level) in player_levels.iter().enumerate() {
            for candy_level in [level.candy_level_min, level.candy_level_max] {
                if candy_level == 0 || candy_level as usize > candies.len() {
                    return Err(ConfigError::MissingReference {
                        table: "player_levels",
                        row,
                        what: "candy_level",
                        id: candy_level,
                    });
                }
            }
            if level.candy_level_min > level.candy_level_max {
                return Err(ConfigError::InvalidValue {
                    table: "player_levels",
                    row,
                    reason: format!(
                        "candy_level_min {} above candy_level_max {}",
                        level.candy_level_min, level.candy_level_max
                    ),
                });
            }
            if let Some(id) = level.lur_reward_id {
                require_reward("player_levels", row, id)?;
            }
        }

        // --- sockets and candy slots become per-level capacity arrays
        require_ascending("sockets", "unlock_level", sockets.iter().map(|s| s.unlock_level))?;
        require_ascending("sockets", "socket_id", sockets.iter().map(|s| s.socket_id))?;
        require_ascending(
            "candy_slots",
            "unlock_level",
            candy_slots.iter().map(|s| s.unlock_level),
        )?;

        let max_level = player_levels.len();
        let mut socket_caps = vec![0; max_level + 1];
        let mut slot_caps = vec![0; max_level + 1];
        for level in 1..=max_level {
            let level_u32 = level as u32;
            let unlocked = sockets.partition_point(|s| s.unlock_level <= level_u32);
            socket_caps[level] = unlocked
                .checked_sub(1)
                .map_or(0, |i| sockets[i].socket_id as usize);

            let unlocked = candy_slots.partition_point(|s| s.unlock_level <= level_u32);
            slot_caps[level] = unlocked
                .checked_sub(1)
                .map_or(0, |i| candy_slots[i].candy_slots as usize);
        }

        // --- currency labels
        require_ascending(
            "currency_labels",
            "curr_number",
            currency_labels.iter().map(|c| c.curr_number),
        )?;

        // --- eggs expand into one entry per counted egg
        require_ascending("eggs", "player_level", eggs.iter().map(|e| e.player_level))?;
        let mut expanded = Vec::new();
        for (row, egg) in eggs.iter().enumerate() {
            require_reward("eggs", row, egg.reward_id)?;
            for _ in 0..egg.egg_count {
                expanded.push(Egg {
                    id: EggId(expanded.len() as u32 + 1),
                    player_level: egg.player_level,
                    goal: egg.goal,
                    reward_id: egg.reward_id,
                });
            }
        }

        // --- rtp
        require_ascending("rtp", "player_level", rtp.iter().map(|r| r.player_level))?;
        for (row, crate_row) in rtp.iter().enumerate() {
            match crate_row.reward_id {
                Some(id) => require_reward("rtp", row, id)?,
                None if crate_row.rtp_target_animals > 0 => {
                    return Err(ConfigError::InvalidValue {
                        table: "rtp",
                        row,
                        reason: "rtp_target_animals needs a reward_id".to_string(),
                    });
                }
                None => {}
            }
        }

        // --- shop: checked for consistency, nothing in a run buys from it
        let mut offers = AHashSet::with_capacity(shop.len());
        for offer in &shop {
            if !offers.insert((offer.shop_id, offer.currency)) {
                return Err(ConfigError::Duplicate {
                    table: "shop",
                    what: "shop_id",
                    id: offer.shop_id,
                });
            }
        }

        Ok(Self {
            animals,
            animal_index,
            set_sizes,
            candies,
            socket_caps,
            slot_caps,
            currency_labels,
            eggs: expanded,
            rewards: reward_index,
            player_levels,
            rtp,
        })
    }

    /// Check the references a settings file makes into this economy
    pub fn check_settings(&self, settings: &SimSettings) -> Result<(), ConfigError> {
        for &animal in &settings.starting_animals {
            if self.animal(animal).is_none() {
                return Err(ConfigError::InvalidSetting {
                    name: "starting_animals",
                    reason: format!("unknown animal {}", animal),
                });
            }
        }

        for wheel in &settings.wheels {
            if self.reward_table(wheel.reward_id).is_none() {
                return Err(ConfigError::InvalidSetting {
                    name: "wheels",
                    reason: format!("unknown reward table {}", wheel.reward_id),
                });
            }
        }

        if settings.candy_level_max as usize > self.candies.len() {
            return Err(ConfigError::InvalidSetting {
                name: "candy_level_max",
                reason: format!(
                    "{} exceeds the highest candy level {}",
                    settings.candy_level_max,
                    self.candies.len()
                ),
            });
        }

        Ok(())
    }

    // === ANIMALS ===

    pub fn animal(&self, type_id: AnimalTypeId) -> Option<&AnimalRow> {
        self.animal_index.get(&type_id).map(|&i| &self.animals[i])
    }

    pub fn animal_set(&self, type_id: AnimalTypeId) -> Option<u32> {
        self.animal(type_id).map(|a| a.set_id)
    }

    /// Animals whose unlock level is at or below `level`
    pub fn unlocked_animals(&self, level: u32) -> &[AnimalRow] {
        let end = self.animals.partition_point(|a| a.level_unlocked <= level);
        &self.animals[..end]
    }

    /// Number of distinct animals in a set
    pub fn set_size(&self, set_id: u32) -> Option<usize> {
        self.set_sizes.get(&set_id).copied()
    }

    // === CAPACITIES ===

    pub fn socket_capacity(&self, level: u32) -> Option<usize> {
        self.socket_caps.get(level as usize).copied().filter(|_| level > 0)
    }

    pub fn slot_capacity(&self, level: u32) -> Option<usize> {
        self.slot_caps.get(level as usize).copied().filter(|_| level > 0)
    }

    // === CANDIES ===

    pub fn candy(&self, candy_level: u32) -> Option<&CandyRow> {
        (candy_level as usize)
            .checked_sub(1)
            .and_then(|i| self.candies.get(i))
    }

    pub fn max_candy_level(&self) -> u32 {
        self.candies.len() as u32
    }

    // === EGGS ===

    pub fn egg(&self, egg_id: EggId) -> Option<&Egg> {
        (egg_id.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.eggs.get(i))
    }

    /// Eggs open up once the player reaches the first egg row's level
    pub fn eggs_unlocked(&self, level: u32) -> bool {
        self.eggs.first().is_some_and(|e| e.player_level <= level)
    }

    /// First egg of the highest egg band at or below `level`
    pub fn first_egg_for_level(&self, level: u32) -> Option<EggId> {
        let end = self.eggs.partition_point(|e| e.player_level <= level);
        let band = self.eggs.get(end.checked_sub(1)?)?.player_level;
        let start = self.eggs.partition_point(|e| e.player_level < band);
        self.eggs.get(start).map(|e| e.id)
    }

    pub fn reward_table(&self, reward_id: RewardId) -> Option<&RewardRow> {
        self.rewards.get(&reward_id)
    }

    // === PLAYER LEVELS ===

    pub fn player_level(&self, level: u32) -> Option<&PlayerLevelRow> {
        (level as usize)
            .checked_sub(1)
            .and_then(|i| self.player_levels.get(i))
    }

    pub fn max_player_level(&self) -> u32 {
        self.player_levels.len() as u32
    }

    /// Level reached with `xp` total experience, clamped to the table
    pub fn level_for_xp(&self, xp: u64) -> u32 {
        let passed = self.player_levels.partition_point(|l| l.xp_req_total <= xp) as u32;
        (passed + 1).min(self.max_player_level())
    }

    // === FREE CRATES ===

    /// Free crate contents at `level`
    pub fn rtp(&self, level: u32) -> Option<&RtpRow> {
        let end = self.rtp.partition_point(|r| r.player_level <= level);
        self.rtp.get(end.checked_sub(1)?)
    }

    /// Short display form of a currency amount, e.g. `12.35K`
    pub fn format_amount(&self, value: u64) -> String {
        let label = self
            .currency_labels
            .iter()
            .rev()
            .filter(|l| l.curr_number > 0)
            .find(|l| 1000u64.checked_pow(l.curr_number).is_some_and(|unit| value >= unit));

        match label {
            Some(label) => {
                let unit = 1000f64.powi(label.curr_number as i32);
                format!("{:.2}{}", value as f64 / unit, label.curr_letters)
            }
            None => value.to_string(),
        }
    }
}

fn require_rows(table: &'static str, len: usize) -> Result<(), ConfigError> {
    if len == 0 {
        Err(ConfigError::EmptyTable { table })
    } else {
        Ok(())
    }
}

fn require_ascending<T: PartialOrd>(
    table: &'static str,
    column: &'static str,
    values: impl Iterator<Item = T>,
) -> Result<(), ConfigError> {
    let mut prev: Option<T> = None;
    for (row, value) in values.enumerate() {
        if prev.as_ref().is_some_and(|p| value < *p) {
            return Err(ConfigError::Unsorted { table, column, row });
        }
        prev = Some(value);
    }
    Ok(())
}
