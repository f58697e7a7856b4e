//! Run settings with documented constants
//!
//! Settings describe one variant: the player's behavior, starting balances,
//! session habits and the feature knobs layered on top of the economy
//! tables. Everything has a default so a settings file only needs to list
//! what a variant changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::types::{AnimalTypeId, RewardId, Seconds, RARITY_MAX, RARITY_MIN};
use crate::player::behavior::Behavior;
use crate::session::profile::SessionProfile;

/// A fortune wheel the player can spin with treats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSettings {
    /// Completed animal sets required before this wheel is offered
    pub unlock_completed_sets: usize,
    /// Treat cost per spin
    pub cost: u64,
    /// Reward table the spin draws from
    pub reward_id: RewardId,
    /// Rarity band the player must still have something to find in
    pub rarity_min: u8,
    pub rarity_max: u8,
}

/// Settings for one simulated variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    // === CLOCK ===
    /// Simulation frames per in-game second
    ///
    /// Income, clocks and session counters advance once per whole second;
    /// the remaining frames only drain the action cooldown. At 4 a player
    /// can act at most four times a second.
    pub ticks_per_second: u32,

    /// Seconds between periodic snapshots (session boundaries always emit)
    pub snapshot_interval_secs: u64,

    /// Label copied into every snapshot
    pub variant_label: String,

    // === PLAYER ===
    pub behavior: Behavior,

    /// Bounds on the think time drawn for every queued action (seconds)
    ///
    /// The draw is a normal centred between the bounds. A player with
    /// 0.5..3.0 averages one action every ~1.75s once the queue is busy.
    pub reaction_time_min: f64,
    pub reaction_time_max: f64,

    pub session: SessionProfile,

    /// One of these is picked uniformly as the first animal
    pub starting_animals: Vec<AnimalTypeId>,

    /// Opening balances
    pub soft_start: u64,
    pub secondary_start: u64,
    pub premium_start: u64,

    // === ECONOMY KNOBS ===
    /// Owned (non-donated) animals allowed before a forced donation
    pub animal_inventory_cap: usize,

    /// Candies merge only at levels strictly below this
    pub candy_level_max: u32,

    /// Longest offline stretch that still earns passive income (seconds)
    pub offline_regen_cap_secs: Seconds,

    /// Free crate respawn bounds (seconds)
    pub rtp_time_min: Seconds,
    pub rtp_time_max: Seconds,

    /// Optional reward videos per reset window
    pub video_limit: u32,
    pub video_limit_reset_secs: Seconds,

    /// Fortune wheels, ascending by `unlock_completed_sets`
    pub wheels: Vec<WheelSettings>,

    /// In-app seconds before an empty queue ends a session early
    pub stuck_session_grace_secs: Seconds,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            ticks_per_second: 4,
            snapshot_interval_secs: 60,
            variant_label: "baseline".to_string(),

            behavior: Behavior::default(),
            reaction_time_min: 0.5,
            reaction_time_max: 3.0,
            session: SessionProfile::default(),
            starting_animals: vec![AnimalTypeId(1)],
            soft_start: 100,
            secondary_start: 0,
            premium_start: 0,

            animal_inventory_cap: 20,
            candy_level_max: 10,
            // Two hours of idle income
            offline_regen_cap_secs: 7_200,
            rtp_time_min: 300,
            rtp_time_max: 900,
            video_limit: 10,
            video_limit_reset_secs: 86_400,
            wheels: Vec::new(),
            stuck_session_grace_secs: 60,
        }
    }
}

impl SimSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: SimSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Frames per snapshot interval
    pub fn snapshot_every(&self) -> u64 {
        self.snapshot_interval_secs * u64::from(self.ticks_per_second)
    }

    /// Validate settings for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_second == 0 {
            return Err(invalid("ticks_per_second", "must be at least 1"));
        }

        if self.snapshot_interval_secs == 0 {
            return Err(invalid("snapshot_interval_secs", "must be at least 1"));
        }

        if !(self.reaction_time_min >= 0.0 && self.reaction_time_min <= self.reaction_time_max) {
            return Err(invalid(
                "reaction_time_min",
                format!(
                    "({}) should be >= 0 and <= reaction_time_max ({})",
                    self.reaction_time_min, self.reaction_time_max
                ),
            ));
        }

        if !(self.session.sessions_per_day > 0.0) {
            return Err(invalid("session.sessions_per_day", "must be positive"));
        }

        if self.starting_animals.is_empty() {
            return Err(invalid("starting_animals", "at least one animal is required"));
        }

        if self.animal_inventory_cap == 0 {
            return Err(invalid("animal_inventory_cap", "must be at least 1"));
        }

        if self.rtp_time_min > self.rtp_time_max {
            return Err(invalid(
                "rtp_time_min",
                format!(
                    "({}) should be <= rtp_time_max ({})",
                    self.rtp_time_min, self.rtp_time_max
                ),
            ));
        }

        for (i, wheel) in self.wheels.iter().enumerate() {
            let band = RARITY_MIN..=RARITY_MAX;
            if !band.contains(&wheel.rarity_min)
                || !band.contains(&wheel.rarity_max)
                || wheel.rarity_min > wheel.rarity_max
            {
                return Err(invalid(
                    "wheels",
                    format!(
                        "wheel {} rarity band {}..={} outside {}..={}",
                        i, wheel.rarity_min, wheel.rarity_max, RARITY_MIN, RARITY_MAX
                    ),
                ));
            }
        }

        // The spin check picks the last unlocked wheel
        if self
            .wheels
            .windows(2)
            .any(|w| w[0].unlock_completed_sets > w[1].unlock_completed_sets)
        {
            return Err(invalid(
                "wheels",
                "must be sorted ascending by unlock_completed_sets",
            ));
        }

        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidSetting {
        name,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        assert!(SimSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = SimSettings::from_toml_str(
            r#"
            variant_label = "fast_feeders"
            ticks_per_second = 2

            [behavior]
            feed_candy = "lowest"
            "#,
        )
        .unwrap();

        assert_eq!(settings.variant_label, "fast_feeders");
        assert_eq!(settings.ticks_per_second, 2);
        assert_eq!(settings.snapshot_interval_secs, 60);
        assert_eq!(settings.snapshot_every(), 120);
    }

    #[test]
    fn test_reaction_bounds_rejected() {
        let settings = SimSettings {
            reaction_time_min: 4.0,
            reaction_time_max: 1.0,
            ..SimSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "reaction_time_min",
                ..
            }
        ));
    }

    #[test]
    fn test_unsorted_wheels_rejected() {
        let wheel = |unlock| WheelSettings {
            unlock_completed_sets: unlock,
            cost: 10,
            reward_id: RewardId(1),
            rarity_min: 1,
            rarity_max: 3,
        };
        let settings = SimSettings {
            wheels: vec![wheel(2), wheel(0)],
            ..SimSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_wheel_rarity_band_checked() {
        let settings = SimSettings {
            wheels: vec![WheelSettings {
                unlock_completed_sets: 0,
                cost: 10,
                reward_id: RewardId(1),
                rarity_min: 4,
                rarity_max: 6,
            }],
            ..SimSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_fps_rejected() {
        let settings = SimSettings {
            ticks_per_second: 0,
            ..SimSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
