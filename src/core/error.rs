use thiserror::Error;

use crate::core::types::{AnimalTypeId, RewardId};

/// Errors raised while loading or validating economy tables and settings.
///
/// All of these are fatal: a table that is out of order or references a
/// missing row produces plausible but wrong telemetry, so loading stops.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Table `{table}` is empty")]
    EmptyTable { table: &'static str },

    #[error("Table `{table}` is not sorted ascending by `{column}` (row {row})")]
    Unsorted {
        table: &'static str,
        column: &'static str,
        row: usize,
    },

    #[error("Table `{table}` row {row}: unknown {what} {id}")]
    MissingReference {
        table: &'static str,
        row: usize,
        what: &'static str,
        id: u32,
    },

    #[error("Table `{table}` has duplicate {what} {id}")]
    Duplicate {
        table: &'static str,
        what: &'static str,
        id: u32,
    },

    #[error("Table `{table}` row {row}: {reason}")]
    InvalidValue {
        table: &'static str,
        row: usize,
        reason: String,
    },

    #[error("Invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a single simulation run
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Empty draw pool for reward table {reward} at player level {level}")]
    EmptyDrawPool { reward: RewardId, level: u32 },

    #[error("Unknown reward table: {0}")]
    UnknownReward(RewardId),

    #[error("Unknown animal type: {0}")]
    UnknownAnimal(AnimalTypeId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
