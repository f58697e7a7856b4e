//! Load economy tables from TOML files

use std::fs;
use std::path::Path;

use crate::core::error::ConfigError;
use crate::economy::tables::EconomyTables;
use crate::economy::EconomyConfig;

/// Parse and validate an economy from TOML text
pub fn parse_economy(content: &str) -> Result<EconomyConfig, ConfigError> {
    let tables: EconomyTables = toml::from_str(content)?;
    EconomyConfig::from_tables(tables)
}

/// Load and validate an economy file
pub fn load_economy(path: &Path) -> Result<EconomyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let economy = parse_economy(&content)?;
    tracing::debug!(path = %path.display(), "Loaded economy tables");
    Ok(economy)
}
