//! Configuration management for EZ Eatin'
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{EzEatinError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where shopping lists are persisted
    #[serde(default)]
    pub storage: StorageConfig,
    /// Defaults applied to items added without explicit fields
    #[serde(default)]
    pub items: ItemDefaults,
    /// Output formatting
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Persistence backend selection
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Embedded sled database directory
    #[default]
    Sled,
    /// Single-file SQLite database
    Sqlite,
    /// Nothing survives the process
    Memory,
}

impl StorageBackend {
    fn default_file_name(self) -> &'static str {
        match self {
            Self::Sled => "shopping-lists.sled",
            Self::Sqlite => "shopping-lists.db",
            Self::Memory => "",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = EzEatinError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sled" => Ok(Self::Sled),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(EzEatinError::Config(format!(
                "Invalid storage backend: {}. Must be one of: sled, sqlite, memory",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database location; defaults to the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured path, or a file under the user's data directory
    pub fn resolved_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "ezeatin", "ezeatin").ok_or_else(|| {
            EzEatinError::Storage("Could not determine data directory".to_string())
        })?;
        Ok(proj_dirs
            .data_dir()
            .join(self.backend.default_file_name()))
    }
}

/// Defaults for `items add` when a field is not given
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefaults {
    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default = "default_store")]
    pub store: String,

    #[serde(default = "default_category")]
    pub category: String,
}

fn default_unit() -> String {
    "pcs".to_string()
}

fn default_store() -> String {
    "Other".to_string()
}

fn default_category() -> String {
    "other".to_string()
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            store: default_store(),
            category: default_category(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Prefix for prices
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Show items grouped under their store
    #[serde(default = "default_group_by_store")]
    pub group_by_store: bool,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_group_by_store() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            group_by_store: default_group_by_store(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EzEatinError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| EzEatinError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(backend) = std::env::var("EZEATIN_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(value) => {
                    self.storage.backend = value;
                    tracing::debug!(backend = %backend, "Env override: EZEATIN_STORAGE_BACKEND");
                }
                Err(_) => {
                    tracing::warn!("Invalid EZEATIN_STORAGE_BACKEND: {}", backend);
                }
            }
        }

        if let Ok(db_path) = std::env::var("EZEATIN_DB") {
            tracing::debug!(db_path = %db_path, "Env override: EZEATIN_DB");
            self.storage.path = Some(PathBuf::from(db_path));
        }

        if let Ok(symbol) = std::env::var("EZEATIN_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(backend) = cli.backend {
            self.storage.backend = backend;
        }

        if let Some(db_path) = &cli.db_path {
            self.storage.path = Some(db_path.clone());
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `EzEatinError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.display.currency_symbol.is_empty() {
            return Err(EzEatinError::Config(
                "display.currency_symbol cannot be empty".to_string(),
            )
            .into());
        }

        for (field, value) in [
            ("items.unit", &self.items.unit),
            ("items.store", &self.items.store),
            ("items.category", &self.items.category),
        ] {
            if value.trim().is_empty() {
                return Err(EzEatinError::Config(format!("{} cannot be empty", field)).into());
            }
        }

        if let Some(path) = &self.storage.path {
            if self.storage.backend != StorageBackend::Memory && path.as_os_str().is_empty() {
                return Err(
                    EzEatinError::Config("storage.path cannot be empty".to_string()).into(),
                );
            }
        }

        Ok(())
    }
}
