//! File configuration
//!
//! A TOML file with three optional tables. Missing tables and keys fall back
//! to their defaults; command-line flags are merged over the result by the
//! binary.
//!
//! ```toml
//! [policy]
//! max_dimension = 100
//! max_label_len = 50
//!
//! [storage]
//! db_path = ".aeromatrix/fleet.db"
//!
//! [logging]
//! profile = "production"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{FleetError, Result};
use crate::logging_facility::Profile;
use crate::policy::FleetPolicy;

pub const DEFAULT_DB_PATH: &str = ".aeromatrix/fleet.db";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    pub policy: FleetPolicy,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub profile: Profile,
}

impl FleetConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// `Serialization` for malformed TOML, unknown tables, or a policy with
    /// non-positive limits.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: FleetConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`FleetConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| FleetError::Io {
            message: format!("failed to read config file {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` if given, otherwise use defaults
    ///
    /// # Errors
    /// As [`FleetConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    fn validate(&self) -> Result<()> {
        if self.policy.max_dimension <= 0 || self.policy.max_label_len == 0 {
            return Err(FleetError::Serialization {
                message: "policy limits must be positive".to_string(),
            });
        }
        Ok(())
    }
}
