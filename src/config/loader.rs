//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EnginePolicy, ScheduleConfig};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// exposes the resulting [`EngineConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/studio/
/// ├── engine.yaml     # Policies, flagship discipline, rates
/// └── schedule.yaml   # Non-prime (studio, time) slots
/// ```
///
/// # Example
///
/// ```no_run
/// use studio_pay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/studio").unwrap();
/// println!("Flagship: {}", loader.config().flagship_discipline_id());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g. "./config/studio")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("engine.yaml");
        let policy = Self::load_yaml::<EnginePolicy>(&policy_path)?;

        let schedule_path = path.join("schedule.yaml");
        let schedule = Self::load_yaml::<ScheduleConfig>(&schedule_path)?;

        Ok(Self {
            config: EngineConfig::new(policy, schedule.non_prime_slots),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
