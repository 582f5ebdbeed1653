//! Configuration loading and management for the instructor payment engine.
//!
//! This module provides functionality to load engine configuration from
//! YAML files: policy settings (flagship discipline, retention, penalty
//! allowance, bonus and recalculation policies) and the non-prime schedule.
//!
//! # Example
//!
//! ```no_run
//! use studio_pay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/studio").unwrap();
//! println!("Retention rate: {}", config.config().retention_rate());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BonusPolicy, EngineConfig, EnginePolicy, NonPrimeSlot, RecalcPolicy, ScheduleConfig};
