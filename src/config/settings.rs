use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use super::defaults;

/// Top-level configuration for the Honeytrap simulation daemon.
/// Deserializes from a TOML configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "defaults::default_api_config")]
    pub api: ApiConfig,

    #[serde(default = "defaults::default_honeypot_config")]
    pub honeypot: HoneypotConfig,

    #[serde(default = "defaults::default_simulation_config")]
    pub simulation: SimulationConfig,

    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: defaults::default_api_config(),
            honeypot: defaults::default_honeypot_config(),
            simulation: defaults::default_simulation_config(),
            logging: defaults::default_logging_config(),
        }
    }
}

/// Console API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "defaults::default_api_bind")]
    pub bind: String,

    #[serde(default = "defaults::default_api_key")]
    pub api_key: String,
}

/// Identity of the emulated honeypot instance.
#[derive(Debug, Clone, Deserialize)]
pub struct HoneypotConfig {
    #[serde(default = "defaults::default_honeypot_name")]
    pub name: String,

    #[serde(default = "defaults::default_template")]
    pub template: String,

    #[serde(default = "defaults::default_honeypot_port")]
    pub port: u16,

    #[serde(default = "defaults::default_honeypot_log_level")]
    pub log_level: String,
}

/// Tuning for the synthetic feeds. Intervals are the periods of the
/// independent replay loops; capacities bound the in-memory display lists.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "defaults::default_initial_attacks")]
    pub initial_attacks: usize,

    #[serde(default = "defaults::default_activity_interval_secs")]
    pub activity_interval_secs: u64,

    #[serde(default = "defaults::default_login_interval_secs")]
    pub login_interval_secs: u64,

    #[serde(default = "defaults::default_attack_min_interval_secs")]
    pub attack_min_interval_secs: u64,

    #[serde(default = "defaults::default_attack_max_interval_secs")]
    pub attack_max_interval_secs: u64,

    #[serde(default = "defaults::default_feed_capacity")]
    pub feed_capacity: usize,

    #[serde(default = "defaults::default_log_capacity")]
    pub log_capacity: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    pub level: String,

    #[serde(default = "defaults::default_log_file")]
    pub file: String,
}
