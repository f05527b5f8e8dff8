//! Configuration file support for PetGrow.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/petgrow/config.toml`.
//! Every section is optional; anything left out keeps the tuned defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub rules: Rules,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Cadence of the live session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_save_interval_secs")]
    pub save_interval_secs: u64,

    /// Time away above which a one-shot offline report is raised
    #[serde(default = "default_offline_report_threshold_secs")]
    pub offline_report_threshold_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            save_interval_secs: default_save_interval_secs(),
            offline_report_threshold_secs: default_offline_report_threshold_secs(),
        }
    }
}

/// Tunable simulation constants
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Rules {
    #[serde(default)]
    pub decay: DecayRates,

    #[serde(default)]
    pub rewards: Rewards,

    #[serde(default)]
    pub offline: OfflineRules,
}

/// Per-second rates used by the live tick
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecayRates {
    pub hunger: f64,
    pub hygiene: f64,
    pub energy: f64,
    pub happiness: f64,
    /// Health regained per second while thriving
    pub health_recovery: f64,
    /// Health lost per second while a need is critical
    pub health_damage: f64,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            hunger: 0.05,
            hygiene: 0.03,
            energy: 0.02,
            happiness: 0.04,
            health_recovery: 0.1,
            health_damage: 0.2,
        }
    }
}

/// Coin and care-score payouts
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rewards {
    /// Coins per second at full happiness
    pub coin_base: f64,
    /// Flat coins for petting
    pub pet_coins: f64,
    /// Care score gained per care action
    pub care_action: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            coin_base: 0.5,
            pet_coins: 1.0,
            care_action: 0.5,
        }
    }
}

/// Dampening applied while the player is away
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OfflineRules {
    /// Upper bound on the seconds of absence that are simulated
    pub max_away_secs: f64,
    /// Multiplier on the live decay rates
    pub decay_factor: f64,
    /// Multiplier on the live health damage/recovery rates
    pub health_factor: f64,
    /// Multiplier on the coin rate
    pub coin_factor: f64,
    /// Coin rate multiplier for an unhappy pet
    pub unhappy_coin_factor: f64,
    /// Happiness below this earns the unhappy rate
    pub unhappy_below: f64,
}

impl Default for OfflineRules {
    fn default() -> Self {
        Self {
            max_away_secs: 86_400.0,
            decay_factor: 0.5,
            health_factor: 0.1,
            coin_factor: 0.1,
            unhappy_coin_factor: 0.5,
            unhappy_below: 40.0,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|_| PathBuf::from("."))
    });
    base.join("petgrow")
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_save_interval_secs() -> u64 {
    5
}

fn default_offline_report_threshold_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        base.join("petgrow").join("config.toml")
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let d = &self.rules.decay;
        let rates = [
            ("decay.hunger", d.hunger),
            ("decay.hygiene", d.hygiene),
            ("decay.energy", d.energy),
            ("decay.happiness", d.happiness),
            ("decay.health_recovery", d.health_recovery),
            ("decay.health_damage", d.health_damage),
            ("rewards.coin_base", self.rules.rewards.coin_base),
            ("rewards.pet_coins", self.rules.rewards.pet_coins),
            ("rewards.care_action", self.rules.rewards.care_action),
            ("offline.max_away_secs", self.rules.offline.max_away_secs),
            ("offline.decay_factor", self.rules.offline.decay_factor),
            ("offline.health_factor", self.rules.offline.health_factor),
            ("offline.coin_factor", self.rules.offline.coin_factor),
            ("offline.unhappy_coin_factor", self.rules.offline.unhappy_coin_factor),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "rules.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.session.tick_interval_ms == 0 {
            return Err(Error::Config(
                "session.tick_interval_ms must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
