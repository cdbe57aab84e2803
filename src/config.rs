//! Application configuration management.
//!
//! Configuration is stored at `~/.config/pitchcache/config.json` and can be
//! overridden per-run through the environment (a `.env` file is honored by
//! the binary): `FOOTBALL_API_KEY`, `GEMINI_API_KEY`, `GEMINI_MODEL`.
//!
//! The config also selects the cache freshness policy. Exactly one policy is
//! active per deployment; switching policies does not require a cache wipe
//! because entries carry their insertion timestamp either way.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::cache::manager::{DEFAULT_CUTOFF_HOUR, DEFAULT_MAX_AGE_HOURS};
use crate::cache::Freshness;
use crate::narrative::DEFAULT_MODEL;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "pitchcache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Credential for the football data API (`x-apisports-key`).
    pub football_api_key: Option<String>,
    /// Credential for the generative-text API; reports degrade when unset.
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    /// `"max-age"` (default) or `"daily-cutoff"`.
    pub freshness_policy: Option<String>,
    pub cache_max_age_hours: Option<i64>,
    pub daily_cutoff_hour: Option<u32>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("FOOTBALL_API_KEY") {
            self.football_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.gemini_model = Some(model);
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn gemini_model(&self) -> String {
        self.gemini_model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// The configured freshness policy for upstream data.
    pub fn freshness(&self) -> Freshness {
        match self.freshness_policy.as_deref() {
            Some("daily-cutoff") => {
                Freshness::daily_cutoff(self.daily_cutoff_hour.unwrap_or(DEFAULT_CUTOFF_HOUR))
            }
            _ => Freshness::max_age_hours(
                self.cache_max_age_hours.unwrap_or(DEFAULT_MAX_AGE_HOURS),
            ),
        }
    }
}
