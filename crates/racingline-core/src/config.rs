//! Application configuration management.
//!
//! Holds the data bin URL, the keychain account for the access key, and an
//! optional request timeout. Stored at `~/.config/racingline/config.json`;
//! `RACINGLINE_DATA_URL` overrides the stored URL.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "racingline";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `data_url`
pub const DATA_URL_ENV: &str = "RACINGLINE_DATA_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub data_url: Option<String>,
    pub keyring_account: Option<String>,
    /// Absent means the HTTP client's own defaults apply
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
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

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Data URL from the environment, falling back to the stored value
    pub fn resolve_data_url(&self) -> Result<String> {
        Self::pick_data_url(std::env::var(DATA_URL_ENV).ok(), self.data_url.as_deref())
    }

    fn pick_data_url(env: Option<String>, stored: Option<&str>) -> Result<String> {
        env.filter(|u| !u.is_empty())
            .or_else(|| stored.map(str::to_string))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No data URL configured - set {} or data_url in {}",
                    DATA_URL_ENV,
                    CONFIG_FILE
                )
            })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
