use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{model::ProbeTarget, provider::ProviderId};

/// Environment variable that supplies (and overrides) the Meteostat API key.
pub const METEOSTAT_API_KEY_ENV: &str = "METEOSTAT_API_KEY";

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default provider id, "meteostat" when absent.
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.meteostat]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Locations to probe. Empty means the built-in set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ProbeTarget>,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        match self.default_provider.as_deref() {
            Some(s) => ProviderId::try_from(s),
            None => Ok(ProviderId::Meteostat),
        }
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    ///
    /// Returns exactly what is stored; see [`Config::with_env_overrides`].
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Runtime view of the config: `METEOSTAT_API_KEY` wins over the file.
    /// The result is for probing only and must not be saved.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env_api_key(std::env::var(METEOSTAT_API_KEY_ENV).ok());
        self
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-probe", "weather-probe")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a provider API key and optionally set default provider.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    /// Overlay a key taken from the environment. Blank values are ignored.
    pub fn apply_env_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.providers
                .insert(ProviderId::Meteostat.as_str().to_string(), ProviderConfig { api_key: key });
        }
    }

    /// Locations for a feasibility run.
    pub fn targets(&self) -> Vec<ProbeTarget> {
        if self.locations.is_empty() {
            default_targets()
        } else {
            self.locations.clone()
        }
    }
}

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid built-in date"),
    }
}

/// Tropical island, Siberian winter and Middle-Eastern summer.
pub fn default_targets() -> Vec<ProbeTarget> {
    const BUILTIN: [(&str, f64, f64, NaiveDate, NaiveDate); 3] = [
        ("Koh Phangan", 9.7387, 100.0603, ymd(2022, 3, 10), ymd(2022, 3, 20)),
        ("Novosibirsk", 55.05, 82.95, ymd(2020, 2, 1), ymd(2020, 2, 10)),
        ("Baghdad", 33.31528, 44.36611, ymd(2020, 8, 1), ymd(2020, 8, 10)),
    ];

    BUILTIN
        .iter()
        .map(|&(name, latitude, longitude, start, end)| ProbeTarget {
            name: name.to_string(),
            latitude,
            longitude,
            start,
            end,
        })
        .collect()
}
