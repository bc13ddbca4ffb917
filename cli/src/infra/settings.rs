//! Infrastructure implementation of the `SettingsSource` port.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::application::ports::SettingsSource;
use crate::domain::settings::{Settings, VALID_SETTING_KEYS};

/// Environment variable naming an explicit settings file.
pub const SETTINGS_PATH_ENV: &str = "SONM_CLOUD_CONFIG";

/// Prefix for per-key overrides, e.g. `SONM_CLOUD_NODECONFIG`.
pub const SETTINGS_ENV_PREFIX: &str = "SONM_CLOUD_";

/// Settings backed by a flat YAML mapping on disk, with per-key overrides.
///
/// A missing file is an empty store, so every key takes its default.
#[derive(Debug, Clone)]
pub struct YamlSettingsStore {
    path: PathBuf,
    overrides: BTreeMap<String, String>,
}

impl YamlSettingsStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            overrides: BTreeMap::new(),
        }
    }

    /// Values that win over whatever the file says.
    #[must_use]
    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve the file location (`explicit`, then `SONM_CLOUD_CONFIG`, then
    /// `~/.sonm-cloud/config.yaml`) and pick up `SONM_CLOUD_<KEY>` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if no explicit path is given and the home directory
    /// cannot be determined.
    pub fn from_environment(explicit: Option<PathBuf>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => default_path()?,
        };
        Ok(Self::new(path).with_overrides(env_overrides()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        parse_settings(&content).with_context(|| format!("cannot parse {}", self.path.display()))
    }
}

impl SettingsSource for YamlSettingsStore {
    fn load(&self) -> Result<Settings> {
        let mut values = self.read_file()?;
        for key in values.keys() {
            if !VALID_SETTING_KEYS.contains(&key.as_str()) {
                warn!(key = %key, path = %self.path.display(), "ignoring unknown setting");
            }
        }
        values.extend(self.overrides.clone());
        Ok(Settings::new(values))
    }
}

/// `$SONM_CLOUD_CONFIG`, or `~/.sonm-cloud/config.yaml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_path() -> Result<PathBuf> {
    if let Ok(val) = std::env::var(SETTINGS_PATH_ENV) {
        return Ok(PathBuf::from(val));
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(".sonm-cloud").join("config.yaml"))
}

fn env_overrides() -> BTreeMap<String, String> {
    VALID_SETTING_KEYS
        .iter()
        .filter_map(|key| {
            let var = format!("{SETTINGS_ENV_PREFIX}{}", key.to_ascii_uppercase());
            std::env::var(var).ok().map(|v| ((*key).to_string(), v))
        })
        .collect()
}

/// Parse a flat YAML mapping whose values are scalars.
///
/// Values keep their source text, so `0xfeed` or `0.50` are not re-rendered
/// as numbers.
fn parse_settings(content: &str) -> Result<BTreeMap<String, String>> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let shape: BTreeMap<String, serde_yaml::Value> =
        serde_yaml::from_str(content).context("settings must be a mapping of names to values")?;
    if let Some((key, _)) = shape
        .iter()
        .find(|(_, value)| value.is_mapping() || value.is_sequence())
    {
        anyhow::bail!("setting {key} must be a single value");
    }
    let raw: BTreeMap<String, Option<String>> =
        serde_yaml::from_str(content).context("settings must be a mapping of names to values")?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}
