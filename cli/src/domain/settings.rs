//! Plugin settings: key names, defaults, and fail-fast validation.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::error::ConfigError;

// ── Keys ─────────────────────────────────────────────────────────────────────

pub mod keys {
    pub const NODE: &str = "NodeConfig";
    pub const CLI: &str = "CliConfig";
    pub const DURATION: &str = "Duration";
    pub const CPU_CORES: &str = "CpuCores";
    pub const RAM_BYTES: &str = "RamBytes";
    pub const GPU_COUNT: &str = "GpuCount";
    pub const STORAGE: &str = "Storage";
    pub const NETWORK_IN: &str = "NetworkIn";
    pub const NETWORK_OUT: &str = "NetworkOut";
    pub const NETWORK_TYPE: &str = "NetworkType";
    pub const PRICE: &str = "Price";
    pub const SUPPLIER: &str = "Supplier";
    pub const CIFS_SHARE: &str = "CifsShare";
    pub const CIFS_USERNAME: &str = "CifsUsername";
    pub const CIFS_PASSWORD: &str = "CifsPassword";
    pub const TIMEOUT: &str = "Timeout";
    pub const IMAGE_NAME: &str = "ImageName";
    pub const COMMAND_TIMEOUT: &str = "CommandTimeout";
}

pub const VALID_SETTING_KEYS: &[&str] = &[
    keys::NODE,
    keys::CLI,
    keys::DURATION,
    keys::CPU_CORES,
    keys::RAM_BYTES,
    keys::GPU_COUNT,
    keys::STORAGE,
    keys::NETWORK_IN,
    keys::NETWORK_OUT,
    keys::NETWORK_TYPE,
    keys::PRICE,
    keys::SUPPLIER,
    keys::CIFS_SHARE,
    keys::CIFS_USERNAME,
    keys::CIFS_PASSWORD,
    keys::TIMEOUT,
    keys::IMAGE_NAME,
    keys::COMMAND_TIMEOUT,
];

/// Settings whose values must never be echoed back.
pub const SECRET_SETTING_KEYS: &[&str] = &[keys::CIFS_PASSWORD];

// ── Defaults ─────────────────────────────────────────────────────────────────

/// Container image the plugin launches and looks for inside deals.
pub const DEFAULT_IMAGE_NAME: &str = "sonm/deadline-worker:latest";
pub const DEFAULT_TASK_TIMEOUT: &str = "600s";
pub const DEFAULT_GPU_COUNT: &str = "MULTIPLE_GPU";
pub const DEFAULT_NETWORK_TYPE: &str = "INCOMING";
/// Slack on top of the task timeout before the process guard fires.
pub const COMMAND_TIMEOUT_MARGIN: Duration = Duration::from_secs(60);

/// Default used when `key` is unset or blank. Keys without one default to `""`.
#[must_use]
pub fn default_for(key: &str) -> &'static str {
    match key {
        keys::GPU_COUNT => DEFAULT_GPU_COUNT,
        keys::NETWORK_TYPE => DEFAULT_NETWORK_TYPE,
        keys::TIMEOUT => DEFAULT_TASK_TIMEOUT,
        keys::IMAGE_NAME => DEFAULT_IMAGE_NAME,
        _ => "",
    }
}

const MASK: &str = "********";

// ── Snapshot ─────────────────────────────────────────────────────────────────

/// Immutable snapshot of the host's key/value configuration.
///
/// Blank values are treated as unset, so `get` falls back to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    #[must_use]
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Look up `key`, falling back to `default` when unset or blank.
    #[must_use]
    pub fn get(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(v) if !v.trim().is_empty() => v.clone(),
            _ => default.to_string(),
        }
    }

    /// Look up a setting that must be non-blank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSetting` when the value is unset or blank.
    pub fn required(&self, key: &'static str, what: &'static str) -> Result<String, ConfigError> {
        let value = self.get(key, "");
        if value.trim().is_empty() {
            return Err(ConfigError::MissingSetting { key, what });
        }
        Ok(value.trim().to_string())
    }

    /// The marketplace node and CLI binary every call needs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSetting` if either is blank.
    pub fn endpoint(&self) -> Result<Endpoint, ConfigError> {
        Ok(Endpoint {
            node: self.required(keys::NODE, "node endpoint information")?,
            cli: self.required(keys::CLI, "path to cli")?,
        })
    }

    /// Bid price for `market create`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSetting` if blank.
    pub fn price(&self) -> Result<String, ConfigError> {
        self.required(keys::PRICE, "price information")
    }

    /// Preferred supplier, or `None` when the bid is open to any supplier.
    #[must_use]
    pub fn supplier(&self) -> Option<String> {
        let supplier = self.get(keys::SUPPLIER, "");
        let supplier = supplier.trim();
        (!supplier.is_empty()).then(|| supplier.to_string())
    }

    #[must_use]
    pub fn image_name(&self) -> String {
        self.get(keys::IMAGE_NAME, DEFAULT_IMAGE_NAME)
    }

    /// Value for the CLI-level `--timeout` flag of `tasks start`.
    #[must_use]
    pub fn task_timeout(&self) -> String {
        self.get(keys::TIMEOUT, DEFAULT_TASK_TIMEOUT)
    }

    /// Process-level guard for a single CLI invocation.
    ///
    /// Unset, it is the task timeout plus `COMMAND_TIMEOUT_MARGIN`, so the
    /// CLI's own `--timeout` always fires first. A task timeout that cannot
    /// be read falls back to `DEFAULT_TASK_TIMEOUT`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the value is not a whole number of seconds.
    pub fn command_timeout(&self) -> Result<Duration, ConfigError> {
        let raw = self.get(keys::COMMAND_TIMEOUT, "");
        if raw.is_empty() {
            let task = parse_duration(&self.task_timeout())
                .or_else(|| parse_duration(DEFAULT_TASK_TIMEOUT))
                .unwrap_or_default();
            return Ok(task + COMMAND_TIMEOUT_MARGIN);
        }
        raw.trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: keys::COMMAND_TIMEOUT.to_string(),
                value: raw.clone(),
            })
    }

    /// Value of `key` as the plugin would use it, defaults applied and
    /// secrets masked.
    #[must_use]
    pub fn effective(&self, key: &str) -> String {
        if key == keys::COMMAND_TIMEOUT {
            if let Ok(guard) = self.command_timeout() {
                return guard.as_secs().to_string();
            }
        }
        let value = self.get(key, default_for(key));
        if SECRET_SETTING_KEYS.contains(&key) && !value.is_empty() {
            return MASK.to_string();
        }
        value
    }
}

/// Parse the marketplace's duration syntax: `<n>h`, `<n>m`, `<n>s`, `<n>ms`,
/// concatenated (`1h30m`). Fractions are not accepted.
fn parse_duration(raw: &str) -> Option<Duration> {
    let mut rest = raw.trim();
    if rest.is_empty() {
        return None;
    }
    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit())?;
        let amount: u64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];
        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "h" => Duration::from_secs(amount.checked_mul(3600)?),
            "m" => Duration::from_secs(amount.checked_mul(60)?),
            "s" => Duration::from_secs(amount),
            "ms" => Duration::from_millis(amount),
            _ => return None,
        };
        total = total.checked_add(part)?;
        rest = &rest[unit_len..];
    }
    Some(total)
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Where and how to reach the marketplace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Node address passed as `--node`.
    pub node: String,
    /// Path to the marketplace CLI binary.
    pub cli: String,
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a setting name against the known keys.
///
/// # Errors
///
/// Returns an error if the key is not recognised.
pub fn validate_setting_key(key: &str) -> Result<(), ConfigError> {
    if !VALID_SETTING_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_SETTING_KEYS.join(", "),
        });
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
