//! Runtime settings loaded from an optional TOML file.
//!
//! Every field has a default matching the stock ATM, so a missing file, an
//! empty file or a file with only some sections all yield a working setup:
//!
//! ```toml
//! [storage]
//! accounts_dir = "users"
//! ledger_dir = "transactions"
//! pin_scheme = "plain"
//!
//! [defaults]
//! pin = "5678"
//! balance = 250000
//!
//! [limits]
//! withdraw_max = 25000
//! deposit_max = 90000
//! amount_multiple = 5
//! min_pin_len = 4
//! available_cap = 25000
//!
//! [logging]
//! level = "warn"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    common::{error::ConfigError, money::Money},
    domain::{pin::PinScheme, transaction::Action},
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtmConfig {
    pub storage: StorageConfig,
    pub defaults: AccountDefaults,
    pub limits: Limits,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub accounts_dir: PathBuf,
    pub ledger_dir: PathBuf,
    pub pin_scheme: PinScheme,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            accounts_dir: PathBuf::from("users"),
            ledger_dir: PathBuf::from("transactions"),
            pin_scheme: PinScheme::Plain,
        }
    }
}

/// Values written into a record the first time an unknown id is loaded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountDefaults {
    pub pin: String,
    pub balance: Money,
}

impl Default for AccountDefaults {
    fn default() -> Self {
        Self {
            pin: "5678".to_string(),
            balance: Money::new(250_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Per-transaction withdrawal cap.
    pub withdraw_max: Money,
    /// Per-transaction deposit cap.
    pub deposit_max: Money,
    pub amount_multiple: u64,
    pub min_pin_len: usize,
    /// Ceiling on the "available to withdraw" figure shown by balance inquiry.
    pub available_cap: Money,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            withdraw_max: Money::new(25_000),
            deposit_max: Money::new(90_000),
            amount_multiple: 5,
            min_pin_len: 4,
            available_cap: Money::new(25_000),
        }
    }
}

impl Limits {
    pub fn cap_for(&self, action: Action) -> Money {
        match action {
            Action::Deposit => self.deposit_max,
            Action::Withdraw => self.withdraw_max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AtmConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AtmConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AtmConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the config as TOML, refusing to replace an existing file unless
    /// `overwrite` is set.
    pub fn write_to(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() && !overwrite {
            return Err(ConfigError::Invalid(format!(
                "{} already exists",
                path.display()
            )));
        }
        std::fs::write(path, self.to_toml()?).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        if limits.amount_multiple == 0 {
            return Err(ConfigError::Invalid(
                "limits.amount_multiple must be > 0".into(),
            ));
        }
        if limits.withdraw_max.is_zero() || limits.deposit_max.is_zero() {
            return Err(ConfigError::Invalid(
                "per-transaction caps must be > 0".into(),
            ));
        }
        if self.defaults.pin.chars().count() < limits.min_pin_len {
            return Err(ConfigError::Invalid(format!(
                "defaults.pin is shorter than limits.min_pin_len ({})",
                limits.min_pin_len
            )));
        }
        if self.defaults.pin.contains(['\n', '\r']) {
            return Err(ConfigError::Invalid(
                "defaults.pin must be a single line".into(),
            ));
        }
        Ok(())
    }
}
