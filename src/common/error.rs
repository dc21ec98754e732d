use std::path::PathBuf;

use crate::{common::money::Money, domain::transaction::Action};

#[derive(thiserror::Error, Debug)]
pub enum AtmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("incorrect PIN for account {id}")]
    Authentication { id: String },
    #[error("invalid account id {0:?}: use 1-64 letters, digits, '-' or '_'")]
    InvalidAccountId(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal i/o error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl AtmError {
    /// Recoverable errors leave the session usable; the front end reports them
    /// and returns to the menu.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AtmError::Validation(_)
                | AtmError::Authentication { .. }
                | AtmError::InvalidAccountId(_)
        )
    }
}

/// Rejections raised before any state is touched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please enter a valid amount (got {0:?})")]
    MalformedAmount(String),
    #[error("amount must be positive")]
    NotPositive,
    #[error("amount must be in multiples of {0}")]
    NotMultiple(u64),
    #[error("maximum {noun} is Rs.{cap} per transaction", noun = .action.noun())]
    ExceedsCap { action: Action, cap: Money },
    #[error("insufficient funds: requested Rs.{requested}, balance Rs.{balance}")]
    InsufficientFunds { requested: Money, balance: Money },
    #[error("balance would overflow")]
    BalanceOverflow,
    #[error("incorrect current PIN")]
    PinMismatch,
    #[error("PIN must be at least {0} digits")]
    PinTooShort(usize),
    #[error("PIN must be a single line")]
    PinNotSingleLine,
    #[error("PINs do not match")]
    ConfirmationMismatch,
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: corrupt account record: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| StorageError::Io { path, source }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}
