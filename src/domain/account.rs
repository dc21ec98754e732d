use std::fmt;

use crate::common::{error::AtmError, money::Money};

const MAX_ID_LEN: usize = 64;

/// An account identifier that is safe to use as a filename stem.
///
/// Only ASCII letters, digits, `-` and `_` are accepted, so an id can never
/// name a parent directory, an absolute path or a hidden file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn parse(raw: &str) -> Result<Self, AtmError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(AtmError::InvalidAccountId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted half of an account: PIN (in its stored form) and balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub pin: String,
    pub balance: Money,
}

impl AccountRecord {
    pub fn new(pin: impl Into<String>, balance: Money) -> Self {
        Self {
            pin: pin.into(),
            balance,
        }
    }
}
