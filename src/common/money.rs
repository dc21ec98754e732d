use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::error::ValidationError;

/// A whole-unit currency amount (rupees). Balances and transaction amounts
/// never go negative, so the inner value is unsigned.
///
/// # Examples
/// ```
/// use atm_ledger::common::money::Money;
///
/// let amount: Money = "5000".parse().unwrap();
/// assert_eq!(amount.as_u64(), 5000);
/// assert_eq!(amount.to_string(), "5000");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Money(0)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `false` for a zero `unit`, unlike `u64::is_multiple_of`.
    pub fn is_multiple_of(&self, unit: u64) -> bool {
        unit != 0 && self.0.is_multiple_of(unit)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }
}

impl std::str::FromStr for Money {
    type Err = ValidationError;

    /// Parses user-entered text as a whole amount. Negative input is reported
    /// as `NotPositive` rather than malformed so the user sees the real rule.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let value: i64 = t
            .parse()
            .map_err(|_| ValidationError::MalformedAmount(t.to_string()))?;
        if value < 0 {
            return Err(ValidationError::NotPositive);
        }
        Ok(Money(value.unsigned_abs()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
