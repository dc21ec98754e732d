use std::fmt;

use chrono::{DateTime, Local};

use crate::common::money::Money;

/// Timestamp layout used in ledger lines, e.g. `2025-03-01 14:05:09.123456`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deposit,
    Withdraw,
}

impl Action {
    /// The label written into the ledger (`Deposit` / `Withdraw`).
    pub fn label(&self) -> &'static str {
        match self {
            Action::Deposit => "Deposit",
            Action::Withdraw => "Withdraw",
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            Action::Deposit => "deposit",
            Action::Withdraw => "withdrawal",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One executed operation. `Display` renders the exact ledger line, without
/// the trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    pub timestamp: DateTime<Local>,
    pub action: Action,
    pub amount: Money,
    pub resulting_balance: Money,
}

impl TransactionEntry {
    pub fn new(action: Action, amount: Money, resulting_balance: Money) -> Self {
        Self::at(Local::now(), action, amount, resulting_balance)
    }

    pub fn at(
        timestamp: DateTime<Local>,
        action: Action,
        amount: Money,
        resulting_balance: Money,
    ) -> Self {
        Self {
            timestamp,
            action,
            amount,
            resulting_balance,
        }
    }
}

impl fmt::Display for TransactionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}: Rs.{} | Balance: Rs.{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.action,
            self.amount,
            self.resulting_balance
        )
    }
}
