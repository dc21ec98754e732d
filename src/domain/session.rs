use crate::{
    common::money::Money,
    domain::account::{AccountId, AccountRecord},
};

/// In-memory state of an authenticated account, held between login and exit.
///
/// Only [`Processor::authenticate`](crate::worker::processor::Processor::authenticate)
/// creates one and [`Processor::exit`](crate::worker::processor::Processor::exit)
/// consumes it, so holding a `Session` means being logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: AccountId,
    /// PIN in its stored form (plain or hashed, per the store's scheme).
    pin: String,
    balance: Money,
}

impl Session {
    pub(crate) fn new(id: AccountId, record: AccountRecord) -> Self {
        Self {
            id,
            pin: record.pin,
            balance: record.balance,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub(crate) fn pin(&self) -> &str {
        &self.pin
    }

    pub(crate) fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
    }

    pub(crate) fn set_pin(&mut self, pin: String) {
        self.pin = pin;
    }

    /// Snapshot of what must be written back to the account store.
    pub fn record(&self) -> AccountRecord {
        AccountRecord::new(self.pin.clone(), self.balance)
    }
}

/// Result of a balance inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceInquiry {
    pub balance: Money,
    /// `min(balance, withdrawal cap)`; display only.
    pub available_to_withdraw: Money,
}
