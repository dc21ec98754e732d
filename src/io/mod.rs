//! File-backed storage. Each call opens, uses and closes its own handle; no
//! locking is done, so the last writer to a record wins.

pub mod accounts;
pub mod ledger;

use crate::common::{
    config::{AccountDefaults, StorageConfig},
    error::StorageError,
};

use self::{accounts::AccountStore, ledger::LedgerStore};

/// The two stores every operation touches.
#[derive(Debug, Clone)]
pub struct Stores {
    pub accounts: AccountStore,
    pub ledger: LedgerStore,
}

impl Stores {
    /// Opens both stores, creating their directories up front.
    pub fn open(
        storage: &StorageConfig,
        defaults: &AccountDefaults,
    ) -> Result<Self, StorageError> {
        let accounts =
            AccountStore::open(&storage.accounts_dir, defaults.clone(), storage.pin_scheme)?;
        Ok(Self {
            accounts,
            ledger: LedgerStore::open(&storage.ledger_dir)?,
        })
    }
}
