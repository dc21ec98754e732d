use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::PathBuf,
};

use crate::{
    common::{error::StorageError, money::Money},
    domain::{
        account::AccountId,
        transaction::{Action, TransactionEntry},
    },
};

/// Returned by [`LedgerStore::read_all`] for an account with no log yet.
pub const NO_TRANSACTIONS: &str = "No transactions yet.";

/// Append-only transaction history at `<dir>/<id>_log.txt`, one
/// [`TransactionEntry`] line per executed operation.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    dir: PathBuf,
}

impl LedgerStore {
    /// Opens the ledger, creating `dir` if it does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(StorageError::io(&dir))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, id: &AccountId) -> PathBuf {
        self.dir.join(format!("{id}_log.txt"))
    }

    /// Stamps a new entry with the current local time and appends it.
    /// A retried append writes a second line.
    pub fn append(
        &self,
        id: &AccountId,
        action: Action,
        amount: Money,
        resulting_balance: Money,
    ) -> Result<TransactionEntry, StorageError> {
        let entry = TransactionEntry::new(action, amount, resulting_balance);
        self.append_entry(id, &entry)?;
        Ok(entry)
    }

    pub fn append_entry(
        &self,
        id: &AccountId,
        entry: &TransactionEntry,
    ) -> Result<(), StorageError> {
        let path = self.path_for(id);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(StorageError::io(&path))?;
        writeln!(file, "{entry}").map_err(StorageError::io(&path))
    }

    /// Full log text, oldest entry first, or [`NO_TRANSACTIONS`].
    pub fn read_all(&self, id: &AccountId) -> Result<String, StorageError> {
        let path = self.path_for(id);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(NO_TRANSACTIONS.to_string()),
            Err(err) => Err(StorageError::io(&path)(err)),
        }
    }
}
