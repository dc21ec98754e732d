use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{
    common::{config::AccountDefaults, error::StorageError, money::Money},
    domain::{
        account::{AccountId, AccountRecord},
        pin::PinScheme,
    },
};

/// One text file per account at `<dir>/<id>.txt`: the PIN on line 1 and the
/// balance on line 2, with no trailing newline.
#[derive(Debug, Clone)]
pub struct AccountStore {
    dir: PathBuf,
    defaults: AccountDefaults,
    scheme: PinScheme,
}

impl AccountStore {
    /// Opens the store, creating `dir` if it does not exist yet.
    pub fn open(
        dir: impl Into<PathBuf>,
        defaults: AccountDefaults,
        scheme: PinScheme,
    ) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(StorageError::io(&dir))?;
        Ok(Self {
            dir,
            defaults,
            scheme,
        })
    }

    pub fn scheme(&self) -> PinScheme {
        self.scheme
    }

    pub fn path_for(&self, id: &AccountId) -> PathBuf {
        self.dir.join(format!("{id}.txt"))
    }

    /// Reads the record for `id`, first writing the default record if the
    /// account has never been seen.
    pub fn load(&self, id: &AccountId) -> Result<AccountRecord, StorageError> {
        let path = self.path_for(id);
        self.create_default_if_missing(&path)?;

        let text = fs::read_to_string(&path).map_err(StorageError::io(&path))?;
        parse_record(&path, &text)
    }

    /// Overwrites the whole record.
    pub fn save(&self, id: &AccountId, record: &AccountRecord) -> Result<(), StorageError> {
        let path = self.path_for(id);
        tracing::debug!(path = %path.display(), "saving account record");
        fs::write(&path, render_record(record)).map_err(StorageError::io(&path))
    }

    fn create_default_if_missing(&self, path: &Path) -> Result<(), StorageError> {
        let file = OpenOptions::new().write(true).create_new(true).open(path);
        let mut file = match file {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(err) => return Err(StorageError::io(path)(err)),
        };

        let pin = self.scheme.encode(&self.defaults.pin);
        let record = AccountRecord::new(pin, self.defaults.balance);
        tracing::info!(path = %path.display(), "creating default account record");
        file.write_all(render_record(&record).as_bytes())
            .map_err(StorageError::io(path))
    }
}

fn render_record(record: &AccountRecord) -> String {
    format!("{}\n{}", record.pin, record.balance)
}

fn parse_record(path: &Path, text: &str) -> Result<AccountRecord, StorageError> {
    let corrupt = |reason: &str| StorageError::Corrupt {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut lines = text.lines();
    let pin = lines.next().ok_or_else(|| corrupt("missing PIN line"))?;
    let balance = lines
        .next()
        .ok_or_else(|| corrupt("missing balance line"))?
        .trim()
        .parse::<u64>()
        .map_err(|_| corrupt("balance is not a whole non-negative number"))?;

    Ok(AccountRecord::new(pin, Money::new(balance)))
}
