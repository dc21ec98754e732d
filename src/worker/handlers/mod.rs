pub mod deposit;
pub mod pin_change;
pub mod withdrawal;

use crate::{
    common::{error::AtmError, money::Money},
    domain::{session::Session, transaction::Action},
    io::Stores,
};

/// Persists a confirmed balance change: record first, then the session, then
/// the ledger line. A failed append leaves the saved balance in place with no
/// matching ledger line.
fn commit(
    stores: &Stores,
    session: &mut Session,
    action: Action,
    amount: Money,
    new_balance: Money,
) -> Result<(), AtmError> {
    let mut record = session.record();
    record.balance = new_balance;
    stores.accounts.save(session.id(), &record)?;
    session.set_balance(new_balance);

    stores
        .ledger
        .append(session.id(), action, amount, new_balance)?;
    tracing::info!(
        account = %session.id(),
        action = action.label(),
        amount = amount.as_u64(),
        balance = new_balance.as_u64(),
        "transaction committed"
    );
    Ok(())
}


#[cfg(test)]
mod tests {
    use std::fs;

    use super::{deposit, test_support::{session, stores}, withdrawal};
    use crate::{
        common::{
            config::Limits,
            error::{AtmError, StorageError},
            event::Confirmation,
            money::Money,
        },
        io::ledger::NO_TRANSACTIONS,
    };

    fn yes(_: &Confirmation) -> bool {
        true
    }

    #[test]
    fn failed_ledger_append_keeps_record_and_session_in_step() {
        let tmp = tempfile::tempdir().unwrap();
        let stores = stores(tmp.path());
        let mut session = session(&stores, "A1");
        let limits = Limits::default();
        fs::create_dir(stores.ledger.path_for(session.id())).unwrap();

        let err = deposit::handle(&stores, &limits, &mut session, "5000", &mut yes).unwrap_err();

        assert!(matches!(err, AtmError::Storage(StorageError::Io { .. })));
        assert!(!err.is_recoverable());
        assert_eq!(session.balance(), Money::new(255_000));
        let on_disk = fs::read_to_string(stores.accounts.path_for(session.id())).unwrap();
        assert_eq!(on_disk, "5678\n255000");
    }

    #[test]
    fn failed_record_save_changes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let stores = stores(tmp.path());
        let mut session = session(&stores, "A1");
        let limits = Limits::default();
        let record_path = stores.accounts.path_for(session.id());
        fs::remove_file(&record_path).unwrap();
        fs::create_dir(&record_path).unwrap();

        let err = withdrawal::handle(&stores, &limits, &mut session, "1000", &mut yes).unwrap_err();

        assert!(matches!(err, AtmError::Storage(StorageError::Io { .. })));
        assert_eq!(session.balance(), Money::new(250_000));
        assert_eq!(
            stores.ledger.read_all(session.id()).unwrap(),
            NO_TRANSACTIONS
        );
    }
}
