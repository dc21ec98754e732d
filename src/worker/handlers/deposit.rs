use crate::{
    common::{
        config::Limits,
        error::{AtmError, ValidationError},
        event::{Confirm, Confirmation, Outcome},
    },
    domain::{session::Session, transaction::Action},
    io::Stores,
    worker::validation::validate_amount,
};

pub fn handle<C: Confirm + ?Sized>(
    stores: &Stores,
    limits: &Limits,
    session: &mut Session,
    raw_amount: &str,
    confirm: &mut C,
) -> Result<Outcome, AtmError> {
    let amount = validate_amount(raw_amount, Action::Deposit, limits)?;

    let current_balance = session.balance();
    let new_balance = current_balance
        .checked_add(amount)
        .ok_or(ValidationError::BalanceOverflow)?;

    let pending = Confirmation {
        action: Action::Deposit,
        amount,
        current_balance,
        new_balance,
    };
    if !confirm.confirm(&pending) {
        tracing::info!(account = %session.id(), "deposit cancelled");
        return Ok(Outcome::Cancelled);
    }

    super::commit(stores, session, Action::Deposit, amount, new_balance)?;
    Ok(Outcome::Deposited {
        amount,
        balance: new_balance,
    })
}
