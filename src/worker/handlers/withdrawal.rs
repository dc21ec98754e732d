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
    let amount = validate_amount(raw_amount, Action::Withdraw, limits)?;

    let current_balance = session.balance();
    let new_balance = current_balance
        .checked_sub(amount)
        .ok_or(ValidationError::InsufficientFunds {
            requested: amount,
            balance: current_balance,
        })?;

    let pending = Confirmation {
        action: Action::Withdraw,
        amount,
        current_balance,
        new_balance,
    };
    if !confirm.confirm(&pending) {
        tracing::info!(account = %session.id(), "withdrawal cancelled");
        return Ok(Outcome::Cancelled);
    }

    super::commit(stores, session, Action::Withdraw, amount, new_balance)?;
    Ok(Outcome::Withdrawn {
        amount,
        balance: new_balance,
    })
}
