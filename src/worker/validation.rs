//! Checks that run before any state is touched. A failed check leaves the
//! session, the account record and the ledger exactly as they were.

use crate::{
    common::{config::Limits, error::ValidationError, money::Money},
    domain::transaction::Action,
};

/// Parses and checks a deposit or withdrawal amount against the
/// per-transaction rules: positive, a multiple of the unit, within the cap.
/// The funds check for withdrawals happens later against the live balance.
pub fn validate_amount(
    raw: &str,
    action: Action,
    limits: &Limits,
) -> Result<Money, ValidationError> {
    let amount: Money = raw.parse()?;
    if amount.is_zero() {
        return Err(ValidationError::NotPositive);
    }
    if !amount.is_multiple_of(limits.amount_multiple) {
        return Err(ValidationError::NotMultiple(limits.amount_multiple));
    }
    let cap = limits.cap_for(action);
    if amount > cap {
        return Err(ValidationError::ExceedsCap { action, cap });
    }
    Ok(amount)
}

/// Checks a new PIN and its confirmation. The current-PIN check is done by
/// the caller, since it depends on how the stored PIN is encoded.
pub fn validate_new_pin(
    new: &str,
    confirm: &str,
    limits: &Limits,
) -> Result<(), ValidationError> {
    if new.chars().count() < limits.min_pin_len {
        return Err(ValidationError::PinTooShort(limits.min_pin_len));
    }
    if new.contains(['\n', '\r']) {
        return Err(ValidationError::PinNotSingleLine);
    }
    if new != confirm {
        return Err(ValidationError::ConfirmationMismatch);
    }
    Ok(())
}
