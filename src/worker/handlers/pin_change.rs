use crate::{
    common::{
        config::Limits,
        error::{AtmError, ValidationError},
        event::Outcome,
    },
    domain::session::Session,
    io::Stores,
    worker::validation::validate_new_pin,
};

/// Replaces the session PIN after checking the current one, the length of the
/// new one and its confirmation. The balance is written back with it.
pub fn handle(
    stores: &Stores,
    limits: &Limits,
    session: &mut Session,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<Outcome, AtmError> {
    let scheme = stores.accounts.scheme();
    if !scheme.matches(session.pin(), current) {
        return Err(ValidationError::PinMismatch.into());
    }
    validate_new_pin(new, confirm, limits)?;

    let mut record = session.record();
    record.pin = scheme.encode(new);
    stores.accounts.save(session.id(), &record)?;
    session.set_pin(record.pin);

    tracing::info!(account = %session.id(), "PIN changed");
    Ok(Outcome::PinChanged)
}
