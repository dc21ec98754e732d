use crate::{
    common::{
        config::{AtmConfig, Limits},
        error::AtmError,
        event::{Confirm, Outcome, Request},
    },
    domain::{
        account::AccountId,
        session::{BalanceInquiry, Session},
    },
    io::Stores,
    worker::handlers::{deposit, pin_change, withdrawal},
};

/// Entry point for the ATM core: authenticates users into a [`Session`] and
/// runs requests against it.
#[derive(Debug, Clone)]
pub struct Processor {
    stores: Stores,
    limits: Limits,
}

impl Processor {
    pub fn new(stores: Stores, limits: Limits) -> Self {
        Self { stores, limits }
    }

    /// Opens the stores named by `config` (creating their directories).
    pub fn from_config(config: &AtmConfig) -> Result<Self, AtmError> {
        let stores = Stores::open(&config.storage, &config.defaults)?;
        Ok(Self::new(stores, config.limits.clone()))
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Loads the account (creating it with defaults on first sight) and
    /// compares `pin_input` with the stored PIN. No trimming is applied.
    pub fn authenticate(&self, raw_id: &str, pin_input: &str) -> Result<Session, AtmError> {
        let id = AccountId::parse(raw_id)?;
        let record = self.stores.accounts.load(&id)?;

        if !self.stores.accounts.scheme().matches(&record.pin, pin_input) {
            tracing::warn!(account = %id, "authentication failed");
            return Err(AtmError::Authentication {
                id: id.as_str().to_string(),
            });
        }

        tracing::info!(account = %id, "authenticated");
        Ok(Session::new(id, record))
    }

    pub fn process<C: Confirm + ?Sized>(
        &self,
        session: &mut Session,
        request: Request,
        confirm: &mut C,
    ) -> Result<Outcome, AtmError> {
        let result = match request {
            Request::Deposit { amount } => {
                deposit::handle(&self.stores, &self.limits, session, &amount, confirm)
            }
            Request::Withdraw { amount } => {
                withdrawal::handle(&self.stores, &self.limits, session, &amount, confirm)
            }
            Request::ChangePin {
                current,
                new,
                confirm: confirm_pin,
            } => pin_change::handle(
                &self.stores,
                &self.limits,
                session,
                &current,
                &new,
                &confirm_pin,
            ),
            Request::BalanceInquiry => Ok(Outcome::Balance(self.balance(session))),
            Request::History => self.history(session).map(Outcome::History),
        };

        if let Err(err) = &result {
            if err.is_recoverable() {
                tracing::warn!(account = %session.id(), error = %err, "request rejected");
            } else {
                tracing::error!(account = %session.id(), error = %err, "request failed");
            }
        }
        result
    }

    pub fn balance(&self, session: &Session) -> BalanceInquiry {
        let balance = session.balance();
        BalanceInquiry {
            balance,
            available_to_withdraw: balance.min(self.limits.available_cap),
        }
    }

    pub fn history(&self, session: &Session) -> Result<String, AtmError> {
        Ok(self.stores.ledger.read_all(session.id())?)
    }

    /// Writes the session's PIN and balance back unconditionally and ends it.
    pub fn exit(&self, session: Session) -> Result<(), AtmError> {
        self.stores.accounts.save(session.id(), &session.record())?;
        tracing::info!(account = %session.id(), "session closed");
        Ok(())
    }
}
