use crate::{common::money::Money, domain::session::BalanceInquiry, domain::transaction::Action};

/// An operation requested by the front end for the logged-in session.
///
/// Amounts arrive as the raw text the user typed; parsing them is part of
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Deposit { amount: String },
    Withdraw { amount: String },
    ChangePin {
        current: String,
        new: String,
        confirm: String,
    },
    BalanceInquiry,
    History,
}

/// What a successfully processed [`Request`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Deposited { amount: Money, balance: Money },
    Withdrawn { amount: Money, balance: Money },
    /// The user declined the confirmation; nothing changed.
    Cancelled,
    PinChanged,
    Balance(BalanceInquiry),
    History(String),
}

/// Details shown to the user before a deposit or withdrawal is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub action: Action,
    pub amount: Money,
    pub current_balance: Money,
    pub new_balance: Money,
}

/// Asks the user to confirm or cancel a pending operation.
pub trait Confirm {
    fn confirm(&mut self, pending: &Confirmation) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&Confirmation) -> bool,
{
    fn confirm(&mut self, pending: &Confirmation) -> bool {
        self(pending)
    }
}
