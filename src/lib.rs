//! Core of a single-user ATM: a file-backed account store, an append-only
//! transaction ledger, and the validation rules for deposits, withdrawals and
//! PIN changes. [`app::Terminal`] is a thin interactive front end over
//! [`Processor`].

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod worker;

pub use common::{
    config::AtmConfig,
    error::{AtmError, StorageError, ValidationError},
    event::{Confirm, Confirmation, Outcome, Request},
    money::Money,
};
pub use domain::session::{BalanceInquiry, Session};
pub use worker::processor::Processor;
