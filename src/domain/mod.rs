pub mod account;
pub mod pin;
pub mod session;
pub mod transaction;
