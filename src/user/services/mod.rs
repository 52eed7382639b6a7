//! Application services for user accounts.

mod account;

pub use account::{AccountError, AccountResult, AccountService, ExternalSignIn};
