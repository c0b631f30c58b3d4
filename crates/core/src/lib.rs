//! Poolside
//!
//! Poolside is the team store and member forms core for a youth swim team site: a read-only
//! merchandise catalog, an observable shopping cart, an explicit checkout state machine, parent
//! account balances and the registration/tryout form validators.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod forms;
pub mod prelude;
pub mod pricing;
pub mod utils;
pub mod validation;
