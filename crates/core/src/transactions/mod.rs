//! Revenue and expense records.
//!
//! Transactions are the raw material of the cash-flow forecast: signed
//! amounts per unit (and optionally per bank account), keyed by the calendar
//! day they occurred on.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::*;
pub use transactions_service::*;
pub use transactions_traits::*;

#[cfg(test)]
mod transactions_model_tests;
