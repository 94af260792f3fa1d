//! BarberLedger Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the BarberLedger
//! cash-flow service. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod cache;
pub mod constants;
pub mod errors;
pub mod forecast;
pub mod transactions;
pub mod units;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
