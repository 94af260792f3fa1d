//! SQLite storage implementation for BarberLedger.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `barberledger-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for units and transactions
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!       core (domain)
//!             │
//!             ▼
//!   storage-sqlite (this crate)
//!             │
//!             ▼
//!         SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod transactions;
pub mod units;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export repositories
pub use transactions::TransactionRepository;
pub use units::UnitRepository;

// Re-export storage errors
pub use errors::StorageError;

// Re-export from barberledger-core for convenience
pub use barberledger_core::errors::{DatabaseError, Error, Result};
