//! Transaction repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::Result;

/// Trait defining the contract for Transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Creates a new transaction.
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Retrieves a transaction by its ID.
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Lists all transactions for a unit, optionally filtered by account,
    /// ordered by date ascending.
    fn list_by_unit(&self, unit_id: &str, account_id: Option<&str>) -> Result<Vec<Transaction>>;

    /// Retrieves all transactions for a unit dated within
    /// `[start_date, end_date]` (inclusive), optionally filtered by account,
    /// ordered by date ascending.
    ///
    /// This is the forecasting pipeline's data source.
    fn get_in_range(
        &self,
        unit_id: &str,
        account_id: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Creates a new transaction with business validation.
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Retrieves a transaction by ID.
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    /// Lists transactions for a unit with optional account and date filters.
    fn list_transactions(
        &self,
        unit_id: &str,
        account_id: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>>;
}
