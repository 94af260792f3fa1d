//! Transaction service implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use super::transactions_model::{NewTransaction, Transaction};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;
use crate::units::UnitRepositoryTrait;

/// Service for managing revenue and expense records.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    unit_repository: Arc<dyn UnitRepositoryTrait>,
}

impl TransactionService {
    /// Creates a new TransactionService instance.
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        unit_repository: Arc<dyn UnitRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            unit_repository,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        // Reject records for units that don't exist before they hit the
        // foreign key.
        self.unit_repository.get_by_id(&new_transaction.unit_id)?;
        self.repository.create(new_transaction).await
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(transaction_id)
    }

    fn list_transactions(
        &self,
        unit_id: &str,
        account_id: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        match (start_date, end_date) {
            (Some(start), Some(end)) => {
                self.repository
                    .get_in_range(unit_id, account_id, start, end)
            }
            _ => {
                let mut transactions = self.repository.list_by_unit(unit_id, account_id)?;
                if let Some(start) = start_date {
                    transactions.retain(|t| t.transaction_date >= start);
                }
                if let Some(end) = end_date {
                    transactions.retain(|t| t.transaction_date <= end);
                }
                Ok(transactions)
            }
        }
    }
}
