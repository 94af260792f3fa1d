//! Transaction repository backed by SQLite.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;

use barberledger_core::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait,
};
use barberledger_core::Result;

use super::model::{TransactionDB, DATE_FORMAT};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::transactions;

/// Repository for managing transaction data in the database
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let transaction_db = TransactionDB::from(new_transaction);

        let inserted = conn
            .immediate_transaction(|conn| {
                diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .get_result::<TransactionDB>(conn)
            })
            .map_err(StorageError::from)?;

        Transaction::try_from(inserted)
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let transaction_db = transactions::table
            .select(TransactionDB::as_select())
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Transaction::try_from(transaction_db)
    }

    fn list_by_unit(&self, unit_id: &str, account_id: Option<&str>) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::unit_id.eq(unit_id))
            .into_boxed();
        if let Some(account_id) = account_id {
            query = query.filter(transactions::account_id.eq(Some(account_id)));
        }

        let transactions_db = query
            .select(TransactionDB::as_select())
            .order((
                transactions::transaction_date.asc(),
                transactions::created_at.asc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        transactions_db
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    fn get_in_range(
        &self,
        unit_id: &str,
        account_id: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::unit_id.eq(unit_id))
            .filter(transactions::transaction_date.ge(start_date.format(DATE_FORMAT).to_string()))
            .filter(transactions::transaction_date.le(end_date.format(DATE_FORMAT).to_string()))
            .into_boxed();
        if let Some(account_id) = account_id {
            query = query.filter(transactions::account_id.eq(Some(account_id)));
        }

        let transactions_db = query
            .select(TransactionDB::as_select())
            .order((
                transactions::transaction_date.asc(),
                transactions::created_at.asc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        transactions_db
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
