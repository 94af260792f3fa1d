//! Database model for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use barberledger_core::transactions::{NewTransaction, Transaction, TransactionKind};
use barberledger_core::{Error, Result};

/// ISO date format used for the `transaction_date` column. Text storage
/// keeps range filters lexicographic.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database model for transactions
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub unit_id: String,
    pub account_id: Option<String>,
    pub kind: String,
    pub amount: String,
    pub transaction_date: String,
    pub description: Option<String>,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Transaction> {
        let kind = TransactionKind::from_str(&db.kind)?;
        let amount = Decimal::from_str(&db.amount)?;
        let transaction_date = NaiveDate::parse_from_str(&db.transaction_date, DATE_FORMAT)?;
        Ok(Transaction {
            id: db.id,
            unit_id: db.unit_id,
            account_id: db.account_id,
            kind,
            amount,
            transaction_date,
            description: db.description,
            created_at: db.created_at,
        })
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        Self {
            id: domain.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            unit_id: domain.unit_id,
            account_id: domain.account_id,
            kind: domain.kind.as_str().to_string(),
            amount: domain.amount.to_string(),
            transaction_date: domain.transaction_date.format(DATE_FORMAT).to_string(),
            description: domain.description,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
