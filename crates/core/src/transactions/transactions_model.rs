//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{errors::ValidationError, Result};

/// Transaction-specific errors.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Unknown transaction kind: {0}")]
    InvalidKind(String),
}

/// Whether a transaction adds to or removes from the unit's cash position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Revenue,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Revenue => "REVENUE",
            TransactionKind::Expense => "EXPENSE",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "REVENUE" => Ok(TransactionKind::Revenue),
            "EXPENSE" => Ok(TransactionKind::Expense),
            other => Err(TransactionError::InvalidKind(other.to_string()).into()),
        }
    }
}

/// Domain model representing a revenue or expense record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub unit_id: String,
    /// Bank account the money moved through, when known.
    pub account_id: Option<String>,
    pub kind: TransactionKind,
    /// Positive magnitude; the sign comes from `kind`.
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    /// The amount with its cash-flow sign applied: revenues are positive,
    /// expenses negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Revenue => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Input model for creating a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub unit_id: String,
    pub account_id: Option<String>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
}

impl NewTransaction {
    /// Validates the new transaction data.
    pub fn validate(&self) -> Result<()> {
        if self.unit_id.trim().is_empty() {
            return Err(ValidationError::MissingField("unitId".to_string()).into());
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Amount must be positive, got {}",
                self.amount
            ))
            .into());
        }
        Ok(())
    }
}
