//! Unit domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Result};

/// Domain model representing a barbershop unit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub currency: String,
    /// Balance the unit carried before transaction tracking started.
    /// Used as the baseline when reconstructing the daily running balance.
    pub opening_balance: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub opening_balance: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl NewUnit {
    /// Validates the new unit data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.currency.trim().len() != 3 {
            return Err(ValidationError::InvalidInput(format!(
                "Currency must be a 3-letter code, got '{}'",
                self.currency
            ))
            .into());
        }
        Ok(())
    }
}
