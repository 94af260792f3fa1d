//! Database model for units.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use barberledger_core::units::{NewUnit, Unit};
use barberledger_core::{Error, Result};

/// Database model for units
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
#[diesel(table_name = crate::schema::units)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UnitDB {
    pub id: String,
    pub name: String,
    pub currency: String,
    /// Decimal stored as text; SQLite has no exact numeric type.
    pub opening_balance: String,
    pub is_active: bool,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
    #[diesel(skip_insertion)]
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UnitDB> for Unit {
    type Error = Error;

    fn try_from(db: UnitDB) -> Result<Unit> {
        let opening_balance = Decimal::from_str(&db.opening_balance)?;
        Ok(Unit {
            id: db.id,
            name: db.name,
            currency: db.currency,
            opening_balance,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewUnit> for UnitDB {
    fn from(domain: NewUnit) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: domain.name,
            currency: domain.currency,
            opening_balance: domain.opening_balance.unwrap_or_default().to_string(),
            is_active: domain.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
