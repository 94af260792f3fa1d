//! Unit repository backed by SQLite.

use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use barberledger_core::units::{NewUnit, Unit, UnitRepositoryTrait};
use barberledger_core::Result;

use super::model::UnitDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::units;

/// Repository for managing unit data in the database
pub struct UnitRepository {
    pool: Arc<DbPool>,
}

impl UnitRepository {
    /// Creates a new UnitRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitRepositoryTrait for UnitRepository {
    async fn create(&self, new_unit: NewUnit) -> Result<Unit> {
        let mut conn = get_connection(&self.pool)?;
        let unit_db = UnitDB::from(new_unit);

        let inserted = conn
            .immediate_transaction(|conn| {
                diesel::insert_into(units::table)
                    .values(&unit_db)
                    .get_result::<UnitDB>(conn)
            })
            .map_err(StorageError::from)?;

        Unit::try_from(inserted)
    }

    fn get_by_id(&self, unit_id: &str) -> Result<Unit> {
        let mut conn = get_connection(&self.pool)?;
        let unit_db = units::table
            .select(UnitDB::as_select())
            .find(unit_id)
            .first::<UnitDB>(&mut conn)
            .map_err(StorageError::from)?;

        Unit::try_from(unit_db)
    }

    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Unit>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = units::table.into_boxed();
        if let Some(is_active) = is_active_filter {
            query = query.filter(units::is_active.eq(is_active));
        }

        let units_db = query
            .select(UnitDB::as_select())
            .order(units::name.asc())
            .load::<UnitDB>(&mut conn)
            .map_err(StorageError::from)?;

        units_db.into_iter().map(Unit::try_from).collect()
    }
}
