//! Unit service implementation.

use async_trait::async_trait;
use std::sync::Arc;

use super::units_model::{NewUnit, Unit};
use super::units_traits::{UnitRepositoryTrait, UnitServiceTrait};
use crate::errors::Result;

/// Service for managing barbershop units.
pub struct UnitService {
    repository: Arc<dyn UnitRepositoryTrait>,
}

impl UnitService {
    /// Creates a new UnitService instance.
    pub fn new(repository: Arc<dyn UnitRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UnitServiceTrait for UnitService {
    async fn create_unit(&self, new_unit: NewUnit) -> Result<Unit> {
        new_unit.validate()?;
        self.repository.create(new_unit).await
    }

    fn get_unit(&self, unit_id: &str) -> Result<Unit> {
        self.repository.get_by_id(unit_id)
    }

    fn list_units(&self) -> Result<Vec<Unit>> {
        self.repository.list(None)
    }
}
