//! Unit repository and service traits.
//!
//! These traits define the contract for unit operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::units_model::{NewUnit, Unit};
use crate::errors::Result;

/// Trait defining the contract for Unit repository operations.
#[async_trait]
pub trait UnitRepositoryTrait: Send + Sync {
    /// Creates a new unit.
    async fn create(&self, new_unit: NewUnit) -> Result<Unit>;

    /// Retrieves a unit by its ID.
    fn get_by_id(&self, unit_id: &str) -> Result<Unit>;

    /// Lists units with an optional active-status filter.
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Unit>>;
}

/// Trait defining the contract for Unit service operations.
#[async_trait]
pub trait UnitServiceTrait: Send + Sync {
    /// Creates a new unit with business validation.
    async fn create_unit(&self, new_unit: NewUnit) -> Result<Unit>;

    /// Retrieves a unit by ID.
    fn get_unit(&self, unit_id: &str) -> Result<Unit>;

    /// Lists all units.
    fn list_units(&self) -> Result<Vec<Unit>>;
}
