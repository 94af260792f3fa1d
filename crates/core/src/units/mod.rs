//! Barbershop units (tenants).
//!
//! A unit is one barbershop location. Every financial record belongs to a
//! unit, and the forecasting pipeline is always scoped to one.

mod units_model;
mod units_service;
mod units_traits;

pub use units_model::*;
pub use units_service::*;
pub use units_traits::*;
