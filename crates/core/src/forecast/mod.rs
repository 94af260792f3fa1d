//! Cash-flow forecasting.
//!
//! Projects future account balances for a unit from its transaction
//! history. The pipeline runs in three stages: the history aggregator
//! reduces raw transactions to a gap-free daily series, the calculator
//! estimates a trend and extrapolates it with widening confidence
//! intervals, and the service orchestrates both behind a TTL cache.

mod forecast_calculator;
mod forecast_constants;
mod forecast_model;
mod forecast_service;
mod forecast_traits;
mod history_aggregator;

pub use forecast_calculator::*;
pub use forecast_constants::*;
pub use forecast_model::*;
pub use forecast_service::*;
pub use forecast_traits::*;
pub use history_aggregator::*;

#[cfg(test)]
mod forecast_service_tests;
#[cfg(test)]
mod history_aggregator_tests;
