//! Forecast service trait.

use async_trait::async_trait;

use super::forecast_model::CashflowForecast;
use crate::errors::Result;

/// Trait defining the contract for cash-flow forecast operations.
#[async_trait]
pub trait CashflowForecastServiceTrait: Send + Sync {
    /// Returns the cash-flow forecast for a unit.
    ///
    /// # Arguments
    /// * `unit_id` - The unit to forecast
    /// * `account_id` - Optional bank-account filter; `None` means all accounts
    /// * `horizon_days` - Requested horizon; must be one of
    ///   [`super::FORECAST_HORIZONS`]
    ///
    /// History is always aggregated over the full
    /// [`super::FORECAST_LOOKBACK_DAYS`] window regardless of the horizon —
    /// estimating a trend on a 30-day window proved too jumpy — and the
    /// projection is truncated to `horizon_days` afterwards. Results are
    /// cached per (unit, account, horizon) for
    /// [`super::FORECAST_CACHE_TTL_SECS`]; a cache hit is marked with
    /// `cached: true`.
    async fn get_cashflow_forecast(
        &self,
        unit_id: &str,
        account_id: Option<&str>,
        horizon_days: u32,
    ) -> Result<CashflowForecast>;
}
