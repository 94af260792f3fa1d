//! Cash-flow forecast service implementation.

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

use super::forecast_calculator::{estimate_trend, project};
use super::forecast_constants::{
    FORECAST_CACHE_TTL_SECS, FORECAST_HORIZONS, FORECAST_LOOKBACK_DAYS,
};
use super::forecast_model::{
    CachedForecast, CashflowForecast, ForecastError, ForecastPoint, ForecastResult,
    ForecastSummary, HistoricalWindow,
};
use super::forecast_traits::CashflowForecastServiceTrait;
use super::history_aggregator::{build_daily_history, window_start};
use crate::cache::CacheRepositoryTrait;
use crate::constants::ALL_ACCOUNTS_KEY;
use crate::errors::Result;
use crate::transactions::TransactionRepositoryTrait;
use crate::units::UnitRepositoryTrait;

/// Service producing cash-flow forecasts.
pub struct CashflowForecastService {
    unit_repository: Arc<dyn UnitRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    cache_repository: Arc<dyn CacheRepositoryTrait>,
}

impl CashflowForecastService {
    /// Creates a new CashflowForecastService instance.
    pub fn new(
        unit_repository: Arc<dyn UnitRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        cache_repository: Arc<dyn CacheRepositoryTrait>,
    ) -> Self {
        Self {
            unit_repository,
            transaction_repository,
            cache_repository,
        }
    }

    /// Cache key for one (unit, account, horizon) combination. Horizons are
    /// cached separately even though they derive from the same 90-day
    /// computation; a hit for 30 days does not serve a 60-day request.
    fn cache_key(unit_id: &str, account_id: Option<&str>, horizon_days: u32) -> String {
        format!(
            "forecast:cashflow:{}:{}:{}",
            unit_id,
            account_id.unwrap_or(ALL_ACCOUNTS_KEY),
            horizon_days
        )
    }

    /// Probes the cache. Every failure path degrades to a miss.
    fn cached_forecast(&self, key: &str) -> Option<CachedForecast> {
        let raw = match self.cache_repository.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("Cache read failed for {}: {}. Recomputing.", key, err);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(cached) => Some(cached),
            Err(err) => {
                warn!("Discarding unreadable cache entry {}: {}", key, err);
                None
            }
        }
    }

    /// Stores a freshly computed forecast. Failures are logged, never
    /// propagated.
    fn store_forecast(&self, key: &str, payload: &CachedForecast) {
        let raw = match serde_json::to_string(payload) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Failed to serialize forecast for cache {}: {}", key, err);
                return;
            }
        };
        if let Err(err) = self.cache_repository.set(
            key,
            raw,
            Duration::from_secs(FORECAST_CACHE_TTL_SECS),
        ) {
            warn!("Cache write failed for {}: {}", key, err);
        }
    }

    /// Runs the full pipeline: aggregate 90 days of history, estimate the
    /// trend, project 90 days forward.
    fn compute(&self, unit_id: &str, account_id: Option<&str>) -> Result<ForecastResult> {
        let unit = self.unit_repository.get_by_id(unit_id)?;

        let window_end = Utc::now().date_naive();
        let start = window_start(window_end, FORECAST_LOOKBACK_DAYS);
        let transactions =
            self.transaction_repository
                .get_in_range(unit_id, account_id, start, window_end)?;

        let historical = build_daily_history(
            unit_id,
            &transactions,
            unit.opening_balance,
            window_end,
            FORECAST_LOOKBACK_DAYS,
        )?;
        let estimate = estimate_trend(&historical, FORECAST_LOOKBACK_DAYS)?;
        let forecast = project(&historical, &estimate, FORECAST_LOOKBACK_DAYS)?;

        debug!(
            "Computed forecast for unit {} (account {:?}): trend {:?}, daily delta {}",
            unit_id, account_id, estimate.trend, estimate.daily_delta
        );

        let summary = ForecastSummary {
            current_balance: historical
                .last()
                .map(|p| p.running_balance)
                .unwrap_or(Decimal::ZERO),
            trend: estimate.trend,
            forecasted_balance_30d: None,
            forecasted_balance_60d: None,
            forecasted_balance_90d: None,
        };

        Ok(ForecastResult {
            historical,
            forecast,
            summary,
        })
    }
}

/// Balance projected `checkpoint` days out, if the truncated forecast
/// reaches that far.
fn checkpoint_balance(forecast: &[ForecastPoint], checkpoint: usize) -> Option<Decimal> {
    forecast.get(checkpoint - 1).map(|p| p.forecasted_balance)
}

#[async_trait]
impl CashflowForecastServiceTrait for CashflowForecastService {
    async fn get_cashflow_forecast(
        &self,
        unit_id: &str,
        account_id: Option<&str>,
        horizon_days: u32,
    ) -> Result<CashflowForecast> {
        if !FORECAST_HORIZONS.contains(&horizon_days) {
            return Err(ForecastError::UnsupportedHorizon(horizon_days).into());
        }

        let key = Self::cache_key(unit_id, account_id, horizon_days);
        if let Some(hit) = self.cached_forecast(&key) {
            debug!("Serving forecast from cache: {}", key);
            return Ok(CashflowForecast {
                unit_id: unit_id.to_string(),
                account_id: account_id.map(str::to_string),
                horizon_days,
                historical: hit.historical,
                forecast: hit.forecast,
                summary: hit.summary,
                cached: true,
            });
        }

        let result = self.compute(unit_id, account_id)?;

        let mut forecast = result.forecast;
        forecast.truncate(horizon_days as usize);

        let summary = ForecastSummary {
            forecasted_balance_30d: checkpoint_balance(&forecast, 30),
            forecasted_balance_60d: checkpoint_balance(&forecast, 60),
            forecasted_balance_90d: checkpoint_balance(&forecast, 90),
            ..result.summary
        };

        let historical = HistoricalWindow {
            count: result.historical.len(),
            start_date: result
                .historical
                .first()
                .map(|p| p.date)
                .unwrap_or_default(),
            end_date: result.historical.last().map(|p| p.date).unwrap_or_default(),
        };

        self.store_forecast(
            &key,
            &CachedForecast {
                historical: historical.clone(),
                forecast: forecast.clone(),
                summary: summary.clone(),
            },
        );

        Ok(CashflowForecast {
            unit_id: unit_id.to_string(),
            account_id: account_id.map(str::to_string),
            horizon_days,
            historical,
            forecast,
            summary,
            cached: false,
        })
    }
}
