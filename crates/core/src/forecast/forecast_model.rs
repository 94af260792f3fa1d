//! Forecast domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Forecast-specific errors.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// The unit has no transactions in the lookback window. Surfaced to the
    /// caller instead of synthesizing a flat history.
    #[error("No historical transactions for unit {unit_id} in the last {lookback_days} days")]
    InsufficientData { unit_id: String, lookback_days: u32 },

    #[error("Unsupported forecast horizon: {0} days")]
    UnsupportedHorizon(u32),

    #[error("Forecast calculation failed: {0}")]
    Calculation(String),
}

/// Direction of the balance trend over the lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// One observed day of the unit's cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    /// Sum of signed transaction amounts on this day; zero on days with no
    /// activity.
    pub net_flow: Decimal,
    /// Cumulative balance up to and including this day.
    pub running_balance: Decimal,
}

/// Symmetric confidence band around a forecasted balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceInterval {
    pub lower: Decimal,
    pub upper: Decimal,
}

impl ConfidenceInterval {
    pub fn width(&self) -> Decimal {
        self.upper - self.lower
    }
}

/// One projected future day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub forecasted_balance: Decimal,
    pub confidence_interval: ConfidenceInterval,
    /// Echoes the overall classification; the trend is estimated once for
    /// the whole horizon, not re-evaluated per day.
    pub trend: TrendDirection,
}

/// Aggregate view of a forecast run.
///
/// Checkpoint balances are `None` when the requested horizon ends before
/// that checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub current_balance: Decimal,
    pub trend: TrendDirection,
    pub forecasted_balance_30d: Option<Decimal>,
    pub forecasted_balance_60d: Option<Decimal>,
    pub forecasted_balance_90d: Option<Decimal>,
}

/// Trend estimate produced by the calculator and consumed by the projector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendEstimate {
    /// Average balance change per day over the lookback window.
    pub daily_delta: Decimal,
    pub trend: TrendDirection,
}

/// Shape of the historical window, reported alongside the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalWindow {
    pub count: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Full output of one pipeline run before horizon truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub historical: Vec<HistoricalPoint>,
    pub forecast: Vec<ForecastPoint>,
    pub summary: ForecastSummary,
}

/// The slice of a forecast that is worth keeping: what the API serves and
/// what the cache stores. Serialized by value into the cache so a caller
/// mutating its copy cannot corrupt the cached entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedForecast {
    pub historical: HistoricalWindow,
    pub forecast: Vec<ForecastPoint>,
    pub summary: ForecastSummary,
}

/// A forecast as served to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CashflowForecast {
    pub unit_id: String,
    pub account_id: Option<String>,
    pub horizon_days: u32,
    pub historical: HistoricalWindow,
    pub forecast: Vec<ForecastPoint>,
    pub summary: ForecastSummary,
    /// True when this response was served from the cache.
    pub cached: bool,
}
