//! Tunable parameters of the forecasting pipeline.
//!
//! The threshold and uncertainty figures below are working assumptions
//! pending validation against production data; treat them as knobs, not
//! requirements.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Days of history fetched for trend estimation, regardless of the
/// requested horizon. A shorter window made the trend flip on weekly
/// seasonality.
pub const FORECAST_LOOKBACK_DAYS: u32 = 90;

/// Horizons the API accepts, in days.
pub const FORECAST_HORIZONS: [u32; 3] = [30, 60, 90];

/// How long a generated forecast stays cached.
pub const FORECAST_CACHE_TTL_SECS: u64 = 3600;

/// Dead zone for trend classification: the daily delta must exceed this
/// fraction of the mean absolute balance per day to count as a trend.
/// Relative rather than absolute so it scales across unit sizes.
pub const TREND_THRESHOLD_RATIO: Decimal = dec!(0.001);

/// Base uncertainty as a fraction of the last balance, used when the
/// history is too short to measure flow volatility.
pub const FALLBACK_UNCERTAINTY_RATIO: Decimal = dec!(0.05);
