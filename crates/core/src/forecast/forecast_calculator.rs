//! Pure forecast math: trend estimation and projection.
//!
//! Everything here operates on in-memory series; fetching and caching live
//! in the service.

use rust_decimal::{Decimal, MathematicalOps};

use super::forecast_constants::{FALLBACK_UNCERTAINTY_RATIO, TREND_THRESHOLD_RATIO};
use super::forecast_model::{
    ConfidenceInterval, ForecastError, ForecastPoint, HistoricalPoint, TrendDirection,
    TrendEstimate,
};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;

/// Estimates the balance trend over the historical window.
///
/// The daily delta is the end-to-start balance difference spread over the
/// window. Classification applies a dead zone of
/// [`TREND_THRESHOLD_RATIO`] times the mean absolute balance, so near-flat
/// series don't flip between `up` and `down` on noise.
pub fn estimate_trend(history: &[HistoricalPoint], lookback_days: u32) -> Result<TrendEstimate> {
    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(
                ForecastError::Calculation("Cannot estimate a trend from an empty history".into())
                    .into(),
            )
        }
    };
    if lookback_days == 0 {
        return Err(ForecastError::Calculation("Lookback window must be at least one day".into()).into());
    }

    let daily_delta =
        (last.running_balance - first.running_balance) / Decimal::from(lookback_days);

    let mean_abs_balance = history
        .iter()
        .map(|p| p.running_balance.abs())
        .sum::<Decimal>()
        / Decimal::from(history.len() as u64);
    let threshold = mean_abs_balance * TREND_THRESHOLD_RATIO;

    let trend = if daily_delta > threshold {
        TrendDirection::Up
    } else if daily_delta < -threshold {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    Ok(TrendEstimate { daily_delta, trend })
}

/// Standard deviation of the daily net flow over the window.
///
/// Returns `None` when fewer than two points exist, in which case callers
/// fall back to a fraction of the last balance.
pub fn flow_volatility(history: &[HistoricalPoint]) -> Option<Decimal> {
    if history.len() < 2 {
        return None;
    }

    let n = Decimal::from(history.len() as u64);
    let mean = history.iter().map(|p| p.net_flow).sum::<Decimal>() / n;
    let variance = history
        .iter()
        .map(|p| {
            let diff = p.net_flow - mean;
            diff * diff
        })
        .sum::<Decimal>()
        / n;

    variance.sqrt()
}

/// Projects the balance forward one point per day for `horizon_days`.
///
/// Balances extrapolate linearly from the last observed balance. The
/// confidence half-width grows as `base_uncertainty * sqrt(day)`, modeling
/// accumulating independent daily variance. The interval stays symmetric
/// around the forecast even when the balance is negative.
pub fn project(
    history: &[HistoricalPoint],
    estimate: &TrendEstimate,
    horizon_days: u32,
) -> Result<Vec<ForecastPoint>> {
    let last = history.last().ok_or_else(|| {
        ForecastError::Calculation("Cannot project from an empty history".to_string())
    })?;

    let base_uncertainty = flow_volatility(history)
        .unwrap_or_else(|| last.running_balance.abs() * FALLBACK_UNCERTAINTY_RATIO);

    let mut forecast = Vec::with_capacity(horizon_days as usize);
    let mut date = last.date;
    for day in 1..=horizon_days {
        date = date.succ_opt().ok_or_else(|| {
            ForecastError::Calculation(format!("Date overflow advancing past {}", date))
        })?;

        let day_offset = Decimal::from(day);
        let forecasted_balance = (last.running_balance + estimate.daily_delta * day_offset)
            .round_dp(DECIMAL_PRECISION);
        let half_width = day_offset
            .sqrt()
            .map(|root| (base_uncertainty * root).round_dp(DECIMAL_PRECISION))
            .ok_or_else(|| {
                ForecastError::Calculation(format!("Square root undefined for day offset {}", day))
            })?;

        forecast.push(ForecastPoint {
            date,
            forecasted_balance,
            confidence_interval: ConfidenceInterval {
                lower: forecasted_balance - half_width,
                upper: forecasted_balance + half_width,
            },
            trend: estimate.trend,
        });
    }

    Ok(forecast)
}
