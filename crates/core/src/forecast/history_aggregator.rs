//! Historical aggregation: raw transactions to a daily series.

use chrono::{Days, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::forecast_model::{ForecastError, HistoricalPoint};
use crate::errors::Result;
use crate::transactions::Transaction;

/// Reduces a unit's transactions to an ordered, gap-free daily series of
/// net cash flow and running balance.
///
/// The window is the `lookback_days` calendar days ending at `window_end`
/// inclusive, so the result always has exactly `lookback_days` points.
/// Days without transactions carry zero net flow; the running balance
/// chains from `opening_balance` (each day's balance is the previous day's
/// plus that day's flow).
///
/// Fails with [`ForecastError::InsufficientData`] when no transaction falls
/// inside the window, rather than fabricating an all-zero flat history.
pub fn build_daily_history(
    unit_id: &str,
    transactions: &[Transaction],
    opening_balance: Decimal,
    window_end: NaiveDate,
    lookback_days: u32,
) -> Result<Vec<HistoricalPoint>> {
    let window_start = window_start(window_end, lookback_days);

    // Bucket signed flows per calendar day, ignoring anything outside the
    // window.
    let mut flows_by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for tx in transactions {
        if tx.transaction_date < window_start || tx.transaction_date > window_end {
            continue;
        }
        *flows_by_date.entry(tx.transaction_date).or_default() += tx.signed_amount();
    }

    if flows_by_date.is_empty() {
        return Err(ForecastError::InsufficientData {
            unit_id: unit_id.to_string(),
            lookback_days,
        }
        .into());
    }

    let mut history = Vec::with_capacity(lookback_days as usize);
    let mut running_balance = opening_balance;
    let mut date = window_start;
    while date <= window_end {
        let net_flow = flows_by_date.get(&date).copied().unwrap_or(Decimal::ZERO);
        running_balance += net_flow;
        history.push(HistoricalPoint {
            date,
            net_flow,
            running_balance,
        });
        date = date.succ_opt().ok_or_else(|| {
            ForecastError::Calculation(format!("Date overflow advancing past {}", date))
        })?;
    }

    debug!(
        "Aggregated {} transactions into {} daily points for unit {} ({} to {})",
        transactions.len(),
        history.len(),
        unit_id,
        window_start,
        window_end
    );

    Ok(history)
}

/// First day of a lookback window of `lookback_days` ending at `window_end`.
pub fn window_start(window_end: NaiveDate, lookback_days: u32) -> NaiveDate {
    window_end
        .checked_sub_days(Days::new(u64::from(lookback_days.saturating_sub(1))))
        .unwrap_or(window_end)
}
