//! Unit tests for the history aggregator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::history_aggregator::{build_daily_history, window_start};
use crate::errors::Error;
use crate::forecast::ForecastError;
use crate::transactions::{Transaction, TransactionKind};

fn tx(date: NaiveDate, kind: TransactionKind, amount: Decimal) -> Transaction {
    Transaction {
        id: format!("tx-{}-{}", date, amount),
        unit_id: "unit-1".to_string(),
        account_id: None,
        kind,
        amount,
        transaction_date: date,
        description: None,
        created_at: date.and_hms_opt(9, 0, 0).unwrap(),
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
}

#[test]
fn fills_gaps_and_chains_running_balance() {
    let transactions = vec![
        tx(day(22), TransactionKind::Revenue, dec!(100)),
        tx(day(25), TransactionKind::Expense, dec!(40)),
        tx(day(25), TransactionKind::Revenue, dec!(10)),
        tx(day(28), TransactionKind::Revenue, dec!(5)),
    ];

    let history =
        build_daily_history("unit-1", &transactions, dec!(1000), day(30), 10).unwrap();

    assert_eq!(history.len(), 10);
    assert_eq!(history.first().unwrap().date, day(21));
    assert_eq!(history.last().unwrap().date, day(30));

    // No missing calendar days, and each balance equals the previous one
    // plus the day's flow.
    for pair in history.windows(2) {
        assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        assert_eq!(
            pair[1].running_balance,
            pair[0].running_balance + pair[1].net_flow
        );
    }

    // Day with two transactions nets them out.
    let busy_day = history.iter().find(|p| p.date == day(25)).unwrap();
    assert_eq!(busy_day.net_flow, dec!(-30));

    // Quiet days carry zero flow.
    let quiet_day = history.iter().find(|p| p.date == day(24)).unwrap();
    assert_eq!(quiet_day.net_flow, dec!(0));

    assert_eq!(history.last().unwrap().running_balance, dec!(1075));
}

#[test]
fn starts_from_the_opening_balance() {
    let transactions = vec![tx(day(21), TransactionKind::Revenue, dec!(50))];
    let history =
        build_daily_history("unit-1", &transactions, dec!(-200), day(30), 10).unwrap();

    assert_eq!(history.first().unwrap().running_balance, dec!(-150));
    assert_eq!(history.last().unwrap().running_balance, dec!(-150));
}

#[test]
fn rejects_an_empty_window() {
    let err = build_daily_history("unit-1", &[], dec!(1000), day(30), 10).unwrap_err();
    assert!(matches!(
        err,
        Error::Forecast(ForecastError::InsufficientData {
            lookback_days: 10,
            ..
        })
    ));
}

#[test]
fn ignores_transactions_outside_the_window() {
    // Only transaction is dated before the window opens.
    let transactions = vec![tx(day(1), TransactionKind::Revenue, dec!(100))];
    let err = build_daily_history("unit-1", &transactions, dec!(0), day(30), 10).unwrap_err();
    assert!(matches!(
        err,
        Error::Forecast(ForecastError::InsufficientData { .. })
    ));
}

#[test]
fn window_start_counts_the_end_day() {
    assert_eq!(window_start(day(30), 10), day(21));
    assert_eq!(window_start(day(30), 1), day(30));
}
