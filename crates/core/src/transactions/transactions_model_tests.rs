//! Unit tests for transaction models.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn transaction(kind: TransactionKind, amount: rust_decimal::Decimal) -> Transaction {
    Transaction {
        id: "tx-1".to_string(),
        unit_id: "unit-1".to_string(),
        account_id: None,
        kind,
        amount,
        transaction_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        description: None,
        created_at: NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    }
}

#[test]
fn signed_amount_is_positive_for_revenue() {
    let tx = transaction(TransactionKind::Revenue, dec!(150.00));
    assert_eq!(tx.signed_amount(), dec!(150.00));
}

#[test]
fn signed_amount_is_negative_for_expense() {
    let tx = transaction(TransactionKind::Expense, dec!(42.50));
    assert_eq!(tx.signed_amount(), dec!(-42.50));
}

#[test]
fn kind_round_trips_through_str() {
    assert_eq!(
        TransactionKind::from_str("REVENUE").unwrap(),
        TransactionKind::Revenue
    );
    assert_eq!(
        TransactionKind::from_str("EXPENSE").unwrap(),
        TransactionKind::Expense
    );
    assert!(TransactionKind::from_str("TRANSFER").is_err());
}

#[test]
fn new_transaction_rejects_non_positive_amounts() {
    let new_tx = NewTransaction {
        id: None,
        unit_id: "unit-1".to_string(),
        account_id: None,
        kind: TransactionKind::Revenue,
        amount: dec!(0),
        transaction_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        description: None,
    };
    assert!(new_tx.validate().is_err());

    let negative = NewTransaction {
        amount: dec!(-10),
        ..new_tx
    };
    assert!(negative.validate().is_err());
}

#[test]
fn new_transaction_requires_unit_id() {
    let new_tx = NewTransaction {
        id: None,
        unit_id: "  ".to_string(),
        account_id: None,
        kind: TransactionKind::Expense,
        amount: dec!(10),
        transaction_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        description: None,
    };
    assert!(new_tx.validate().is_err());
}
