//! Unit tests for the cash-flow forecast service.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::*;
use crate::cache::CacheRepositoryTrait;
use crate::errors::{Error, Result};
use crate::transactions::{NewTransaction, Transaction, TransactionKind, TransactionRepositoryTrait};
use crate::units::{NewUnit, Unit, UnitRepositoryTrait};

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockUnitRepository {
    units: Vec<Unit>,
}

#[async_trait]
impl UnitRepositoryTrait for MockUnitRepository {
    async fn create(&self, _new_unit: NewUnit) -> Result<Unit> {
        unimplemented!()
    }

    fn get_by_id(&self, unit_id: &str) -> Result<Unit> {
        self.units
            .iter()
            .find(|u| u.id == unit_id)
            .cloned()
            .ok_or_else(|| Error::Repository(format!("Unit {} not found", unit_id)))
    }

    fn list(&self, _is_active_filter: Option<bool>) -> Result<Vec<Unit>> {
        Ok(self.units.clone())
    }
}

struct MockTransactionRepository {
    transactions: Vec<Transaction>,
}

#[async_trait]
impl TransactionRepositoryTrait for MockTransactionRepository {
    async fn create(&self, _new_transaction: NewTransaction) -> Result<Transaction> {
        unimplemented!()
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| Error::Repository(format!("Transaction {} not found", transaction_id)))
    }

    fn list_by_unit(&self, unit_id: &str, account_id: Option<&str>) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.unit_id == unit_id)
            .filter(|t| account_id.is_none() || t.account_id.as_deref() == account_id)
            .cloned()
            .collect())
    }

    fn get_in_range(
        &self,
        unit_id: &str,
        account_id: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let mut matches: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.unit_id == unit_id)
            .filter(|t| account_id.is_none() || t.account_id.as_deref() == account_id)
            .filter(|t| t.transaction_date >= start_date && t.transaction_date <= end_date)
            .cloned()
            .collect();
        matches.sort_by_key(|t| t.transaction_date);
        Ok(matches)
    }
}

struct MockCacheRepository {
    entries: RwLock<HashMap<String, String>>,
}

impl MockCacheRepository {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

impl CacheRepositoryTrait for MockCacheRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: String, _ttl: Duration) -> Result<()> {
        self.entries.write().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

/// Cache whose backing store is down.
struct BrokenCacheRepository;

impl CacheRepositoryTrait for BrokenCacheRepository {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Cache("connection refused".to_string()))
    }

    fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<()> {
        Err(Error::Cache("connection refused".to_string()))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn unit(id: &str, opening_balance: Decimal) -> Unit {
    let now = Utc::now().naive_utc();
    Unit {
        id: id.to_string(),
        name: format!("Unit {}", id),
        currency: "BRL".to_string(),
        opening_balance,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn revenue(unit_id: &str, date: NaiveDate, amount: Decimal) -> Transaction {
    Transaction {
        id: format!("tx-{}-{}", unit_id, date),
        unit_id: unit_id.to_string(),
        account_id: None,
        kind: TransactionKind::Revenue,
        amount,
        transaction_date: date,
        description: None,
        created_at: date.and_hms_opt(9, 0, 0).unwrap(),
    }
}

/// 45 quiet days followed by 45 days earning 100/day, ending today.
fn flat_then_rising_transactions(unit_id: &str) -> Vec<Transaction> {
    let today = Utc::now().date_naive();
    (0..45)
        .map(|i| revenue(unit_id, today - Days::new(i), dec!(100)))
        .collect()
}

fn service_with(
    units: Vec<Unit>,
    transactions: Vec<Transaction>,
    cache: Arc<dyn CacheRepositoryTrait>,
) -> CashflowForecastService {
    CashflowForecastService::new(
        Arc::new(MockUnitRepository { units }),
        Arc::new(MockTransactionRepository { transactions }),
        cache,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn truncates_the_projection_to_the_requested_horizon() {
    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(
        vec![unit("u1", dec!(10000))],
        flat_then_rising_transactions("u1"),
        cache,
    );

    for horizon in FORECAST_HORIZONS {
        let forecast = service
            .get_cashflow_forecast("u1", None, horizon)
            .await
            .unwrap();
        assert_eq!(forecast.forecast.len(), horizon as usize);
        assert_eq!(forecast.horizon_days, horizon);
        // History always covers the full lookback, whatever the horizon.
        assert_eq!(forecast.historical.count, FORECAST_LOOKBACK_DAYS as usize);
    }
}

#[tokio::test]
async fn summary_checkpoints_follow_the_horizon() {
    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(
        vec![unit("u1", dec!(10000))],
        flat_then_rising_transactions("u1"),
        cache,
    );

    let short = service.get_cashflow_forecast("u1", None, 30).await.unwrap();
    assert_eq!(
        short.summary.forecasted_balance_30d,
        Some(short.forecast[29].forecasted_balance)
    );
    assert_eq!(short.summary.forecasted_balance_60d, None);
    assert_eq!(short.summary.forecasted_balance_90d, None);

    let long = service.get_cashflow_forecast("u1", None, 90).await.unwrap();
    assert!(long.summary.forecasted_balance_30d.is_some());
    assert!(long.summary.forecasted_balance_60d.is_some());
    assert_eq!(
        long.summary.forecasted_balance_90d,
        Some(long.forecast[89].forecasted_balance)
    );
}

#[tokio::test]
async fn reports_a_rising_trend_consistently() {
    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(
        vec![unit("u1", dec!(10000))],
        flat_then_rising_transactions("u1"),
        cache,
    );

    let forecast = service.get_cashflow_forecast("u1", None, 30).await.unwrap();

    assert_eq!(forecast.summary.trend, TrendDirection::Up);
    assert!(forecast
        .forecast
        .iter()
        .all(|p| p.trend == forecast.summary.trend));
    assert_eq!(forecast.summary.current_balance, dec!(14500));
}

#[tokio::test]
async fn second_request_is_served_from_the_cache() {
    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(
        vec![unit("u1", dec!(10000))],
        flat_then_rising_transactions("u1"),
        cache.clone(),
    );

    let first = service.get_cashflow_forecast("u1", None, 30).await.unwrap();
    assert!(!first.cached);

    let second = service.get_cashflow_forecast("u1", None, 30).await.unwrap();
    assert!(second.cached);
    assert_eq!(second.forecast, first.forecast);
    assert_eq!(second.summary, first.summary);
    assert_eq!(second.historical, first.historical);
}

#[tokio::test]
async fn horizons_are_cached_as_distinct_entries() {
    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(
        vec![unit("u1", dec!(10000))],
        flat_then_rising_transactions("u1"),
        cache.clone(),
    );

    service.get_cashflow_forecast("u1", None, 30).await.unwrap();
    // A 30-day hit does not serve a 60-day request.
    let second = service.get_cashflow_forecast("u1", None, 60).await.unwrap();
    assert!(!second.cached);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn account_filter_is_part_of_the_cache_key() {
    let today = Utc::now().date_naive();
    let mut transactions = flat_then_rising_transactions("u1");
    let mut account_tx = revenue("u1", today, dec!(500));
    account_tx.id = "tx-acct".to_string();
    account_tx.account_id = Some("acct-1".to_string());
    transactions.push(account_tx);

    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(vec![unit("u1", dec!(10000))], transactions, cache.clone());

    let all_accounts = service.get_cashflow_forecast("u1", None, 30).await.unwrap();
    let one_account = service
        .get_cashflow_forecast("u1", Some("acct-1"), 30)
        .await
        .unwrap();

    assert!(!one_account.cached);
    assert_ne!(
        all_accounts.summary.current_balance,
        one_account.summary.current_balance
    );
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn a_broken_cache_never_fails_the_request() {
    let service = service_with(
        vec![unit("u1", dec!(10000))],
        flat_then_rising_transactions("u1"),
        Arc::new(BrokenCacheRepository),
    );

    let first = service.get_cashflow_forecast("u1", None, 30).await.unwrap();
    assert!(!first.cached);

    // Still recomputes rather than erroring on the second pass.
    let second = service.get_cashflow_forecast("u1", None, 30).await.unwrap();
    assert!(!second.cached);
    assert_eq!(second.forecast.len(), 30);
}

#[tokio::test]
async fn unit_without_history_yields_insufficient_data() {
    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(vec![unit("u1", dec!(10000))], Vec::new(), cache.clone());

    let err = service
        .get_cashflow_forecast("u1", None, 30)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Forecast(ForecastError::InsufficientData { .. })
    ));
    // Failures are not cached.
    assert_eq!(cache.len(), 0);
}

#[tokio::test]
async fn rejects_unsupported_horizons() {
    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(
        vec![unit("u1", dec!(10000))],
        flat_then_rising_transactions("u1"),
        cache,
    );

    let err = service
        .get_cashflow_forecast("u1", None, 45)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Forecast(ForecastError::UnsupportedHorizon(45))
    ));
}

#[tokio::test]
async fn unknown_unit_surfaces_the_repository_error() {
    let cache = Arc::new(MockCacheRepository::new());
    let service = service_with(Vec::new(), Vec::new(), cache);

    let err = service
        .get_cashflow_forecast("ghost", None, 30)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Repository(_)));
}
