use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use barberledger_core::{
    cache::CacheRepositoryTrait,
    forecast::{CashflowForecastService, CashflowForecastServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    units::{UnitService, UnitServiceTrait},
};
use barberledger_storage_sqlite::{db, TransactionRepository, UnitRepository};

use crate::{auth::AuthManager, cache::MemoryCacheStore, config::Config};

pub struct AppState {
    pub unit_service: Arc<dyn UnitServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub forecast_service: Arc<dyn CashflowForecastServiceTrait>,
    pub auth: Option<Arc<AuthManager>>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let unit_repository = Arc::new(UnitRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let cache_repository: Arc<dyn CacheRepositoryTrait> = Arc::new(MemoryCacheStore::new());

    let unit_service = Arc::new(UnitService::new(unit_repository.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository.clone(),
        unit_repository.clone(),
    ));
    let forecast_service = Arc::new(CashflowForecastService::new(
        unit_repository,
        transaction_repository,
        cache_repository,
    ));

    let auth = config
        .auth
        .as_ref()
        .map(AuthManager::new)
        .transpose()?
        .map(Arc::new);

    Ok(Arc::new(AppState {
        unit_service,
        transaction_service,
        forecast_service,
        auth,
    }))
}
