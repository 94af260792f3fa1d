use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    routing::get,
    Json, Router,
};

use barberledger_core::transactions::{NewTransaction, Transaction};

use super::shared::parse_date_optional;
use crate::{
    auth::AuthPrincipal,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(serde::Deserialize)]
struct TransactionsQuery {
    #[serde(rename = "unitId")]
    unit_id: String,
    #[serde(rename = "accountId")]
    account_id: Option<String>,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthPrincipal>,
    Query(q): Query<TransactionsQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    if !principal.has_unit_access(&q.unit_id) {
        return Err(ApiError::Forbidden(format!(
            "No access to unit {}",
            q.unit_id
        )));
    }

    let start = parse_date_optional(q.start_date, "startDate")?;
    let end = parse_date_optional(q.end_date, "endDate")?;

    let transactions =
        state
            .transaction_service
            .list_transactions(&q.unit_id, q.account_id.as_deref(), start, end)?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthPrincipal>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    if !principal.has_unit_access(&payload.unit_id) {
        return Err(ApiError::Forbidden(format!(
            "No access to unit {}",
            payload.unit_id
        )));
    }

    let created = state.transaction_service.create_transaction(payload).await?;
    Ok(Json(created))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/transactions",
        get(list_transactions).post(create_transaction),
    )
}
