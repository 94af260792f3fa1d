use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use barberledger_core::forecast::{
    ForecastPoint, ForecastSummary, HistoricalWindow, FORECAST_HORIZONS,
};

use super::shared;
use crate::{
    auth::AuthPrincipal,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(serde::Deserialize)]
pub(crate) struct CashflowForecastQuery {
    /// Unit to forecast. Required.
    #[serde(rename = "unitId")]
    unit_id: Option<String>,
    /// Optional bank-account filter.
    #[serde(rename = "accountId")]
    account_id: Option<String>,
    /// Forecast horizon in days: 30, 60, or 90.
    days: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CashflowForecastResponse {
    success: bool,
    unit_id: String,
    account_id: Option<String>,
    period: u32,
    historical: HistoricalWindow,
    forecast: Vec<ForecastPoint>,
    summary: ForecastSummary,
    cached: bool,
    correlation_id: String,
    duration_ms: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/forecasts/cashflow",
    responses(
        (status = 200, description = "Cash-flow forecast for the unit"),
        (status = 400, description = "Missing unitId or unsupported days value"),
        (status = 404, description = "No historical data in the lookback window"),
    )
)]
pub(crate) async fn get_cashflow_forecast(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthPrincipal>,
    headers: HeaderMap,
    Query(q): Query<CashflowForecastQuery>,
) -> ApiResult<Json<CashflowForecastResponse>> {
    let started = Instant::now();
    let correlation_id = shared::correlation_id(&headers);

    let unit_id = q
        .unit_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("unitId is required".to_string()))?;

    let raw_days = q
        .days
        .ok_or_else(|| ApiError::BadRequest("days must be one of 30, 60 or 90".to_string()))?;
    let days: u32 = raw_days
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid days value: {}", raw_days)))?;
    if !FORECAST_HORIZONS.contains(&days) {
        return Err(ApiError::BadRequest(format!(
            "days must be one of 30, 60 or 90, got {}",
            days
        )));
    }

    if !principal.has_unit_access(&unit_id) {
        return Err(ApiError::Forbidden(format!("No access to unit {}", unit_id)));
    }

    let forecast = state
        .forecast_service
        .get_cashflow_forecast(&unit_id, q.account_id.as_deref(), days)
        .await?;

    Ok(Json(CashflowForecastResponse {
        success: true,
        unit_id: forecast.unit_id,
        account_id: forecast.account_id,
        period: forecast.horizon_days,
        historical: forecast.historical,
        forecast: forecast.forecast,
        summary: forecast.summary,
        cached: forecast.cached,
        correlation_id,
        duration_ms: started.elapsed().as_millis() as u64,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/forecasts/cashflow", get(get_cashflow_forecast))
}
