use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    routing::get,
    Json, Router,
};

use barberledger_core::units::{NewUnit, Unit};

use crate::{
    auth::AuthPrincipal,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn list_units(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthPrincipal>,
) -> ApiResult<Json<Vec<Unit>>> {
    let units = state
        .unit_service
        .list_units()?
        .into_iter()
        .filter(|u| principal.has_unit_access(&u.id))
        .collect();
    Ok(Json(units))
}

async fn get_unit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthPrincipal>,
) -> ApiResult<Json<Unit>> {
    if !principal.has_unit_access(&id) {
        return Err(ApiError::Forbidden(format!("No access to unit {}", id)));
    }
    let unit = state.unit_service.get_unit(&id)?;
    Ok(Json(unit))
}

async fn create_unit(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUnit>,
) -> ApiResult<Json<Unit>> {
    let created = state.unit_service.create_unit(payload).await?;
    Ok(Json(created))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/units", get(list_units).post(create_unit))
        .route("/units/{id}", get(get_unit))
}
