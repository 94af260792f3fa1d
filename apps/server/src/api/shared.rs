use axum::http::HeaderMap;
use chrono::NaiveDate;

use crate::error::ApiError;

/// Correlation id for the current request, assigned by the request-id
/// layer. Also echoed back in the `x-request-id` response header.
pub fn correlation_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Parses an ISO date (YYYY-MM-DD) query value.
pub fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ApiError::BadRequest(format!("Invalid {}: {}", field, e)))
}

/// Parses an optional ISO date query value.
pub fn parse_date_optional(
    raw: Option<String>,
    field: &str,
) -> Result<Option<NaiveDate>, ApiError> {
    raw.map(|value| parse_date(&value, field)).transpose()
}
