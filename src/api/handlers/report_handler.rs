//! Daily and monthly revenue reports in shop-local time.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use super::sale_handler::YearMonthQuery;
use crate::api::AppState;
use crate::domain::{DailyReport, DayBounds, MonthBounds, MonthlyReport};
use crate::errors::AppResult;
use crate::types::ApiResponse;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DailyQuery {
    /// Shop-local date `YYYY-MM-DD`; today when omitted
    #[param(example = "2026-01-15")]
    pub date: Option<String>,
}

/// Report routes (admin)
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/daily", get(daily_report))
        .route("/monthly/details", get(monthly_report))
}

#[utoipa::path(
    get,
    path = "/api/reports/daily",
    tag = "Reports",
    params(DailyQuery),
    responses(
        (status = 200, description = "Totals and top three oils for the day", body = DailyReport),
        (status = 400, description = "Invalid date")
    ),
    security(("bearer_auth" = []))
)]
pub async fn daily_report(
    State(state): State<AppState>,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<ApiResponse<DailyReport>>> {
    let day = match query.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => DayBounds::parse(date)?,
        _ => DayBounds::today(Utc::now())?,
    };
    let report = state.report_service.daily(day).await?;
    Ok(Json(ApiResponse::success(report)))
}

#[utoipa::path(
    get,
    path = "/api/reports/monthly/details",
    tag = "Reports",
    params(YearMonthQuery),
    responses(
        (status = 200, description = "Totals and per-oil breakdown for the month", body = MonthlyReport),
        (status = 400, description = "Invalid year or month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn monthly_report(
    State(state): State<AppState>,
    Query(query): Query<YearMonthQuery>,
) -> AppResult<Json<ApiResponse<MonthlyReport>>> {
    let (year, month) = query.parse()?;
    let report = state
        .report_service
        .monthly(MonthBounds::new(year, month)?)
        .await?;
    Ok(Json(ApiResponse::success(report)))
}
