//! # REST API for read-only dashboard aggregates

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use tracing::info;

use crate::backend::domain::DomainError;
use crate::backend::io::rest::mappers::analytics_mapper::AnalyticsMapper;
use crate::backend::AppState;

/// Create the analytics API router. Paths are absolute under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics/categories", get(get_category_totals))
        .route("/analytics/monthly", get(get_monthly_series))
        .route("/overview", get(get_overview))
}

/// Income and expense totals per category
pub async fn get_category_totals(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/analytics/categories");

    let totals = state.overview_service.category_totals().await?;
    Ok(Json(AnalyticsMapper::to_category_totals_response(totals)))
}

/// Chronological monthly income/expenses with net cash flow
pub async fn get_monthly_series(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/analytics/monthly");

    let series = state.overview_service.monthly_series().await?;
    Ok(Json(AnalyticsMapper::to_monthly_series_response(series)))
}

pub async fn get_overview(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/overview");

    let overview = state.overview_service.overview(Utc::now()).await?;
    Ok(Json(AnalyticsMapper::to_overview_response(overview)))
}
