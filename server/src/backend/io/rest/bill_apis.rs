//! # REST API for recurring bills
//!
//! Bill status (`paid`, `pending`, `overdue`) and urgency are computed
//! against the request time; they are never stored.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use tracing::info;

use crate::backend::domain::DomainError;
use crate::backend::io::rest::mappers::bill_mapper::BillMapper;
use crate::backend::AppState;
use shared::{
    BillListRequest, BillListResponse, BillResponse, CreateBillRequest, PayBillRequest,
    UpdateBillRequest,
};

/// Create the bill API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bills).post(create_bill))
        .route("/summary", get(get_bill_summary))
        .route("/:id", get(get_bill).put(update_bill).delete(delete_bill))
        .route("/:id/pay", post(pay_bill))
}

pub async fn list_bills(
    State(state): State<AppState>,
    Query(request): Query<BillListRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/bills - request: {:?}", request);

    let query = BillMapper::to_list_query(request);
    let bills = state.bill_service.list_bills(query, Utc::now()).await?;

    Ok(Json(BillListResponse {
        bills: BillMapper::to_dto_list(bills),
    }))
}

pub async fn create_bill(
    State(state): State<AppState>,
    Json(request): Json<CreateBillRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("POST /api/bills - request: {:?}", request);

    let command = BillMapper::to_create_command(request)?;
    let bill = state.bill_service.create_bill(command, Utc::now()).await?;

    let response = BillResponse {
        bill: BillMapper::to_dto(bill),
        success_message: "Bill created successfully".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/bills/{}", id);

    let bill = state.bill_service.get_bill(&id, Utc::now()).await?;
    Ok(Json(BillMapper::to_dto(bill)))
}

pub async fn update_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBillRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("PUT /api/bills/{} - request: {:?}", id, request);

    let command = BillMapper::to_update_command(request)?;
    let bill = state.bill_service.update_bill(&id, command, Utc::now()).await?;

    Ok(Json(BillResponse {
        bill: BillMapper::to_dto(bill),
        success_message: "Bill updated successfully".to_string(),
    }))
}

pub async fn delete_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    info!("DELETE /api/bills/{}", id);

    state.bill_service.delete_bill(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark a bill paid. The body is optional; without it no expense is recorded.
pub async fn pay_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Option<Json<PayBillRequest>>,
) -> Result<impl IntoResponse, DomainError> {
    let request = request.map(|Json(body)| body).unwrap_or_default();
    info!("POST /api/bills/{}/pay - request: {:?}", id, request);

    let result = state
        .bill_service
        .pay_bill(&id, request.record_transaction, Utc::now())
        .await?;

    Ok(Json(BillMapper::to_pay_response(result)))
}

/// Totals of paid, upcoming, due-soon and overdue bills
pub async fn get_bill_summary(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/bills/summary");

    let summary = state.bill_service.bill_summary(Utc::now()).await?;
    Ok(Json(BillMapper::summary_to_dto(summary)))
}
