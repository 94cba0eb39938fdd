//! # REST API for budgets
//!
//! Budgets are returned with their derived status. `spent` is read-only
//! here: it changes only through ledger writes or `/reconcile`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::backend::domain::DomainError;
use crate::backend::io::rest::mappers::budget_mapper::BudgetMapper;
use crate::backend::io::rest::mappers::transaction_mapper::TransactionMapper;
use crate::backend::AppState;
use shared::{
    BudgetListResponse, BudgetResponse, CreateBudgetRequest, ReconcileResponse,
    UpdateBudgetRequest,
};

/// Create the budget API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/reconcile", post(reconcile_budgets))
        .route("/drift", get(get_drift_report))
        .route("/:id", get(get_budget).put(update_budget).delete(delete_budget))
}

pub async fn list_budgets(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/budgets");

    let budgets = state.budget_service.list_budgets().await?;
    Ok(Json(BudgetListResponse {
        budgets: BudgetMapper::to_dto_list(budgets),
    }))
}

pub async fn create_budget(
    State(state): State<AppState>,
    Json(request): Json<CreateBudgetRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("POST /api/budgets - request: {:?}", request);

    let command = BudgetMapper::to_create_command(request)?;
    let budget = state.budget_service.create_budget(command).await?;

    let response = BudgetResponse {
        budget: BudgetMapper::to_dto(budget),
        success_message: "Budget created successfully".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_budget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/budgets/{}", id);

    let budget = state.budget_service.get_budget(&id).await?;
    Ok(Json(BudgetMapper::to_dto(budget)))
}

pub async fn update_budget(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBudgetRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("PUT /api/budgets/{} - request: {:?}", id, request);

    let command = BudgetMapper::to_update_command(request)?;
    let budget = state.budget_service.update_budget(&id, command).await?;

    Ok(Json(BudgetResponse {
        budget: BudgetMapper::to_dto(budget),
        success_message: "Budget updated successfully".to_string(),
    }))
}

pub async fn delete_budget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    info!("DELETE /api/budgets/{}", id);

    state.budget_service.delete_budget(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Recompute every budget's spent total from the ledger
pub async fn reconcile_budgets(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    info!("POST /api/budgets/reconcile");

    let reconciled = state.budget_service.reconcile_all().await?;
    let success_message = format!("Reconciled {} budget(s)", reconciled.len());

    Ok(Json(ReconcileResponse {
        reconciled_budgets: TransactionMapper::reconciled_to_dto(reconciled),
        success_message,
    }))
}

/// Budgets whose cached spent total disagrees with the ledger
pub async fn get_drift_report(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/budgets/drift");

    let report = state.budget_service.find_drift().await?;
    Ok(Json(BudgetMapper::to_drift_response(report)))
}
