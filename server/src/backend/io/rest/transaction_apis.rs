//! # REST API for the transaction ledger
//!
//! Every write goes through `TransactionService`, which reconciles the
//! budgets of each affected category in the same database transaction and
//! reports them back in the response.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::backend::domain::DomainError;
use crate::backend::io::rest::mappers::transaction_mapper::TransactionMapper;
use crate::backend::AppState;
use shared::{CreateTransactionRequest, TransactionListRequest, UpdateTransactionRequest};

/// Create the transaction API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route(
            "/:id",
            get(get_transaction).put(update_transaction).delete(delete_transaction),
        )
}

/// List transactions with search, filters, sort and paging
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(request): Query<TransactionListRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/transactions - request: {:?}", request);

    let query = TransactionMapper::to_list_query(request);
    let result = state.transaction_service.list_transactions(query).await?;

    Ok(Json(TransactionMapper::to_list_response(result)))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("POST /api/transactions - request: {:?}", request);

    let command = TransactionMapper::to_create_command(request)?;
    let result = state.transaction_service.create_transaction(command).await?;

    let response = TransactionMapper::to_mutation_response(result, "Transaction created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/transactions/{}", id);

    let transaction = state.transaction_service.get_transaction(&id).await?;
    Ok(Json(TransactionMapper::to_dto(transaction)))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("PUT /api/transactions/{} - request: {:?}", id, request);

    let command = TransactionMapper::to_update_command(request)?;
    let result = state.transaction_service.update_transaction(&id, command).await?;

    Ok(Json(TransactionMapper::to_mutation_response(
        result,
        "Transaction updated successfully",
    )))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    info!("DELETE /api/transactions/{}", id);

    let result = state.transaction_service.delete_transaction(&id).await?;
    Ok(Json(TransactionMapper::to_delete_response(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::budgets::CreateBudgetCommand;
    use crate::backend::domain::models::budget::BudgetPeriod;
    use crate::backend::storage::DbConnection;
    use axum::{
        body::Body,
        http::{Method, Request},
        response::Response,
    };
    use serde_json::{json, Value};
    use shared::{
        DeleteTransactionResponse, ErrorResponse, Transaction, TransactionListResponse,
        TransactionMutationResponse, TransactionType,
    };
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_test_app() -> (Router, AppState) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let state = AppState::new(db);
        (router().with_state(state.clone()), state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create_bills_budget(state: &AppState) -> String {
        state
            .budget_service
            .create_budget(CreateBudgetCommand {
                category: "Bills".to_string(),
                amount: 400.0,
                period: BudgetPeriod::Monthly,
                start_date: None,
                end_date: None,
                alerts: None,
            })
            .await
            .unwrap()
            .budget
            .id
    }

    #[tokio::test]
    async fn test_create_transaction_reconciles_budget() {
        let (app, state) = setup_test_app().await;
        let budget_id = create_bills_budget(&state).await;

        let response = send(
            &app,
            Method::POST,
            "/",
            Some(json!({
                "description": "Electricity",
                "amount": 100.0,
                "category": "Bills",
                "transaction_type": "expense",
                "date": "2024-08-01"
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: TransactionMutationResponse = read_json(response).await;
        assert_eq!(created.transaction.amount, 100.0);
        assert_eq!(created.transaction.date, "2024-08-01");
        assert_eq!(created.reconciled_budgets.len(), 1);
        assert_eq!(created.reconciled_budgets[0].budget_id, budget_id);
        assert_eq!(created.reconciled_budgets[0].spent, 100.0);

        let budget = state.budget_service.get_budget(&budget_id).await.unwrap();
        assert_eq!(budget.budget.spent, 100.0);
    }

    #[tokio::test]
    async fn test_create_transaction_with_signed_amount() {
        let (app, _) = setup_test_app().await;

        let response = send(
            &app,
            Method::POST,
            "/",
            Some(json!({ "description": "Coffee", "amount": -3.5, "category": "Dining Out" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: TransactionMutationResponse = read_json(response).await;
        assert_eq!(created.transaction.amount, 3.5);
        assert_eq!(created.transaction.transaction_type, TransactionType::Expense);
    }

    #[tokio::test]
    async fn test_create_transaction_validation_error() {
        let (app, _) = setup_test_app().await;

        let response = send(
            &app,
            Method::POST,
            "/",
            Some(json!({
                "description": "",
                "amount": 10.0,
                "category": "Groceries",
                "transaction_type": "expense"
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error, "validation_error");
    }

    #[tokio::test]
    async fn test_get_missing_transaction_returns_404() {
        let (app, _) = setup_test_app().await;

        let response = send(&app, Method::GET, "/does-not-exist", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error, "not_found");
        assert!(error.message.contains("does-not-exist"));
    }

    #[tokio::test]
    async fn test_list_transactions_with_filters() {
        let (app, _) = setup_test_app().await;

        for (description, amount, category, date) in [
            ("Salary", 3000.0, "Income", "2024-08-01"),
            ("Groceries run", -82.4, "Groceries", "2024-08-03"),
            ("Farmers market", -21.0, "Groceries", "2024-08-10"),
        ] {
            let response = send(
                &app,
                Method::POST,
                "/",
                Some(json!({
                    "description": description,
                    "amount": amount,
                    "category": category,
                    "date": date
                })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(
            &app,
            Method::GET,
            "/?category=Groceries&sort=highest",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let list: TransactionListResponse = read_json(response).await;
        assert_eq!(list.total_count, 2);
        assert_eq!(list.transactions[0].amount, 82.4);

        let response = send(&app, Method::GET, "/?search=market&limit=1", None).await;
        let list: TransactionListResponse = read_json(response).await;
        assert_eq!(list.total_count, 1);
        assert_eq!(list.transactions[0].description, "Farmers market");

        let response = send(&app, Method::GET, "/?limit=1&offset=1", None).await;
        let list: TransactionListResponse = read_json(response).await;
        assert_eq!(list.total_count, 3);
        assert_eq!(list.transactions.len(), 1);
        assert_eq!(list.transactions[0].description, "Groceries run");
    }

    #[tokio::test]
    async fn test_amount_only_update_keeps_expense_in_budget() {
        let (app, state) = setup_test_app().await;
        let budget_id = create_bills_budget(&state).await;

        let response = send(
            &app,
            Method::POST,
            "/",
            Some(json!({
                "description": "Electricity",
                "amount": 100.0,
                "category": "Bills",
                "transaction_type": "expense"
            })),
        )
        .await;
        let created: TransactionMutationResponse = read_json(response).await;

        let uri = format!("/{}", created.transaction.id);
        let response = send(&app, Method::PUT, &uri, Some(json!({ "amount": 120.0 }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: TransactionMutationResponse = read_json(response).await;
        assert_eq!(updated.transaction.transaction_type, TransactionType::Expense);
        assert_eq!(updated.transaction.amount, 120.0);

        let budget = state.budget_service.get_budget(&budget_id).await.unwrap();
        assert_eq!(budget.budget.spent, 120.0);
    }

    #[tokio::test]
    async fn test_update_and_delete_transaction() {
        let (app, state) = setup_test_app().await;
        let budget_id = create_bills_budget(&state).await;

        let response = send(
            &app,
            Method::POST,
            "/",
            Some(json!({
                "description": "Water",
                "amount": 40.0,
                "category": "Bills",
                "transaction_type": "expense"
            })),
        )
        .await;
        let created: TransactionMutationResponse = read_json(response).await;
        let uri = format!("/{}", created.transaction.id);

        let response = send(&app, Method::PUT, &uri, Some(json!({ "amount": 65.0 }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: TransactionMutationResponse = read_json(response).await;
        assert_eq!(updated.transaction.amount, 65.0);
        assert_eq!(updated.reconciled_budgets[0].spent, 65.0);

        let response = send(&app, Method::GET, &uri, None).await;
        let fetched: Transaction = read_json(response).await;
        assert_eq!(fetched.description, "Water");

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let deleted: DeleteTransactionResponse = read_json(response).await;
        assert_eq!(deleted.deleted_id, created.transaction.id);
        assert_eq!(deleted.reconciled_budgets[0].spent, 0.0);

        let budget = state.budget_service.get_budget(&budget_id).await.unwrap();
        assert_eq!(budget.budget.spent, 0.0);

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
