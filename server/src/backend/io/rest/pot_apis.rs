//! # REST API for savings pots

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::backend::domain::DomainError;
use crate::backend::io::rest::mappers::pot_mapper::PotMapper;
use crate::backend::AppState;
use shared::{CreatePotRequest, PotMoneyRequest, PotResponse, UpdatePotRequest};

/// Create the pot API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pots).post(create_pot))
        .route("/:id", get(get_pot).put(update_pot).delete(delete_pot))
        .route("/:id/deposit", post(deposit_money))
        .route("/:id/withdraw", post(withdraw_money))
}

pub async fn list_pots(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/pots");

    let result = state.pot_service.list_pots().await?;
    Ok(Json(PotMapper::to_list_response(result)))
}

pub async fn create_pot(
    State(state): State<AppState>,
    Json(request): Json<CreatePotRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("POST /api/pots - request: {:?}", request);

    let pot = state
        .pot_service
        .create_pot(PotMapper::to_create_command(request))
        .await?;

    let response = PotResponse {
        pot: PotMapper::to_dto(pot),
        success_message: "Pot created successfully".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_pot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    info!("GET /api/pots/{}", id);

    let pot = state.pot_service.get_pot(&id).await?;
    Ok(Json(PotMapper::to_dto(pot)))
}

pub async fn update_pot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePotRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("PUT /api/pots/{} - request: {:?}", id, request);

    let pot = state
        .pot_service
        .update_pot(&id, PotMapper::to_update_command(request))
        .await?;

    Ok(Json(PotResponse {
        pot: PotMapper::to_dto(pot),
        success_message: "Pot updated successfully".to_string(),
    }))
}

pub async fn delete_pot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    info!("DELETE /api/pots/{}", id);

    state.pot_service.delete_pot(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn deposit_money(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PotMoneyRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("POST /api/pots/{}/deposit - request: {:?}", id, request);

    let pot = state.pot_service.deposit(&id, request.amount).await?;
    let success_message = format!("Added ${:.2} to {}", request.amount, pot.pot.name);

    Ok(Json(PotResponse {
        pot: PotMapper::to_dto(pot),
        success_message,
    }))
}

pub async fn withdraw_money(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PotMoneyRequest>,
) -> Result<impl IntoResponse, DomainError> {
    info!("POST /api/pots/{}/withdraw - request: {:?}", id, request);

    let pot = state.pot_service.withdraw(&id, request.amount).await?;
    let success_message = format!("Withdrew ${:.2} from {}", request.amount, pot.pot.name);

    Ok(Json(PotResponse {
        pot: PotMapper::to_dto(pot),
        success_message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::DbConnection;
    use axum::{
        body::Body,
        http::{Method, Request},
        response::Response,
    };
    use serde_json::{json, Value};
    use shared::{ErrorResponse, Pot, PotListResponse};
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_test_app() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        router().with_state(AppState::new(db))
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

    async fn create_pot(app: &Router, name: &str, target: f64, total: f64) -> Pot {
        let response = send(
            app,
            Method::POST,
            "/",
            Some(json!({ "name": name, "target": target, "theme": "#277C78", "total": total })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: PotResponse = read_json(response).await;
        created.pot
    }

    #[tokio::test]
    async fn test_create_pot_reports_progress() {
        let app = setup_test_app().await;

        let pot = create_pot(&app, "Savings", 2000.0, 159.0).await;

        assert_eq!(pot.percentage, 8);
        assert_eq!(pot.total, 159.0);
    }

    #[tokio::test]
    async fn test_duplicate_pot_name_conflicts() {
        let app = setup_test_app().await;
        create_pot(&app, "Holiday", 1440.0, 0.0).await;

        let response = send(
            &app,
            Method::POST,
            "/",
            Some(json!({ "name": "Holiday", "target": 500.0, "theme": "#82C9D7" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error, "conflict");
    }

    #[tokio::test]
    async fn test_deposit_and_withdraw() {
        let app = setup_test_app().await;
        let pot = create_pot(&app, "Gift", 60.0, 10.0).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/{}/deposit", pot.id),
            Some(json!({ "amount": 50.0 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let deposited: PotResponse = read_json(response).await;
        assert_eq!(deposited.pot.total, 60.0);
        assert_eq!(deposited.pot.percentage, 100);

        let response = send(
            &app,
            Method::POST,
            &format!("/{}/withdraw", pot.id),
            Some(json!({ "amount": 25.0 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let withdrawn: PotResponse = read_json(response).await;
        assert_eq!(withdrawn.pot.total, 35.0);
    }

    #[tokio::test]
    async fn test_withdraw_more_than_total_is_rejected() {
        let app = setup_test_app().await;
        let pot = create_pot(&app, "Concert Ticket", 150.0, 110.0).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/{}/withdraw", pot.id),
            Some(json!({ "amount": 200.0 })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error, "insufficient_funds");

        let response = send(&app, Method::GET, &format!("/{}", pot.id), None).await;
        let unchanged: Pot = read_json(response).await;
        assert_eq!(unchanged.total, 110.0);
    }

    #[tokio::test]
    async fn test_list_update_delete_pots() {
        let app = setup_test_app().await;
        let pot = create_pot(&app, "New Laptop", 1000.0, 10.0).await;
        create_pot(&app, "Savings", 2000.0, 159.0).await;

        let response = send(&app, Method::GET, "/", None).await;
        let list: PotListResponse = read_json(response).await;
        assert_eq!(list.pots.len(), 2);
        assert_eq!(list.total_saved, 169.0);

        let uri = format!("/{}", pot.id);
        let response = send(&app, Method::PUT, &uri, Some(json!({ "target": 1200.0 }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: PotResponse = read_json(response).await;
        assert_eq!(updated.pot.target, 1200.0);
        assert_eq!(updated.pot.name, "New Laptop");

        let response = send(&app, Method::PUT, &uri, Some(json!({ "name": "Savings" }))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, "/", None).await;
        let list: PotListResponse = read_json(response).await;
        assert_eq!(list.pots.len(), 1);
    }
}
