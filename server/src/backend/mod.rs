//! # Backend Module
//!
//! Everything behind the HTTP port of the finance dashboard.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (services, reconciler, classifier, aggregation)
//!     ↓
//! Storage Layer (SQLite repositories, ledger store)
//! ```
//!
//! This module wires the layers together: it opens the database, builds the
//! services and assembles the axum router.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::backend::domain::{
    BillService, BudgetService, OverviewService, PotService, TransactionService,
};
use crate::backend::storage::DbConnection;
use crate::config::AppConfig;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService,
    pub budget_service: BudgetService,
    pub bill_service: BillService,
    pub pot_service: PotService,
    pub overview_service: OverviewService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        let transaction_service = TransactionService::new(db.clone());
        let budget_service = BudgetService::new(db.clone());
        let bill_service = BillService::new(db.clone());
        let pot_service = PotService::new(db);
        let overview_service = OverviewService::new(
            transaction_service.clone(),
            budget_service.clone(),
            bill_service.clone(),
            pot_service.clone(),
        );

        Self {
            transaction_service,
            budget_service,
            bill_service,
            pot_service,
            overview_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    info!("Setting up application state");
    let state = AppState::new(db);

    // The database may have been edited while the server was down.
    let report = state.budget_service.find_drift().await?;
    if !report.drifted.is_empty() {
        info!("Repairing {} drifted budget(s) at start-up", report.drifted.len());
        state.budget_service.reconcile_all().await?;
    }

    Ok(state)
}

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/transactions", io::rest::transaction_apis::router())
        .nest("/budgets", io::rest::budget_apis::router())
        .nest("/bills", io::rest::bill_apis::router())
        .nest("/pots", io::rest::pot_apis::router())
        .merge(io::rest::analytics_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
