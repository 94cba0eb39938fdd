//! # REST API Interface Layer
//!
//! One router per resource, nested under `/api` by
//! [`create_router`](crate::backend::create_router):
//!
//! - `/transactions`: ledger CRUD; every write reconciles affected budgets
//! - `/budgets`: budgets with status, plus `/reconcile` and `/drift`
//! - `/bills`: bills with derived status, `/summary` and `/:id/pay`
//! - `/pots`: savings pots with `/:id/deposit` and `/:id/withdraw`
//! - `/analytics/*` and `/overview`: read-only aggregates
//!
//! Handlers contain no business logic. Errors are returned as
//! `DomainError`, whose `IntoResponse` impl picks the status code.

pub mod analytics_apis;
pub mod bill_apis;
pub mod budget_apis;
pub mod error;
pub mod mappers;
pub mod pot_apis;
pub mod transaction_apis;
