//! # IO Module
//!
//! The HTTP boundary. Handlers translate JSON requests into domain commands,
//! call the services held in [`AppState`](crate::backend::AppState) and map
//! results (or [`DomainError`](crate::backend::domain::DomainError)s) back to
//! JSON responses.

pub mod rest;

pub use rest::*;
