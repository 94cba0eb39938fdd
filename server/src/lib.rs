//! Personal finance dashboard backend: ledger, budgets, bills and savings
//! pots behind a JSON API.

pub mod backend;
pub mod config;
