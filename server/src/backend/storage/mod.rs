//! # Storage Module
//!
//! Persistence for the ledger, budgets, bills and pots.
//!
//! Repositories are stateless structs whose functions take an explicit
//! `SqliteConnection`. Services pass `&mut *tx` from an open database
//! transaction so that a ledger write and the budget reconciliation it
//! triggers commit or roll back together.
//!
//! The [`LedgerStore`] trait is the narrow read view of the ledger that the
//! budget reconciler depends on.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use memory::InMemoryLedger;
pub use repositories::*;
pub use traits::{AmountSign, LedgerFilter, LedgerStore};
