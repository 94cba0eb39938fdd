//! # Domain Module
//!
//! Business rules of the finance dashboard, independent of HTTP and of the
//! storage engine.
//!
//! ## Core engine
//!
//! - **reconciler**: keeps each budget's cached `spent` equal to the ledger
//! - **classifier**: bill status and due urgency, budget alert status, pot progress
//! - **aggregation**: category totals, monthly series, net cash flow, balance
//!
//! ## Services
//!
//! One service per entity (transactions, budgets, bills, pots) plus the
//! read-only overview. Each mutating operation is a single database
//! transaction.
//!
//! ## Business Rules
//!
//! - Amounts are positive magnitudes; the transaction type carries direction
//! - A budget's `spent` is never written directly, only recomputed
//! - Bill status is derived at read time and never stored
//! - Pot totals never go negative and pot names are unique

pub mod aggregation;
pub mod bill_service;
pub mod budget_service;
pub mod classifier;
pub mod commands;
pub mod errors;
pub mod models;
pub mod overview_service;
pub mod pot_service;
pub mod reconciler;
pub mod sorting;
pub mod transaction_service;

pub use bill_service::BillService;
pub use budget_service::BudgetService;
pub use errors::{DomainError, DomainResult};
pub use overview_service::OverviewService;
pub use pot_service::PotService;
pub use reconciler::BudgetReconciler;
pub use transaction_service::TransactionService;
