//! # Budget Reconciler
//!
//! Keeps every budget's cached `spent` equal to the sum of absolute expense
//! amounts recorded in its category.
//!
//! The reconciler is stateless. Callers hand it the connection of the
//! database transaction that performed the ledger write, so the write and the
//! recomputes it triggers are committed (or rolled back) as one unit.

use anyhow::Result;
use sqlx::SqliteConnection;
use tracing::{info, warn};

use crate::backend::domain::models::transaction::{Transaction, TransactionType};
use crate::backend::storage::{BudgetRepository, LedgerFilter, LedgerStore};

/// Cached and ledger totals closer than this are considered equal
pub const DRIFT_TOLERANCE: f64 = 0.001;

/// A ledger write the reconciler must react to
#[derive(Debug, Clone, Copy)]
pub enum TransactionChange<'a> {
    Created(&'a Transaction),
    Updated {
        before: &'a Transaction,
        after: &'a Transaction,
    },
    Deleted(&'a Transaction),
}

impl<'a> TransactionChange<'a> {
    /// Categories whose budgets must be recomputed, each listed once
    pub fn affected_categories(&self) -> Vec<&'a str> {
        match self {
            TransactionChange::Created(tx) | TransactionChange::Deleted(tx) => {
                vec![tx.category.as_str()]
            }
            TransactionChange::Updated { before, after } => {
                if before.category == after.category {
                    vec![after.category.as_str()]
                } else {
                    vec![before.category.as_str(), after.category.as_str()]
                }
            }
        }
    }
}

/// A budget whose cached spent value was just rewritten
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledBudget {
    pub budget_id: String,
    pub category: String,
    pub spent: f64,
}

/// A budget whose cached spent value disagrees with the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDrift {
    pub budget_id: String,
    pub category: String,
    pub cached_spent: f64,
    pub ledger_spent: f64,
}

pub struct BudgetReconciler;

impl BudgetReconciler {
    /// Spent total for `category` over an in-memory list of transactions
    pub fn spent_from_transactions(transactions: &[Transaction], category: &str) -> f64 {
        transactions
            .iter()
            .filter(|tx| tx.is_expense() && tx.category == category)
            .map(|tx| tx.amount.abs())
            .sum()
    }

    /// Spent total for `category` as currently recorded in the ledger
    pub async fn recompute_spent<S>(store: &mut S, category: &str) -> Result<f64>
    where
        S: LedgerStore + ?Sized,
    {
        store.aggregate_sum(&LedgerFilter::expenses_in(category)).await
    }

    /// Recompute and store `spent` for every budget in `category`.
    /// A category without budgets is a no-op.
    pub async fn reconcile_category(
        conn: &mut SqliteConnection,
        category: &str,
    ) -> Result<Vec<ReconciledBudget>> {
        let budgets = BudgetRepository::list_by_category(conn, category).await?;
        if budgets.is_empty() {
            return Ok(Vec::new());
        }

        let spent = Self::recompute_spent(&mut *conn, category).await?;

        let mut reconciled = Vec::with_capacity(budgets.len());
        for budget in budgets {
            BudgetRepository::update_spent(conn, &budget.id, spent).await?;
            info!(
                "Reconciled budget {} ({}): spent {:.2} -> {:.2}",
                budget.id, category, budget.spent, spent
            );
            reconciled.push(ReconciledBudget {
                budget_id: budget.id,
                category: category.to_string(),
                spent,
            });
        }

        Ok(reconciled)
    }

    /// Reconcile every budget touched by a transaction write
    pub async fn on_transaction_change(
        conn: &mut SqliteConnection,
        change: &TransactionChange<'_>,
    ) -> Result<Vec<ReconciledBudget>> {
        let mut reconciled = Vec::new();
        for category in change.affected_categories() {
            reconciled.extend(Self::reconcile_category(conn, category).await?);
        }
        Ok(reconciled)
    }

    /// Recompute every budget from the ledger
    pub async fn reconcile_all(conn: &mut SqliteConnection) -> Result<Vec<ReconciledBudget>> {
        let budgets = BudgetRepository::list(conn).await?;

        let mut categories: Vec<String> = budgets.into_iter().map(|b| b.category).collect();
        categories.dedup();

        let mut reconciled = Vec::new();
        for category in &categories {
            reconciled.extend(Self::reconcile_category(conn, category).await?);
        }

        info!("Reconciled {} budgets across {} categories", reconciled.len(), categories.len());
        Ok(reconciled)
    }

    /// Budgets whose cached spent value no longer matches the ledger.
    /// Reads the expense ledger once and totals each category from that
    /// snapshot.
    pub async fn find_drift(conn: &mut SqliteConnection) -> Result<Vec<BudgetDrift>> {
        let budgets = BudgetRepository::list(conn).await?;
        let expenses = LedgerStore::query(
            &mut *conn,
            &LedgerFilter {
                transaction_type: Some(TransactionType::Expense),
                ..LedgerFilter::default()
            },
        )
        .await?;

        let mut drifted = Vec::new();
        for budget in budgets {
            let ledger_spent = Self::spent_from_transactions(&expenses, &budget.category);
            if (ledger_spent - budget.spent).abs() > DRIFT_TOLERANCE {
                warn!(
                    "Budget {} ({}) drifted: cached {:.2}, ledger {:.2}",
                    budget.id, budget.category, budget.spent, ledger_spent
                );
                drifted.push(BudgetDrift {
                    budget_id: budget.id,
                    category: budget.category,
                    cached_spent: budget.spent,
                    ledger_spent,
                });
            }
        }

        Ok(drifted)
    }
}
