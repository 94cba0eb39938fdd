//! Budget service domain logic.
//!
//! Budgets are created and edited here, but their `spent` value is only ever
//! written by the reconciler: once on creation, again whenever the category
//! is edited, and on every ledger write in that category.

use chrono::Utc;
use tracing::{info, warn};

use crate::backend::domain::classifier::assess_budget;
use crate::backend::domain::commands::budgets::{
    BudgetView, CreateBudgetCommand, DriftReport, UpdateBudgetCommand,
};
use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::models::budget::Budget;
use crate::backend::domain::models::generate_id;
use crate::backend::domain::reconciler::{BudgetReconciler, ReconciledBudget};
use crate::backend::storage::{BudgetRepository, DbConnection};

#[derive(Clone)]
pub struct BudgetService {
    db: DbConnection,
}

impl BudgetService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_budget(&self, command: CreateBudgetCommand) -> DomainResult<BudgetView> {
        info!("Creating budget: {:?}", command);

        let budget = Budget {
            id: generate_id(),
            category: command.category.trim().to_string(),
            amount: command.amount,
            spent: 0.0,
            period: command.period,
            start_date: command.start_date.unwrap_or_else(|| Utc::now().date_naive()),
            end_date: command.end_date,
            alerts: command.alerts.unwrap_or_default(),
        };
        budget.validate()?;

        let mut tx = self.db.begin().await?;
        BudgetRepository::insert(&mut tx, &budget).await?;
        BudgetReconciler::reconcile_category(&mut tx, &budget.category).await?;
        let stored = BudgetRepository::get(&mut tx, &budget.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Budget", budget.id.as_str()))?;
        tx.commit().await?;

        info!("Created budget {} for {} (spent {:.2})", stored.id, stored.category, stored.spent);
        Ok(view(stored))
    }

    pub async fn get_budget(&self, id: &str) -> DomainResult<BudgetView> {
        let mut conn = self.db.pool().acquire().await?;
        BudgetRepository::get(&mut conn, id)
            .await?
            .map(view)
            .ok_or_else(|| DomainError::not_found("Budget", id))
    }

    pub async fn list_budgets(&self) -> DomainResult<Vec<BudgetView>> {
        let mut conn = self.db.pool().acquire().await?;
        let budgets = BudgetRepository::list(&mut conn).await?;
        Ok(budgets.into_iter().map(view).collect())
    }

    pub async fn update_budget(
        &self,
        id: &str,
        command: UpdateBudgetCommand,
    ) -> DomainResult<BudgetView> {
        info!("Updating budget {}: {:?}", id, command);

        let mut tx = self.db.begin().await?;

        let mut budget = BudgetRepository::get(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Budget", id))?;
        let previous_category = budget.category.clone();

        if let Some(category) = command.category {
            budget.category = category.trim().to_string();
        }
        if let Some(amount) = command.amount {
            budget.amount = amount;
        }
        if let Some(period) = command.period {
            budget.period = period;
        }
        if let Some(start_date) = command.start_date {
            budget.start_date = start_date;
        }
        if let Some(end_date) = command.end_date {
            budget.end_date = Some(end_date);
        }
        if let Some(alerts) = command.alerts {
            budget.alerts = alerts;
        }
        budget.validate()?;

        BudgetRepository::update(&mut tx, &budget).await?;
        if budget.category != previous_category {
            BudgetReconciler::reconcile_category(&mut tx, &budget.category).await?;
        }

        let stored = BudgetRepository::get(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Budget", id))?;
        tx.commit().await?;

        Ok(view(stored))
    }

    pub async fn delete_budget(&self, id: &str) -> DomainResult<()> {
        info!("Deleting budget {}", id);

        let mut conn = self.db.pool().acquire().await?;
        if !BudgetRepository::delete(&mut conn, id).await? {
            warn!("Budget {} not found for deletion", id);
            return Err(DomainError::not_found("Budget", id));
        }
        Ok(())
    }

    /// Recompute every budget from the ledger in one atomic unit
    pub async fn reconcile_all(&self) -> DomainResult<Vec<ReconciledBudget>> {
        let mut tx = self.db.begin().await?;
        let reconciled = BudgetReconciler::reconcile_all(&mut tx).await?;
        tx.commit().await?;
        Ok(reconciled)
    }

    /// Read-only comparison of cached and ledger spent values
    pub async fn find_drift(&self) -> DomainResult<DriftReport> {
        let mut conn = self.db.pool().acquire().await?;
        let checked = BudgetRepository::list(&mut conn).await?.len();
        let drifted = BudgetReconciler::find_drift(&mut conn).await?;

        if !drifted.is_empty() {
            warn!("{} of {} budgets have drifted from the ledger", drifted.len(), checked);
        }

        Ok(DriftReport { checked, drifted })
    }
}

fn view(budget: Budget) -> BudgetView {
    let assessment = assess_budget(&budget);
    BudgetView { budget, assessment }
}
