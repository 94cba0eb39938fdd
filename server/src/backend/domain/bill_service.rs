//! Bill service domain logic.
//!
//! Bill status is never stored. Every read derives it from `is_paid`, the
//! due date and the `now` supplied by the caller.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::backend::domain::classifier::{assess_bill, summarize_bills, BillSummary};
use crate::backend::domain::commands::bills::{
    BillListQuery, BillView, CreateBillCommand, PayBillResult, UpdateBillCommand,
};
use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::models::bill::Bill;
use crate::backend::domain::models::generate_id;
use crate::backend::domain::models::transaction::{Transaction, TransactionType};
use crate::backend::domain::reconciler::{BudgetReconciler, TransactionChange};
use crate::backend::domain::sorting::{matches_search, sort_items};
use crate::backend::storage::{BillRepository, DbConnection, TransactionRepository};

#[derive(Clone)]
pub struct BillService {
    db: DbConnection,
}

impl BillService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_bill(
        &self,
        command: CreateBillCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<BillView> {
        info!("Creating bill: {:?}", command);

        let bill = Bill {
            id: generate_id(),
            name: command.name.trim().to_string(),
            amount: command.amount,
            due_date: command.due_date,
            category: command.category.trim().to_string(),
            is_paid: command.is_paid,
            frequency: command.frequency,
        };
        bill.validate()?;

        let mut conn = self.db.pool().acquire().await?;
        BillRepository::insert(&mut conn, &bill).await?;

        Ok(view(bill, now))
    }

    pub async fn get_bill(&self, id: &str, now: DateTime<Utc>) -> DomainResult<BillView> {
        let mut conn = self.db.pool().acquire().await?;
        let bill = BillRepository::get(&mut conn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bill", id))?;
        Ok(view(bill, now))
    }

    pub async fn list_bills(
        &self,
        query: BillListQuery,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<BillView>> {
        let mut conn = self.db.pool().acquire().await?;
        let mut bills = BillRepository::list(&mut conn).await?;

        if let Some(term) = &query.search {
            bills.retain(|b| matches_search(b, term));
        }
        sort_items(&mut bills, query.sort);

        Ok(bills
            .into_iter()
            .map(|bill| view(bill, now))
            .filter(|v| query.status.map_or(true, |status| v.assessment.status == status))
            .collect())
    }

    pub async fn update_bill(
        &self,
        id: &str,
        command: UpdateBillCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<BillView> {
        info!("Updating bill {}: {:?}", id, command);

        let mut tx = self.db.begin().await?;

        let mut bill = BillRepository::get(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bill", id))?;

        if let Some(name) = command.name {
            bill.name = name.trim().to_string();
        }
        if let Some(amount) = command.amount {
            bill.amount = amount;
        }
        if let Some(due_date) = command.due_date {
            bill.due_date = due_date;
        }
        if let Some(category) = command.category {
            bill.category = category.trim().to_string();
        }
        if let Some(frequency) = command.frequency {
            bill.frequency = Some(frequency);
        }
        if let Some(is_paid) = command.is_paid {
            bill.is_paid = is_paid;
        }
        bill.validate()?;

        BillRepository::update(&mut tx, &bill).await?;
        tx.commit().await?;

        Ok(view(bill, now))
    }

    pub async fn delete_bill(&self, id: &str) -> DomainResult<()> {
        info!("Deleting bill {}", id);

        let mut conn = self.db.pool().acquire().await?;
        if !BillRepository::delete(&mut conn, id).await? {
            warn!("Bill {} not found for deletion", id);
            return Err(DomainError::not_found("Bill", id));
        }
        Ok(())
    }

    /// Mark a bill paid. With `record_transaction`, an expense for the bill
    /// amount is added to the ledger in the bill's category, and that
    /// category's budgets are reconciled in the same unit of work.
    pub async fn pay_bill(
        &self,
        id: &str,
        record_transaction: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<PayBillResult> {
        info!("Paying bill {} (record transaction: {})", id, record_transaction);

        let mut tx = self.db.begin().await?;

        let mut bill = BillRepository::get(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bill", id))?;
        if bill.is_paid {
            return Err(DomainError::Conflict(format!("Bill '{}' is already paid", bill.name)));
        }

        bill.is_paid = true;
        BillRepository::update(&mut tx, &bill).await?;

        let mut transaction = None;
        let mut reconciled_budgets = Vec::new();
        if record_transaction {
            let payment = Transaction {
                id: generate_id(),
                description: bill.name.clone(),
                amount: bill.amount,
                category: bill.category.clone(),
                transaction_type: TransactionType::Expense,
                date: now.date_naive(),
            };
            TransactionRepository::insert(&mut tx, &payment).await?;
            reconciled_budgets = BudgetReconciler::on_transaction_change(
                &mut tx,
                &TransactionChange::Created(&payment),
            )
            .await?;
            transaction = Some(payment);
        }

        tx.commit().await?;

        info!("Bill {} paid", id);

        Ok(PayBillResult {
            bill: view(bill, now),
            transaction,
            reconciled_budgets,
        })
    }

    pub async fn bill_summary(&self, now: DateTime<Utc>) -> DomainResult<BillSummary> {
        let mut conn = self.db.pool().acquire().await?;
        let bills = BillRepository::list(&mut conn).await?;
        Ok(summarize_bills(&bills, now))
    }
}

fn view(bill: Bill, now: DateTime<Utc>) -> BillView {
    let assessment = assess_bill(&bill, now);
    BillView { bill, assessment }
}
