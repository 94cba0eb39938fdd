//! Transaction service domain logic.
//!
//! Every ledger write and the budget reconciliation it triggers run on one
//! database transaction: either both are committed or neither is.

use chrono::Utc;
use tracing::{info, warn};

use crate::backend::domain::commands::transactions::{
    CreateTransactionCommand, DeleteTransactionResult, TransactionListQuery,
    TransactionListResult, TransactionMutationResult, UpdateTransactionCommand,
};
use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::models::generate_id;
use crate::backend::domain::models::transaction::Transaction;
use crate::backend::domain::reconciler::{BudgetReconciler, TransactionChange};
use crate::backend::domain::sorting::{matches_search, sort_items};
use crate::backend::storage::{DbConnection, LedgerFilter, TransactionRepository};

#[derive(Clone)]
pub struct TransactionService {
    db: DbConnection,
}

impl TransactionService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Record a transaction and reconcile the budgets of its category
    pub async fn create_transaction(
        &self,
        command: CreateTransactionCommand,
    ) -> DomainResult<TransactionMutationResult> {
        info!("Creating transaction: {:?}", command);

        let transaction = Transaction {
            id: generate_id(),
            description: command.description.trim().to_string(),
            amount: command.amount,
            category: command.category.trim().to_string(),
            transaction_type: command.transaction_type,
            date: command.date.unwrap_or_else(|| Utc::now().date_naive()),
        };
        transaction.validate()?;

        let mut tx = self.db.begin().await?;
        TransactionRepository::insert(&mut tx, &transaction).await?;
        let reconciled_budgets = BudgetReconciler::on_transaction_change(
            &mut tx,
            &TransactionChange::Created(&transaction),
        )
        .await?;
        tx.commit().await?;

        info!(
            "Created transaction {} ({} budgets reconciled)",
            transaction.id,
            reconciled_budgets.len()
        );

        Ok(TransactionMutationResult {
            transaction,
            reconciled_budgets,
        })
    }

    pub async fn get_transaction(&self, id: &str) -> DomainResult<Transaction> {
        let mut conn = self.db.pool().acquire().await?;
        TransactionRepository::get(&mut conn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Transaction", id))
    }

    /// Apply a partial edit. When the category changes, budgets of both the
    /// old and the new category are reconciled.
    pub async fn update_transaction(
        &self,
        id: &str,
        command: UpdateTransactionCommand,
    ) -> DomainResult<TransactionMutationResult> {
        info!("Updating transaction {}: {:?}", id, command);

        let mut tx = self.db.begin().await?;

        let before = TransactionRepository::get(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Transaction", id))?;

        let mut after = before.clone();
        if let Some(description) = command.description {
            after.description = description.trim().to_string();
        }
        if let Some(amount) = command.amount {
            after.amount = amount;
        }
        if let Some(category) = command.category {
            after.category = category.trim().to_string();
        }
        if let Some(transaction_type) = command.transaction_type {
            after.transaction_type = transaction_type;
        }
        if let Some(date) = command.date {
            after.date = date;
        }
        after.validate()?;

        TransactionRepository::update(&mut tx, &after).await?;
        let reconciled_budgets = BudgetReconciler::on_transaction_change(
            &mut tx,
            &TransactionChange::Updated {
                before: &before,
                after: &after,
            },
        )
        .await?;
        tx.commit().await?;

        info!("Updated transaction {}", id);

        Ok(TransactionMutationResult {
            transaction: after,
            reconciled_budgets,
        })
    }

    pub async fn delete_transaction(&self, id: &str) -> DomainResult<DeleteTransactionResult> {
        info!("Deleting transaction {}", id);

        let mut tx = self.db.begin().await?;

        let existing = match TransactionRepository::get(&mut tx, id).await? {
            Some(existing) => existing,
            None => {
                warn!("Transaction {} not found for deletion", id);
                return Err(DomainError::not_found("Transaction", id));
            }
        };

        TransactionRepository::delete(&mut tx, id).await?;
        let reconciled_budgets = BudgetReconciler::on_transaction_change(
            &mut tx,
            &TransactionChange::Deleted(&existing),
        )
        .await?;
        tx.commit().await?;

        Ok(DeleteTransactionResult {
            deleted_id: existing.id,
            reconciled_budgets,
        })
    }

    /// Filter, search, sort, then page
    pub async fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> DomainResult<TransactionListResult> {
        info!("Listing transactions: {:?}", query);

        let filter = LedgerFilter {
            category: query.category.clone(),
            transaction_type: query.transaction_type,
            amount_sign: None,
        };

        let mut conn = self.db.pool().acquire().await?;
        let mut transactions = TransactionRepository::query(&mut conn, &filter).await?;

        if let Some(term) = &query.search {
            transactions.retain(|t| matches_search(t, term));
        }
        sort_items(&mut transactions, query.sort);

        let total_count = transactions.len();
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let transactions = transactions.into_iter().skip(offset).take(limit).collect();

        Ok(TransactionListResult {
            transactions,
            total_count,
        })
    }

    /// The whole ledger, most recent first
    pub async fn all_transactions(&self) -> DomainResult<Vec<Transaction>> {
        let mut conn = self.db.pool().acquire().await?;
        Ok(TransactionRepository::query(&mut conn, &LedgerFilter::default()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::budget::{Budget, BudgetAlerts, BudgetPeriod};
    use crate::backend::domain::models::transaction::TransactionType;
    use crate::backend::domain::sorting::SortBy;
    use crate::backend::storage::BudgetRepository;
    use chrono::NaiveDate;

    async fn setup_test() -> (TransactionService, DbConnection) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (TransactionService::new(db.clone()), db)
    }

    async fn add_budget(db: &DbConnection, id: &str, category: &str) {
        let mut conn = db.pool().acquire().await.unwrap();
        let budget = Budget {
            id: id.to_string(),
            category: category.to_string(),
            amount: 400.0,
            spent: 0.0,
            period: BudgetPeriod::Monthly,
            start_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            end_date: None,
            alerts: BudgetAlerts { enabled: true, threshold: Some(80.0) },
        };
        BudgetRepository::insert(&mut conn, &budget).await.unwrap();
    }

    async fn spent(db: &DbConnection, id: &str) -> f64 {
        let mut conn = db.pool().acquire().await.unwrap();
        BudgetRepository::get(&mut conn, id).await.unwrap().unwrap().spent
    }

    fn expense(description: &str, category: &str, amount: f64) -> CreateTransactionCommand {
        CreateTransactionCommand {
            description: description.to_string(),
            amount,
            category: category.to_string(),
            transaction_type: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2024, 8, 10),
        }
    }

    #[tokio::test]
    async fn test_create_reconciles_budget() {
        let (service, db) = setup_test().await;
        add_budget(&db, "bills", "Bills").await;

        service.create_transaction(expense("Electricity", "Bills", 100.0)).await.unwrap();
        let result = service.create_transaction(expense("Rent", "Bills", 240.0)).await.unwrap();
        service.create_transaction(expense("Food", "Groceries", 50.0)).await.unwrap();

        assert_eq!(result.reconciled_budgets.len(), 1);
        assert_eq!(result.reconciled_budgets[0].spent, 340.0);
        assert_eq!(spent(&db, "bills").await, 340.0);
    }

    #[tokio::test]
    async fn test_create_income_does_not_change_spent() {
        let (service, db) = setup_test().await;
        add_budget(&db, "bills", "Bills").await;

        let mut refund = expense("Refund", "Bills", 30.0);
        refund.transaction_type = TransactionType::Income;
        service.create_transaction(refund).await.unwrap();

        assert_eq!(spent(&db, "bills").await, 0.0);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_amount() {
        let (service, db) = setup_test().await;
        add_budget(&db, "bills", "Bills").await;

        let result = service.create_transaction(expense("Nothing", "Bills", 0.0)).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(service.all_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_category_reconciles_old_and_new() {
        let (service, db) = setup_test().await;
        add_budget(&db, "bills", "Bills").await;
        add_budget(&db, "food", "Groceries").await;

        let created = service.create_transaction(expense("Market", "Bills", 75.0)).await.unwrap();
        assert_eq!(spent(&db, "bills").await, 75.0);

        let updated = service
            .update_transaction(
                &created.transaction.id,
                UpdateTransactionCommand {
                    category: Some("Groceries".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.reconciled_budgets.len(), 2);
        assert_eq!(spent(&db, "bills").await, 0.0);
        assert_eq!(spent(&db, "food").await, 75.0);
    }

    #[tokio::test]
    async fn test_amount_only_update_keeps_expense_type() {
        let (service, db) = setup_test().await;
        add_budget(&db, "b1", "Bills").await;

        let created = service.create_transaction(expense("Electricity", "Bills", 100.0)).await.unwrap();
        let updated = service
            .update_transaction(
                &created.transaction.id,
                UpdateTransactionCommand {
                    amount: Some(120.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.transaction.transaction_type, TransactionType::Expense);
        assert_eq!(updated.transaction.amount, 120.0);
        assert_eq!(updated.reconciled_budgets[0].spent, 120.0);
        assert_eq!(spent(&db, "b1").await, 120.0);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_state_unchanged() {
        let (service, db) = setup_test().await;
        add_budget(&db, "bills", "Bills").await;

        let created = service.create_transaction(expense("Water", "Bills", 60.0)).await.unwrap();

        let result = service
            .update_transaction(
                &created.transaction.id,
                UpdateTransactionCommand {
                    category: Some("Groceries".to_string()),
                    amount: Some(-5.0),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let stored = service.get_transaction(&created.transaction.id).await.unwrap();
        assert_eq!(stored.category, "Bills");
        assert_eq!(spent(&db, "bills").await, 60.0);
    }

    #[tokio::test]
    async fn test_rolled_back_write_leaves_budgets_unchanged() {
        let (service, db) = setup_test().await;
        add_budget(&db, "bills", "Bills").await;
        service.create_transaction(expense("Water", "Bills", 60.0)).await.unwrap();

        {
            let mut tx = db.begin().await.unwrap();
            let extra = Transaction {
                id: "extra".to_string(),
                description: "Gas".to_string(),
                amount: 40.0,
                category: "Bills".to_string(),
                transaction_type: TransactionType::Expense,
                date: NaiveDate::from_ymd_opt(2024, 8, 11).unwrap(),
            };
            TransactionRepository::insert(&mut tx, &extra).await.unwrap();
            BudgetReconciler::on_transaction_change(&mut tx, &TransactionChange::Created(&extra))
                .await
                .unwrap();
            tx.rollback().await.unwrap();
        }

        assert_eq!(spent(&db, "bills").await, 60.0);
        assert_eq!(service.all_transactions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reconciles_and_reports_missing() {
        let (service, db) = setup_test().await;
        add_budget(&db, "bills", "Bills").await;

        let created = service.create_transaction(expense("Phone", "Bills", 45.0)).await.unwrap();
        let deleted = service.delete_transaction(&created.transaction.id).await.unwrap();

        assert_eq!(deleted.deleted_id, created.transaction.id);
        assert_eq!(spent(&db, "bills").await, 0.0);

        let again = service.delete_transaction(&created.transaction.id).await;
        assert!(matches!(again, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_search_sort_and_page() {
        let (service, _db) = setup_test().await;

        for (description, category, amount) in [
            ("Savory Bites", "Dining Out", 55.5),
            ("Flavor Fiesta", "Dining Out", 12.0),
            ("Aqua Flow Utilities", "Bills", 100.0),
            ("Fresh Market", "Groceries", 33.2),
        ] {
            service.create_transaction(expense(description, category, amount)).await.unwrap();
        }

        let dining = service
            .list_transactions(TransactionListQuery {
                category: Some("Dining Out".to_string()),
                sort: SortBy::Highest,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(dining.total_count, 2);
        assert_eq!(dining.transactions[0].description, "Savory Bites");

        let searched = service
            .list_transactions(TransactionListQuery {
                search: Some("flow".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.total_count, 1);
        assert_eq!(searched.transactions[0].description, "Aqua Flow Utilities");

        let paged = service
            .list_transactions(TransactionListQuery {
                sort: SortBy::AToZ,
                limit: Some(2),
                offset: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(paged.total_count, 4);
        let names: Vec<&str> = paged.transactions.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["Flavor Fiesta", "Fresh Market"]);
    }
}
