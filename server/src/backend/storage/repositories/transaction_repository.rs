use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection};

use crate::backend::domain::models::transaction::Transaction;
use crate::backend::storage::traits::{AmountSign, LedgerFilter, LedgerStore};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_TRANSACTIONS: &str =
    "SELECT id, description, amount, category, transaction_type, date FROM transactions";

/// Repository for ledger rows.
///
/// Every function takes an explicit connection so callers can run several of
/// them inside one database transaction.
pub struct TransactionRepository;

impl TransactionRepository {
    /// Store a transaction
    pub async fn insert(conn: &mut SqliteConnection, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, description, amount, category, transaction_type, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(&transaction.category)
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.date.format(DATE_FORMAT).to_string())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Get a transaction by ID
    pub async fn get(conn: &mut SqliteConnection, id: &str) -> Result<Option<Transaction>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_TRANSACTIONS))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(row_to_transaction).transpose()
    }

    /// Overwrite every field of an existing transaction.
    /// Returns false when no row has the transaction's ID.
    pub async fn update(conn: &mut SqliteConnection, transaction: &Transaction) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET description = ?, amount = ?, category = ?, transaction_type = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(&transaction.category)
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.date.format(DATE_FORMAT).to_string())
        .bind(&transaction.id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a transaction by ID
    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Transactions matching the filter, most recent first
    pub async fn query(conn: &mut SqliteConnection, filter: &LedgerFilter) -> Result<Vec<Transaction>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_TRANSACTIONS);
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY date DESC, created_at DESC, ROWID DESC");

        let rows = builder.build().fetch_all(&mut *conn).await?;
        rows.iter().map(row_to_transaction).collect()
    }

    /// Sum of absolute amounts of the matching transactions
    pub async fn aggregate_sum(conn: &mut SqliteConnection, filter: &LedgerFilter) -> Result<f64> {
        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT COALESCE(SUM(ABS(amount)), 0.0) FROM transactions");
        push_filter(&mut builder, filter);

        let sum = builder.build_query_scalar::<f64>().fetch_one(&mut *conn).await?;
        Ok(sum)
    }
}

#[async_trait]
impl LedgerStore for SqliteConnection {
    async fn query(&mut self, filter: &LedgerFilter) -> Result<Vec<Transaction>> {
        TransactionRepository::query(self, filter).await
    }

    async fn aggregate_sum(&mut self, filter: &LedgerFilter) -> Result<f64> {
        TransactionRepository::aggregate_sum(self, filter).await
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &LedgerFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(category) = &filter.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(transaction_type) = filter.transaction_type {
        builder
            .push(" AND transaction_type = ")
            .push_bind(transaction_type.as_str());
    }
    if let Some(sign) = filter.amount_sign {
        let signed = "(CASE WHEN transaction_type = 'expense' THEN -amount ELSE amount END)";
        let condition = match sign {
            AmountSign::Positive => " > 0",
            AmountSign::Negative => " < 0",
            AmountSign::Zero => " = 0",
        };
        builder.push(" AND ").push(signed).push(condition);
    }
}

fn row_to_transaction(row: &SqliteRow) -> Result<Transaction> {
    let date: String = row.try_get("date")?;
    let transaction_type: String = row.try_get("transaction_type")?;

    Ok(Transaction {
        id: row.try_get("id")?,
        description: row.try_get("description")?,
        amount: row.try_get("amount")?,
        category: row.try_get("category")?,
        transaction_type: transaction_type.parse()?,
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::transaction::TransactionType;
    use crate::backend::storage::DbConnection;

    fn tx(id: &str, category: &str, transaction_type: TransactionType, amount: f64, day: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            description: format!("{} entry", category),
            amount,
            category: category.to_string(),
            transaction_type,
            date: NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
        }
    }

    async fn seeded() -> DbConnection {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let mut conn = db.pool().acquire().await.unwrap();
        for transaction in [
            tx("t1", "Bills", TransactionType::Expense, 100.0, 1),
            tx("t2", "Bills", TransactionType::Expense, 240.0, 5),
            tx("t3", "Groceries", TransactionType::Expense, 50.0, 3),
            tx("t4", "Salary", TransactionType::Income, 3000.0, 2),
            tx("t5", "Bills", TransactionType::Income, 20.0, 6),
        ] {
            TransactionRepository::insert(&mut conn, &transaction).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let found = TransactionRepository::get(&mut conn, "t2").await.unwrap().unwrap();
        assert_eq!(found, tx("t2", "Bills", TransactionType::Expense, 240.0, 5));

        assert!(TransactionRepository::get(&mut conn, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_orders_most_recent_first() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let all = TransactionRepository::query(&mut conn, &LedgerFilter::default()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t5", "t2", "t3", "t4", "t1"]);
    }

    #[tokio::test]
    async fn test_query_by_category_and_type() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let bills = TransactionRepository::query(&mut conn, &LedgerFilter::expenses_in("Bills"))
            .await
            .unwrap();
        assert_eq!(bills.len(), 2);
        assert!(bills.iter().all(|t| t.is_expense() && t.category == "Bills"));
    }

    #[tokio::test]
    async fn test_query_by_amount_sign() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let positive = LedgerFilter { amount_sign: Some(AmountSign::Positive), ..Default::default() };
        let incomes = TransactionRepository::query(&mut conn, &positive).await.unwrap();
        let mut ids: Vec<&str> = incomes.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["t4", "t5"]);
    }

    #[tokio::test]
    async fn test_aggregate_sum() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let bills = TransactionRepository::aggregate_sum(&mut conn, &LedgerFilter::expenses_in("Bills"))
            .await
            .unwrap();
        assert_eq!(bills, 340.0);

        let none = TransactionRepository::aggregate_sum(&mut conn, &LedgerFilter::expenses_in("Travel"))
            .await
            .unwrap();
        assert_eq!(none, 0.0);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let mut changed = tx("t3", "Dining Out", TransactionType::Expense, 55.0, 3);
        assert!(TransactionRepository::update(&mut conn, &changed).await.unwrap());
        assert_eq!(TransactionRepository::get(&mut conn, "t3").await.unwrap().unwrap(), changed);

        changed.id = "missing".to_string();
        assert!(!TransactionRepository::update(&mut conn, &changed).await.unwrap());

        assert!(TransactionRepository::delete(&mut conn, "t3").await.unwrap());
        assert!(!TransactionRepository::delete(&mut conn, "t3").await.unwrap());
    }
}
