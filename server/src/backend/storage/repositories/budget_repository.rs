use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use super::transaction_repository::DATE_FORMAT;
use crate::backend::domain::models::budget::{Budget, BudgetAlerts};

const SELECT_BUDGETS: &str = "SELECT id, category, amount, spent, period, start_date, end_date, \
     alerts_enabled, alert_threshold FROM budgets";

pub struct BudgetRepository;

impl BudgetRepository {
    pub async fn insert(conn: &mut SqliteConnection, budget: &Budget) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO budgets (id, category, amount, spent, period, start_date, end_date,
                                 alerts_enabled, alert_threshold)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&budget.id)
        .bind(&budget.category)
        .bind(budget.amount)
        .bind(budget.spent)
        .bind(budget.period.as_str())
        .bind(budget.start_date.format(DATE_FORMAT).to_string())
        .bind(budget.end_date.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(budget.alerts.enabled)
        .bind(budget.alerts.threshold)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn get(conn: &mut SqliteConnection, id: &str) -> Result<Option<Budget>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_BUDGETS))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(row_to_budget).transpose()
    }

    /// All budgets ordered by category, then creation order
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Budget>> {
        let rows = sqlx::query(&format!("{} ORDER BY category ASC, created_at ASC, ROWID ASC", SELECT_BUDGETS))
            .fetch_all(&mut *conn)
            .await?;

        rows.iter().map(row_to_budget).collect()
    }

    /// Every budget tracking the given category
    pub async fn list_by_category(conn: &mut SqliteConnection, category: &str) -> Result<Vec<Budget>> {
        let rows = sqlx::query(&format!("{} WHERE category = ? ORDER BY created_at ASC, ROWID ASC", SELECT_BUDGETS))
            .bind(category)
            .fetch_all(&mut *conn)
            .await?;

        rows.iter().map(row_to_budget).collect()
    }

    /// Update the user-editable fields. `spent` is left alone.
    pub async fn update(conn: &mut SqliteConnection, budget: &Budget) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE budgets
            SET category = ?, amount = ?, period = ?, start_date = ?, end_date = ?,
                alerts_enabled = ?, alert_threshold = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&budget.category)
        .bind(budget.amount)
        .bind(budget.period.as_str())
        .bind(budget.start_date.format(DATE_FORMAT).to_string())
        .bind(budget.end_date.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(budget.alerts.enabled)
        .bind(budget.alerts.threshold)
        .bind(&budget.id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the cached spent value
    pub async fn update_spent(conn: &mut SqliteConnection, id: &str, spent: f64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE budgets SET spent = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(spent)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_budget(row: &SqliteRow) -> Result<Budget> {
    let period: String = row.try_get("period")?;
    let start_date: String = row.try_get("start_date")?;
    let end_date: Option<String> = row.try_get("end_date")?;

    Ok(Budget {
        id: row.try_get("id")?,
        category: row.try_get("category")?,
        amount: row.try_get("amount")?,
        spent: row.try_get("spent")?,
        period: period.parse()?,
        start_date: NaiveDate::parse_from_str(&start_date, DATE_FORMAT)?,
        end_date: end_date
            .map(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT))
            .transpose()?,
        alerts: BudgetAlerts {
            enabled: row.try_get("alerts_enabled")?,
            threshold: row.try_get("alert_threshold")?,
        },
    })
}
