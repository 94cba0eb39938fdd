use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use crate::backend::domain::models::bill::Bill;

const SELECT_BILLS: &str =
    "SELECT id, name, amount, due_date, category, is_paid, frequency FROM bills";

pub struct BillRepository;

impl BillRepository {
    pub async fn insert(conn: &mut SqliteConnection, bill: &Bill) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bills (id, name, amount, due_date, category, is_paid, frequency)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&bill.id)
        .bind(&bill.name)
        .bind(bill.amount)
        .bind(bill.due_date.to_rfc3339())
        .bind(&bill.category)
        .bind(bill.is_paid)
        .bind(bill.frequency.map(|f| f.as_str()))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn get(conn: &mut SqliteConnection, id: &str) -> Result<Option<Bill>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_BILLS))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(row_to_bill).transpose()
    }

    /// All bills, earliest due first
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Bill>> {
        let rows = sqlx::query(&format!("{} ORDER BY due_date ASC, ROWID ASC", SELECT_BILLS))
            .fetch_all(&mut *conn)
            .await?;

        rows.iter().map(row_to_bill).collect()
    }

    pub async fn update(conn: &mut SqliteConnection, bill: &Bill) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bills
            SET name = ?, amount = ?, due_date = ?, category = ?, is_paid = ?, frequency = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&bill.name)
        .bind(bill.amount)
        .bind(bill.due_date.to_rfc3339())
        .bind(&bill.category)
        .bind(bill.is_paid)
        .bind(bill.frequency.map(|f| f.as_str()))
        .bind(&bill.id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bills WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_bill(row: &SqliteRow) -> Result<Bill> {
    let due_date: String = row.try_get("due_date")?;
    let frequency: Option<String> = row.try_get("frequency")?;

    Ok(Bill {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        amount: row.try_get("amount")?,
        due_date: DateTime::parse_from_rfc3339(&due_date)?.with_timezone(&Utc),
        category: row.try_get("category")?,
        is_paid: row.try_get("is_paid")?,
        frequency: frequency.map(|f| f.parse()).transpose()?,
    })
}
