use anyhow::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use crate::backend::domain::models::pot::Pot;

const SELECT_POTS: &str = "SELECT id, name, target, total, theme FROM pots";

pub struct PotRepository;

impl PotRepository {
    pub async fn insert(conn: &mut SqliteConnection, pot: &Pot) -> Result<()> {
        sqlx::query("INSERT INTO pots (id, name, target, total, theme) VALUES (?, ?, ?, ?, ?)")
            .bind(&pot.id)
            .bind(&pot.name)
            .bind(pot.target)
            .bind(pot.total)
            .bind(&pot.theme)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn get(conn: &mut SqliteConnection, id: &str) -> Result<Option<Pot>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_POTS))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(row_to_pot).transpose()
    }

    /// Look a pot up by its exact name
    pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Pot>> {
        let row = sqlx::query(&format!("{} WHERE name = ?", SELECT_POTS))
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(row_to_pot).transpose()
    }

    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Pot>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at ASC, ROWID ASC", SELECT_POTS))
            .fetch_all(&mut *conn)
            .await?;

        rows.iter().map(row_to_pot).collect()
    }

    pub async fn update(conn: &mut SqliteConnection, pot: &Pot) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE pots
            SET name = ?, target = ?, total = ?, theme = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&pot.name)
        .bind(pot.target)
        .bind(pot.total)
        .bind(&pot.theme)
        .bind(&pot.id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pots WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_pot(row: &SqliteRow) -> Result<Pot> {
    Ok(Pot {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        target: row.try_get("target")?,
        total: row.try_get("total")?,
        theme: row.try_get("theme")?,
    })
}
