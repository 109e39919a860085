//! Publisher, language and tag methods on Repository
//!
//! Table names come from [`NamedKind::table`], never from request input.

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::named::{NamedEntity, NamedKind},
    pagination::PageRequest,
};

impl Repository {
    /// All rows of `kind` in insertion order
    pub async fn named_all(&self, kind: NamedKind) -> AppResult<Vec<NamedEntity>> {
        let rows = sqlx::query_as::<_, NamedEntity>(&format!(
            "SELECT id, name FROM {} ORDER BY id",
            kind.table()
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn named_count(&self, kind: NamedKind) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", kind.table()))
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// One page of `kind`, newest first
    pub async fn named_page(&self, kind: NamedKind, page: &PageRequest) -> AppResult<Vec<NamedEntity>> {
        let rows = sqlx::query_as::<_, NamedEntity>(&format!(
            "SELECT id, name FROM {} ORDER BY id DESC LIMIT $1 OFFSET $2",
            kind.table()
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn named_find(&self, kind: NamedKind, id: i32) -> AppResult<Option<NamedEntity>> {
        let row = sqlx::query_as::<_, NamedEntity>(&format!(
            "SELECT id, name FROM {} WHERE id = $1",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn named_get_by_id(&self, kind: NamedKind, id: i32) -> AppResult<NamedEntity> {
        self.named_find(kind, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.label(), id)))
    }

    pub async fn named_create(&self, kind: NamedKind, name: &str) -> AppResult<NamedEntity> {
        let row = sqlx::query_as::<_, NamedEntity>(&format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name",
            kind.table()
        ))
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn named_update(&self, kind: NamedKind, id: i32, name: &str) -> AppResult<NamedEntity> {
        sqlx::query_as::<_, NamedEntity>(&format!(
            "UPDATE {} SET name = $1 WHERE id = $2 RETURNING id, name",
            kind.table()
        ))
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.label(), id)))
    }

    /// Delete a row. Books referencing a deleted publisher or language keep
    /// existing with the reference set to null; tag links are dropped.
    pub async fn named_delete(&self, kind: NamedKind, id: i32) -> AppResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", kind.label(), id)));
        }
        Ok(())
    }
}
