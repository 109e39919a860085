//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod named;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map constraint violations on writes to client errors.
///
/// Unique violations (duplicate ISBN) become 409, foreign key violations
/// (unknown author, tag, publisher or language id) become 400.
pub(crate) fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return AppError::Conflict(db.message().to_string());
        }
        if db.is_foreign_key_violation() {
            return AppError::BadRequest(format!("Unknown reference: {}", db.message()));
        }
    }
    AppError::Database(e)
}
