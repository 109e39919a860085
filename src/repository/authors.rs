//! Author domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    filters::like_pattern,
    models::{
        author::{Author, AuthorInput, AuthorShort},
        book::BookShort,
    },
    pagination::PageRequest,
};

impl Repository {
    /// Count all authors
    pub async fn authors_count(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// All authors ordered by last name, then first name
    pub async fn authors_all(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, date_of_death, picture, about
            FROM authors
            ORDER BY last_name, first_name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// One page of authors, in default order
    pub async fn authors_page(&self, page: &PageRequest) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, date_of_death, picture, about
            FROM authors
            ORDER BY last_name, first_name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// One page of authors with their book counts
    pub async fn authors_list_with_counts(&self, page: &PageRequest) -> AppResult<Vec<AuthorShort>> {
        let authors = sqlx::query_as::<_, AuthorShort>(
            r#"
            SELECT a.id, a.first_name, a.last_name, a.picture,
                   COUNT(ba.id) AS book_count
            FROM authors a
            LEFT JOIN book_authors ba ON ba.author_id = a.id
            GROUP BY a.id
            ORDER BY a.last_name, a.first_name, a.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Authors whose first or last name contains `term`, case-insensitively
    pub async fn authors_search(&self, term: &str) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, date_of_death, picture, about
            FROM authors
            WHERE first_name ILIKE $1 OR last_name ILIKE $1
            ORDER BY last_name, first_name, id
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Get author by ID
    pub async fn authors_get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, date_of_death, picture, about
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Books written by an author
    pub async fn authors_books(&self, author_id: i32) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, b.year, b.cover
            FROM book_authors ba
            JOIN books b ON b.id = ba.book_id
            WHERE ba.author_id = $1
            ORDER BY b.id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Create author
    pub async fn authors_create(&self, data: &AuthorInput) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name, date_of_birth, date_of_death, about)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, date_of_birth, date_of_death, picture, about
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .bind(&data.about)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    /// Replace an author's fields (the picture is kept)
    pub async fn authors_update(&self, id: i32, data: &AuthorInput) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors SET
                first_name = $1,
                last_name = $2,
                date_of_birth = $3,
                date_of_death = $4,
                about = $5
            WHERE id = $6
            RETURNING id, first_name, last_name, date_of_birth, date_of_death, picture, about
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .bind(&data.about)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Store the media path of an author's picture
    pub async fn authors_set_picture(&self, id: i32, picture: &str) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors SET picture = $1
            WHERE id = $2
            RETURNING id, first_name, last_name, date_of_birth, date_of_death, picture, about
            "#,
        )
        .bind(picture)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Delete author; book links are removed, books are kept
    pub async fn authors_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }
}
