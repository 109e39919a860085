//! Book domain methods on Repository

use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder, Transaction};

use super::{map_write_error, Repository};
use crate::{
    error::{AppError, AppResult},
    filters::{BookFilter, BookOrder},
    models::{
        author::AuthorName,
        book::{
            display_author, Book, BookAdminBase, BookAdminRow, BookAuthorRow, BookDetail,
            BookInput, BookShort,
        },
        named::{NamedKind, Tag},
    },
    pagination::PageRequest,
};

const BOOK_COLUMNS: &str =
    "b.id, b.title, b.summary, b.isbn, b.publisher_id, b.language_id, b.year, b.cover, b.num_pages";

impl Repository {
    // =========================================================================
    // READ
    // =========================================================================

    /// Count books matching `filter`
    pub async fn books_count(&self, filter: &BookFilter) -> AppResult<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books b");
        filter.push_where(&mut qb);

        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total)
    }

    /// List books matching `filter`, optionally restricted to one page
    pub async fn books_list(
        &self,
        filter: &BookFilter,
        order: BookOrder,
        page: Option<&PageRequest>,
    ) -> AppResult<Vec<BookShort>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT b.id, b.title, b.year, b.cover FROM books b");
        filter.push_where(&mut qb);
        order.push(&mut qb);

        if let Some(page) = page {
            qb.push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        let books = qb.build_query_as::<BookShort>().fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// First `limit` books in insertion order
    pub async fn books_first(&self, limit: i64) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>(
            "SELECT id, title, year, cover FROM books ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Distinct publication years, ascending, nulls excluded
    pub async fn books_distinct_years(&self) -> AppResult<Vec<i16>> {
        let years = sqlx::query_scalar::<_, i16>(
            "SELECT DISTINCT year FROM books WHERE year IS NOT NULL ORDER BY year",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(years)
    }

    /// Get a book row by ID
    pub async fn books_get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books b WHERE b.id = $1", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Get a book with authors, tags, publisher and language
    pub async fn books_get_detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.books_get_by_id(id).await?;

        let authors = self.books_authors(id).await?;
        let tags = self.books_tags(id).await?;
        let publisher = match book.publisher_id {
            Some(publisher_id) => self.named_find(NamedKind::Publisher, publisher_id).await?,
            None => None,
        };
        let language = match book.language_id {
            Some(language_id) => self.named_find(NamedKind::Language, language_id).await?,
            None => None,
        };

        Ok(BookDetail {
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            year: book.year,
            cover: book.cover,
            num_pages: book.num_pages,
            authors,
            tags,
            publisher,
            language,
        })
    }

    /// Authors of a book, in link order
    pub async fn books_authors(&self, book_id: i32) -> AppResult<Vec<AuthorName>> {
        let authors = sqlx::query_as::<_, AuthorName>(
            r#"
            SELECT a.id, a.first_name, a.last_name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = $1
            ORDER BY ba.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Tags of a book, in link order
    pub async fn books_tags(&self, book_id: i32) -> AppResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name
            FROM book_tags bt
            JOIN tags t ON t.id = bt.tag_id
            WHERE bt.book_id = $1
            ORDER BY bt.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    /// Whether another book already uses `isbn`
    pub async fn books_isbn_exists(&self, isbn: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND ($2::int IS NULL OR id <> $2))",
        )
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // =========================================================================
    // ADMIN LIST
    // =========================================================================

    /// One page of admin rows, ordered by title, with the author column computed
    pub async fn books_admin_rows(
        &self,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> AppResult<Vec<BookAdminRow>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT b.id, b.title, p.name AS publisher, b.year, b.isbn \
             FROM books b LEFT JOIN publishers p ON p.id = b.publisher_id",
        );
        filter.push_where(&mut qb);
        BookOrder::Title.push(&mut qb);
        qb.push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let base = qb.build_query_as::<BookAdminBase>().fetch_all(&self.pool).await?;

        let ids: Vec<i32> = base.iter().map(|b| b.id).collect();
        let mut authors = self.books_authors_for(&ids).await?;

        Ok(base
            .into_iter()
            .map(|b| {
                let names = authors.remove(&b.id).unwrap_or_default();
                BookAdminRow {
                    id: b.id,
                    title: b.title,
                    display_author: display_author(&names),
                    publisher: b.publisher,
                    year: b.year,
                    isbn: b.isbn,
                }
            })
            .collect())
    }

    /// Authors of several books at once, grouped by book id
    async fn books_authors_for(&self, book_ids: &[i32]) -> AppResult<HashMap<i32, Vec<AuthorName>>> {
        if book_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, BookAuthorRow>(
            r#"
            SELECT ba.book_id, a.id, a.first_name, a.last_name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = ANY($1)
            ORDER BY ba.id
            "#,
        )
        .bind(book_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i32, Vec<AuthorName>> = HashMap::new();
        for row in rows {
            grouped.entry(row.book_id).or_default().push(AuthorName {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
            });
        }
        Ok(grouped)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create a book with its author and tag links
    pub async fn books_create(&self, input: &BookInput) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, publisher_id, summary, isbn, language_id, year, num_pages)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(input.publisher_id)
        .bind(&input.summary)
        .bind(&input.isbn)
        .bind(input.language_id)
        .bind(input.year)
        .bind(input.num_pages)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        link_authors(&mut tx, id, &input.author_ids).await?;
        link_tags(&mut tx, id, &input.tag_ids).await?;

        tx.commit().await?;

        self.books_get_by_id(id).await
    }

    /// Replace a book's fields and links
    pub async fn books_update(&self, id: i32, input: &BookInput) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = $1,
                publisher_id = $2,
                summary = $3,
                isbn = $4,
                language_id = $5,
                year = $6,
                num_pages = $7
            WHERE id = $8
            "#,
        )
        .bind(&input.title)
        .bind(input.publisher_id)
        .bind(&input.summary)
        .bind(&input.isbn)
        .bind(input.language_id)
        .bind(input.year)
        .bind(input.num_pages)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM book_tags WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        link_authors(&mut tx, id, &input.author_ids).await?;
        link_tags(&mut tx, id, &input.tag_ids).await?;

        tx.commit().await?;

        self.books_get_by_id(id).await
    }

    /// Store the media path of a book's cover
    pub async fn books_set_cover(&self, id: i32, cover: &str) -> AppResult<Book> {
        let result = sqlx::query("UPDATE books SET cover = $1 WHERE id = $2")
            .bind(cover)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        self.books_get_by_id(id).await
    }

    /// Delete a book; its author and tag links go with it
    pub async fn books_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}

async fn link_authors(
    tx: &mut Transaction<'_, Postgres>,
    book_id: i32,
    author_ids: &[i32],
) -> AppResult<()> {
    for author_id in author_ids {
        sqlx::query(
            "INSERT INTO book_authors (book_id, author_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(book_id)
        .bind(author_id)
        .execute(&mut **tx)
        .await
        .map_err(map_write_error)?;
    }
    Ok(())
}

async fn link_tags(
    tx: &mut Transaction<'_, Postgres>,
    book_id: i32,
    tag_ids: &[i32],
) -> AppResult<()> {
    for tag_id in tag_ids {
        sqlx::query("INSERT INTO book_tags (book_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(book_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;
    }
    Ok(())
}
