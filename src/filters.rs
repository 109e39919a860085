//! Translation of request parameters into SQL filters.
//!
//! Public list parameters that fail to parse as integers are answered with
//! 404, admin list parameters with 400. Free-text terms are matched as
//! literal, case-insensitive substrings.

use std::num::ParseIntError;

use sqlx::{Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::book::{AdminBookQuery, BookListQuery},
};

/// Conditions applied to the `books b` relation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// ILIKE pattern matched against title or summary
    pub pattern: Option<String>,
    pub year: Option<i64>,
    pub tag: Option<i64>,
    pub publisher: Option<i64>,
}

impl BookFilter {
    /// Filter for the public book list (`year`, `tag`)
    pub fn from_list_query(query: &BookListQuery) -> AppResult<Self> {
        let year = parse_integer(query.year.as_deref())
            .map_err(|_| AppError::NotFound("Invalid year".to_string()))?;
        let tag = parse_integer(query.tag.as_deref())
            .map_err(|_| AppError::NotFound("Invalid tag".to_string()))?;

        Ok(Self {
            year,
            tag,
            ..Default::default()
        })
    }

    /// Filter for the admin book list (`publisher`, `year`)
    pub fn from_admin_query(query: &AdminBookQuery) -> AppResult<Self> {
        let publisher = parse_integer(query.publisher.as_deref())
            .map_err(|_| AppError::BadRequest("publisher must be an integer id".to_string()))?;
        let year = parse_integer(query.year.as_deref())
            .map_err(|_| AppError::BadRequest("year must be an integer".to_string()))?;

        Ok(Self {
            year,
            publisher,
            ..Default::default()
        })
    }

    /// Free-text filter over title and summary
    pub fn search(term: &str) -> Self {
        Self {
            pattern: Some(like_pattern(term)),
            ..Default::default()
        }
    }

    /// Append a `WHERE` clause (if any condition is set) to `qb`.
    ///
    /// The caller's query must alias the books table as `b`.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut clause = Clause::default();

        if let Some(ref pattern) = self.pattern {
            clause.next(qb);
            qb.push("(b.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR b.summary ILIKE ")
                .push_bind(pattern.clone())
                .push(")");
        }

        if let Some(year) = self.year {
            clause.next(qb);
            qb.push("b.year = ").push_bind(year);
        }

        if let Some(tag) = self.tag {
            clause.next(qb);
            qb.push("EXISTS (SELECT 1 FROM book_tags bt WHERE bt.book_id = b.id AND bt.tag_id = ")
                .push_bind(tag)
                .push(")");
        }

        if let Some(publisher) = self.publisher {
            clause.next(qb);
            qb.push("b.publisher_id = ").push_bind(publisher);
        }
    }
}

/// Emits `WHERE` before the first condition and `AND` before the rest
#[derive(Default)]
struct Clause {
    started: bool,
}

impl Clause {
    fn next(&mut self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
    }
}

/// Sort order of book queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookOrder {
    /// Insertion order
    Id,
    Title,
}

impl BookOrder {
    pub fn push(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(match self {
            BookOrder::Id => " ORDER BY b.id",
            BookOrder::Title => " ORDER BY b.title, b.id",
        });
    }
}

/// Parse an optional integer parameter; surrounding whitespace is ignored.
pub fn parse_integer(raw: Option<&str>) -> Result<Option<i64>, ParseIntError> {
    raw.map(|s| s.trim().parse::<i64>()).transpose()
}

/// Build an ILIKE pattern matching `term` anywhere, with wildcards escaped.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
