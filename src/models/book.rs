//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    author::AuthorName,
    named::{Language, Publisher, Tag},
};

/// Full book row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub publisher_id: Option<i32>,
    pub language_id: Option<i32>,
    pub year: Option<i16>,
    /// Media path of the cover image, relative to the media root
    pub cover: Option<String>,
    pub num_pages: Option<i32>,
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// Book list entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub year: Option<i16>,
    pub cover: Option<String>,
}

/// Book with its relations resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub year: Option<i16>,
    pub cover: Option<String>,
    pub num_pages: Option<i32>,
    pub authors: Vec<AuthorName>,
    pub tags: Vec<Tag>,
    pub publisher: Option<Publisher>,
    pub language: Option<Language>,
}

/// Create or update book request.
///
/// Updates replace the whole record, including author and tag links.
/// The cover is set through its own upload endpoint.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "A book needs at least one author"))]
    pub author_ids: Vec<i32>,
    pub publisher_id: Option<i32>,
    #[validate(length(min = 1, max = 2000, message = "Summary must be 1 to 2000 characters"))]
    pub summary: String,
    #[validate(length(min = 1, max = 13, message = "ISBN must be 1 to 13 characters"))]
    pub isbn: String,
    #[serde(default)]
    pub tag_ids: Vec<i32>,
    pub language_id: Option<i32>,
    pub year: Option<i16>,
    #[validate(range(min = 1, message = "Page count must be positive"))]
    pub num_pages: Option<i32>,
}

/// Raw query parameters of the public book list.
///
/// Kept as strings so that malformed numbers can be answered with 404
/// instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct BookListQuery {
    pub year: Option<String>,
    pub tag: Option<String>,
    pub page: Option<String>,
}

/// Raw query parameters of the admin book list
#[derive(Debug, Default, Deserialize)]
pub struct AdminBookQuery {
    pub publisher: Option<String>,
    pub year: Option<String>,
    pub page: Option<String>,
}

/// Free-text search parameters
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// One row of the admin book list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookAdminRow {
    pub id: i32,
    pub title: String,
    /// All authors as "First Last", comma separated
    pub display_author: String,
    pub publisher: Option<String>,
    pub year: Option<i16>,
    pub isbn: String,
}

/// Book columns fetched for the admin list before authors are attached
#[derive(Debug, Clone, FromRow)]
pub struct BookAdminBase {
    pub id: i32,
    pub title: String,
    pub publisher: Option<String>,
    pub year: Option<i16>,
    pub isbn: String,
}

/// Author name tagged with the book it belongs to
#[derive(Debug, Clone, FromRow)]
pub struct BookAuthorRow {
    pub book_id: i32,
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Render authors as the admin "Author" column
pub fn display_author(authors: &[AuthorName]) -> String {
    authors
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> BookInput {
        BookInput {
            title: "The Dispossessed".to_string(),
            author_ids: vec![1],
            publisher_id: None,
            summary: "An ambiguous utopia".to_string(),
            isbn: "9780060512750".to_string(),
            tag_ids: vec![],
            language_id: None,
            year: Some(1974),
            num_pages: Some(387),
        }
    }

    #[test]
    fn test_display_author_joins_names() {
        let authors = vec![
            AuthorName {
                id: 1,
                first_name: "Ilya".to_string(),
                last_name: "Ilf".to_string(),
            },
            AuthorName {
                id: 2,
                first_name: "Yevgeny".to_string(),
                last_name: "Petrov".to_string(),
            },
        ];
        assert_eq!(display_author(&authors), "Ilya Ilf, Yevgeny Petrov");
        assert_eq!(display_author(&[]), "");
    }

    #[test]
    fn test_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_book_requires_author() {
        let mut book = input();
        book.author_ids.clear();
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_isbn_too_long() {
        let mut book = input();
        book.isbn = "97800605127501".to_string();
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_summary_required() {
        let mut book = input();
        book.summary = String::new();
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_title_required() {
        let mut book = input();
        book.title = String::new();
        assert!(book.validate().is_err());
    }
}
