//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::BookShort;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    /// Media path of the portrait, relative to the media root
    pub picture: Option<String>,
    pub about: Option<String>,
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Author name as attached to a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorName {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Author list entry with the number of books written
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorShort {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub picture: Option<String>,
    pub book_count: i64,
}

/// Author with the books they wrote
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub picture: Option<String>,
    pub about: Option<String>,
    pub books: Vec<BookShort>,
}

impl AuthorDetail {
    pub fn new(author: Author, books: Vec<BookShort>) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
            picture: author.picture,
            about: author.about,
            books,
        }
    }
}

/// Create or update author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthorInput {
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1 to 100 characters"))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    #[validate(length(max = 2000, message = "About must be at most 2000 characters"))]
    pub about: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_first_then_last() {
        let name = AuthorName {
            id: 1,
            first_name: "Ursula".to_string(),
            last_name: "Le Guin".to_string(),
        };
        assert_eq!(name.to_string(), "Ursula Le Guin");
    }

    #[test]
    fn test_input_length_limits() {
        let input = AuthorInput {
            first_name: "A".to_string(),
            last_name: "x".repeat(101),
            date_of_birth: None,
            date_of_death: None,
            about: None,
        };
        assert!(input.validate().is_err());

        let input = AuthorInput {
            first_name: "Anna".to_string(),
            last_name: "Akhmatova".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1889, 6, 23),
            date_of_death: NaiveDate::from_ymd_opt(1966, 3, 5),
            about: Some("Poet".to_string()),
        };
        assert!(input.validate().is_ok());
    }
}
