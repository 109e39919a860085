//! Name-only entities: publishers, languages and tags
//!
//! The three share one row shape (`id`, `name`) and differ only in table and
//! name length limit, so they are handled through a single [`NamedKind`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{ValidateLength, ValidationError, ValidationErrors};

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NamedKind {
    Publisher,
    Language,
    Tag,
}

impl NamedKind {
    pub fn table(&self) -> &'static str {
        match self {
            NamedKind::Publisher => "publishers",
            NamedKind::Language => "languages",
            NamedKind::Tag => "tags",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NamedKind::Publisher => "Publisher",
            NamedKind::Language => "Language",
            NamedKind::Tag => "Tag",
        }
    }

    pub fn max_name_len(&self) -> usize {
        match self {
            NamedKind::Publisher => 30,
            NamedKind::Language => 200,
            NamedKind::Tag => 30,
        }
    }
}

/// A publisher, language or tag row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NamedEntity {
    pub id: i32,
    pub name: String,
}

pub type Publisher = NamedEntity;
pub type Language = NamedEntity;
pub type Tag = NamedEntity;

impl std::fmt::Display for NamedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Create or update request for a name-only entity
#[derive(Debug, Deserialize, ToSchema)]
pub struct NamedInput {
    pub name: String,
}

impl NamedInput {
    /// Check the name against the limit of `kind`
    pub fn validate_for(&self, kind: NamedKind) -> AppResult<()> {
        let name = self.name.trim().to_string();
        let max = kind.max_name_len() as u64;
        if name.validate_length(Some(1), Some(max), None) {
            return Ok(());
        }

        let mut errors = ValidationErrors::new();
        errors.add(
            "name",
            ValidationError::new("length").with_message(Cow::Owned(format!(
                "{} name must be 1 to {} characters",
                kind.label(),
                max
            ))),
        );
        Err(errors.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_name_limits_per_kind() {
        let input = NamedInput {
            name: "x".repeat(31),
        };
        assert!(input.validate_for(NamedKind::Tag).is_err());
        assert!(input.validate_for(NamedKind::Publisher).is_err());
        assert!(input.validate_for(NamedKind::Language).is_ok());
    }

    #[test]
    fn test_name_at_limit_accepted() {
        let input = NamedInput {
            name: "é".repeat(30),
        };
        assert!(input.validate_for(NamedKind::Tag).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let input = NamedInput {
            name: "   ".to_string(),
        };
        assert!(matches!(
            input.validate_for(NamedKind::Tag),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_display_is_name() {
        let tag = NamedEntity {
            id: 3,
            name: "fantasy".to_string(),
        };
        assert_eq!(tag.to_string(), "fantasy");
    }
}
