//! Declarative admin list configuration and admin response bodies

use serde::Serialize;
use utoipa::ToSchema;

use super::{
    author::Author,
    book::BookAdminRow,
    named::{NamedEntity, Publisher},
};
use crate::pagination::PageInfo;

/// How the admin lists one entity: displayed columns, filters and sort key.
///
/// `__str__` stands for the entity's display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelAdmin {
    pub entity: &'static str,
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    /// Sort fields; a leading `-` means descending
    pub ordering: &'static [&'static str],
}

pub const BOOK_ADMIN: ModelAdmin = ModelAdmin {
    entity: "book",
    list_display: &["title", "display_author", "publisher", "year", "isbn"],
    list_filter: &["publisher", "year"],
    ordering: &["title"],
};

pub const AUTHOR_ADMIN: ModelAdmin = ModelAdmin {
    entity: "author",
    list_display: &["__str__"],
    list_filter: &[],
    ordering: &["last_name", "first_name"],
};

pub const PUBLISHER_ADMIN: ModelAdmin = ModelAdmin {
    entity: "publisher",
    list_display: &["__str__"],
    list_filter: &[],
    ordering: &["-id"],
};

pub const LANGUAGE_ADMIN: ModelAdmin = ModelAdmin {
    entity: "language",
    list_display: &["__str__"],
    list_filter: &[],
    ordering: &["-id"],
};

pub const TAG_ADMIN: ModelAdmin = ModelAdmin {
    entity: "tag",
    list_display: &["__str__"],
    list_filter: &[],
    ordering: &["-id"],
};

/// Every registered admin, in menu order
pub const REGISTERED: [ModelAdmin; 5] = [
    AUTHOR_ADMIN,
    BOOK_ADMIN,
    LANGUAGE_ADMIN,
    PUBLISHER_ADMIN,
    TAG_ADMIN,
];

impl ModelAdmin {
    pub fn columns(&self) -> Vec<String> {
        self.list_display.iter().map(|c| c.to_string()).collect()
    }
}

/// Serializable view of a [`ModelAdmin`]
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelAdminView {
    pub entity: String,
    pub list_display: Vec<String>,
    pub list_filter: Vec<String>,
    pub ordering: Vec<String>,
}

impl From<&ModelAdmin> for ModelAdminView {
    fn from(admin: &ModelAdmin) -> Self {
        let owned = |fields: &[&str]| -> Vec<String> { fields.iter().map(|f| f.to_string()).collect() };
        Self {
            entity: admin.entity.to_string(),
            list_display: owned(admin.list_display),
            list_filter: owned(admin.list_filter),
            ordering: owned(admin.ordering),
        }
    }
}

/// Filter choices offered next to the admin book list
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminBookFilters {
    pub publishers: Vec<Publisher>,
    pub years: Vec<i16>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminBookListResponse {
    pub columns: Vec<String>,
    pub rows: Vec<BookAdminRow>,
    pub page: PageInfo,
    pub filters: AdminBookFilters,
}

/// One row of a default (`__str__` only) admin list
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminRow {
    pub id: i32,
    #[serde(rename = "__str__")]
    pub display: String,
}

impl From<&NamedEntity> for AdminRow {
    fn from(entity: &NamedEntity) -> Self {
        Self {
            id: entity.id,
            display: entity.to_string(),
        }
    }
}

impl From<&Author> for AdminRow {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            display: author.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminListResponse {
    pub columns: Vec<String>,
    pub rows: Vec<AdminRow>,
    pub page: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_admin_layout() {
        assert_eq!(
            BOOK_ADMIN.columns(),
            vec!["title", "display_author", "publisher", "year", "isbn"]
        );
        assert_eq!(BOOK_ADMIN.list_filter, &["publisher", "year"]);
        assert_eq!(BOOK_ADMIN.ordering, &["title"]);
    }

    #[test]
    fn test_every_entity_registered_once() {
        let mut entities: Vec<_> = REGISTERED.iter().map(|a| a.entity).collect();
        entities.sort();
        entities.dedup();
        assert_eq!(entities.len(), 5);
    }

    #[test]
    fn test_view_conversion() {
        let view = ModelAdminView::from(&AUTHOR_ADMIN);
        assert_eq!(view.entity, "author");
        assert_eq!(view.ordering, vec!["last_name", "first_name"]);
        assert!(view.list_filter.is_empty());
    }

    #[test]
    fn test_admin_row_uses_display_string() {
        let row = AdminRow::from(&NamedEntity {
            id: 7,
            name: "Penguin".to_string(),
        });
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["__str__"], "Penguin");
        assert_eq!(json["id"], 7);
    }
}
