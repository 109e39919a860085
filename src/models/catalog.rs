//! Response bodies of the public catalog endpoints

use serde::Serialize;
use utoipa::ToSchema;

use super::{
    author::{Author, AuthorShort},
    book::BookShort,
    named::Tag,
};
use crate::pagination::PageInfo;

/// Catalog home page
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    /// First books of the catalog
    pub book_list: Vec<BookShort>,
    /// All authors, by last name
    pub author_list: Vec<Author>,
}

/// Filtered, paginated book list
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<BookShort>,
    pub page: PageInfo,
    /// Distinct publication years, ascending, without nulls
    pub year_list: Vec<i16>,
    pub tag_list: Vec<Tag>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorListResponse {
    pub authors: Vec<AuthorShort>,
    pub page: PageInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub book_list: Vec<BookShort>,
    pub author_list: Vec<Author>,
}
