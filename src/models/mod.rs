//! Data models for Bookshelf

pub mod admin;
pub mod author;
pub mod book;
pub mod catalog;
pub mod named;

// Re-export commonly used types
pub use author::{Author, AuthorDetail, AuthorName, AuthorShort};
pub use book::{Book, BookDetail, BookShort};
pub use named::{Language, NamedEntity, NamedKind, Publisher, Tag};
