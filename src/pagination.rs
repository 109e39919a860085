//! Page-number resolution for list endpoints.
//!
//! A result set is first counted, then the requested page number is resolved
//! against that count:
//!
//! - a missing or non-integer page number selects the first page;
//! - a number below 1 or past the last page selects the last page;
//! - an empty result set still has one (empty) page.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page size of the public book and author lists
pub const CATALOG_PAGE_SIZE: i64 = 18;

/// Page size of admin list views
pub const ADMIN_PAGE_SIZE: i64 = 100;

/// Raw `page` query parameter, resolved with [`PageRequest::resolve`]
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// A resolved page over a counted result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: i64,
    pub num_pages: i64,
    pub per_page: i64,
    pub total: i64,
}

impl PageRequest {
    /// Resolve a raw `page` query value against `total` rows.
    pub fn resolve(raw: Option<&str>, total: i64, per_page: i64) -> Self {
        let num_pages = num_pages(total, per_page);

        let number = match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
            None => 1,
            Some(n) if n < 1 || n > num_pages => num_pages,
            Some(n) => n,
        };

        Self {
            number,
            num_pages,
            per_page,
            total,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn info(&self) -> PageInfo {
        PageInfo {
            number: self.number,
            num_pages: self.num_pages,
            per_page: self.per_page,
            total: self.total,
            has_next: self.number < self.num_pages,
            has_previous: self.number > 1,
        }
    }
}

fn num_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        1
    } else {
        (total + per_page - 1) / per_page
    }
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageInfo {
    /// Current page number (1-based)
    pub number: i64,
    /// Total number of pages
    pub num_pages: i64,
    pub per_page: i64,
    /// Total number of matching rows
    pub total: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nineteen_books_split_18_and_1() {
        let first = PageRequest::resolve(None, 19, CATALOG_PAGE_SIZE);
        assert_eq!(first.num_pages, 2);
        assert_eq!(first.offset(), 0);
        assert_eq!(first.limit(), 18);

        let second = PageRequest::resolve(Some("2"), 19, CATALOG_PAGE_SIZE);
        assert_eq!(second.number, 2);
        assert_eq!(second.offset(), 18);
        // 19 - 18 rows remain on the second page
        assert_eq!(second.total - second.offset(), 1);
        assert!(!second.info().has_next);
        assert!(second.info().has_previous);
    }

    #[test]
    fn test_non_integer_page_is_first() {
        assert_eq!(PageRequest::resolve(Some("abc"), 50, 18).number, 1);
        assert_eq!(PageRequest::resolve(Some("2.0"), 50, 18).number, 1);
        assert_eq!(PageRequest::resolve(Some(""), 50, 18).number, 1);
    }

    #[test]
    fn test_out_of_range_page_is_last() {
        assert_eq!(PageRequest::resolve(Some("99"), 50, 18).number, 3);
        assert_eq!(PageRequest::resolve(Some("0"), 50, 18).number, 3);
        assert_eq!(PageRequest::resolve(Some("-1"), 50, 18).number, 3);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let page = PageRequest::resolve(Some("5"), 0, 18);
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert_eq!(page.offset(), 0);
        assert!(!page.info().has_next);
        assert!(!page.info().has_previous);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(PageRequest::resolve(Some(" 2 "), 40, 18).number, 2);
    }

    #[test]
    fn test_exact_multiple() {
        let page = PageRequest::resolve(Some("2"), 36, 18);
        assert_eq!(page.num_pages, 2);
        assert_eq!(page.offset(), 18);
    }
}
