//! Public catalog service: index, book list, details, search

use crate::{
    error::AppResult,
    filters::{BookFilter, BookOrder},
    models::{
        author::AuthorDetail,
        book::{BookDetail, BookListQuery, SearchQuery},
        catalog::{AuthorListResponse, BookListResponse, IndexResponse, SearchResponse},
        named::NamedKind,
    },
    pagination::{PageQuery, PageRequest, CATALOG_PAGE_SIZE},
    repository::Repository,
};

/// Number of books shown on the catalog home page
const INDEX_BOOK_COUNT: i64 = 6;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// First books and every author
    pub async fn index(&self) -> AppResult<IndexResponse> {
        Ok(IndexResponse {
            book_list: self.repository.books_first(INDEX_BOOK_COUNT).await?,
            author_list: self.repository.authors_all().await?,
        })
    }

    /// Book list filtered by year and tag, paginated, with filter options.
    ///
    /// Parameters are parsed before any query runs; a malformed year or tag
    /// is a NotFound error.
    pub async fn list_books(&self, query: &BookListQuery) -> AppResult<BookListResponse> {
        let filter = BookFilter::from_list_query(query)?;
        tracing::debug!(year = ?filter.year, tag = ?filter.tag, "Listing books");

        let total = self.repository.books_count(&filter).await?;
        let page = PageRequest::resolve(query.page.as_deref(), total, CATALOG_PAGE_SIZE);

        let books = self
            .repository
            .books_list(&filter, BookOrder::Id, Some(&page))
            .await?;

        Ok(BookListResponse {
            books,
            page: page.info(),
            year_list: self.repository.books_distinct_years().await?,
            tag_list: self.repository.named_all(NamedKind::Tag).await?,
        })
    }

    /// Get book by ID with its relations
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.books_get_detail(id).await
    }

    /// Authors with book counts, paginated
    pub async fn list_authors(&self, query: &PageQuery) -> AppResult<AuthorListResponse> {
        let total = self.repository.authors_count().await?;
        let page = PageRequest::resolve(query.page.as_deref(), total, CATALOG_PAGE_SIZE);

        Ok(AuthorListResponse {
            authors: self.repository.authors_list_with_counts(&page).await?,
            page: page.info(),
        })
    }

    /// Get author by ID with their books
    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.authors_get_by_id(id).await?;
        let books = self.repository.authors_books(id).await?;
        Ok(AuthorDetail::new(author, books))
    }

    /// Books by title or summary, authors by first or last name.
    ///
    /// Without a `q` parameter nothing matches; an empty `q` matches everything.
    pub async fn search(&self, query: &SearchQuery) -> AppResult<SearchResponse> {
        let Some(ref term) = query.q else {
            return Ok(SearchResponse {
                book_list: Vec::new(),
                author_list: Vec::new(),
            });
        };

        tracing::debug!(term = %term, "Searching catalog");

        let book_list = self
            .repository
            .books_list(&BookFilter::search(term), BookOrder::Id, None)
            .await?;
        let author_list = self.repository.authors_search(term).await?;

        Ok(SearchResponse {
            book_list,
            author_list,
        })
    }
}
