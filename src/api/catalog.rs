//! Public catalog endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use super::EntityId;
use crate::{
    error::AppResult,
    models::{
        author::AuthorDetail,
        book::{BookDetail, BookListQuery, SearchQuery},
        catalog::{AuthorListResponse, BookListResponse, IndexResponse, SearchResponse},
    },
    pagination::PageQuery,
    AppState,
};

/// Catalog home: first books and all authors
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog index", body = IndexResponse)
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<IndexResponse>> {
    let index = state.services.catalog.index().await?;
    Ok(Json(index))
}

/// List books filtered by year and tag, 18 per page
#[utoipa::path(
    get,
    path = "/books",
    tag = "catalog",
    params(
        ("year" = Option<i32>, Query, description = "Exact publication year"),
        ("tag" = Option<i32>, Query, description = "Tag ID"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)")
    ),
    responses(
        (status = 200, description = "Page of books with filter options", body = BookListResponse),
        (status = 404, description = "Year or tag is not an integer")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<BookListResponse>> {
    let books = state.services.catalog.list_books(&query).await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<BookDetail>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// List authors by last name with their book counts
#[utoipa::path(
    get,
    path = "/authors",
    tag = "catalog",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)")
    ),
    responses(
        (status = 200, description = "Page of authors", body = AuthorListResponse)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AuthorListResponse>> {
    let authors = state.services.catalog.list_authors(&query).await?;
    Ok(Json(authors))
}

/// Get author details by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author with books", body = AuthorDetail),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<AuthorDetail>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(author))
}

/// Free-text search over books and authors
#[utoipa::path(
    get,
    path = "/search",
    tag = "catalog",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring")
    ),
    responses(
        (status = 200, description = "Matching books and authors", body = SearchResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let results = state.services.catalog.search(&query).await?;
    Ok(Json(results))
}
