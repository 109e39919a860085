//! Admin endpoints: entity configurations and books

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};

use super::{read_upload, AdminUser, EntityId};
use crate::{
    error::AppResult,
    models::{
        admin::{AdminBookListResponse, ModelAdminView},
        book::{AdminBookQuery, Book, BookInput},
    },
    AppState,
};

/// List admin configurations of every entity
#[utoipa::path(
    get,
    path = "/admin/models",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin configurations", body = Vec<ModelAdminView>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_models(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Json<Vec<ModelAdminView>> {
    Json(state.services.admin.models())
}

/// Admin book list
#[utoipa::path(
    get,
    path = "/admin/books",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("publisher" = Option<i32>, Query, description = "Publisher ID"),
        ("year" = Option<i32>, Query, description = "Publication year"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)")
    ),
    responses(
        (status = 200, description = "Book rows ordered by title", body = AdminBookListResponse),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<AdminBookQuery>,
) -> AppResult<Json<AdminBookListResponse>> {
    let books = state.services.admin.list_books(&query).await?;
    Ok(Json(books))
}

/// Get a book record
#[utoipa::path(
    get,
    path = "/admin/books/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book record", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    _admin: AdminUser,
    EntityId(id): EntityId,
) -> AppResult<Json<Book>> {
    let book = state.services.admin.get_book(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "ISBN already in use")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<BookInput>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.admin.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/admin/books/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found"),
        (status = 409, description = "ISBN already in use")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    _admin: AdminUser,
    EntityId(id): EntityId,
    Json(input): Json<BookInput>,
) -> AppResult<Json<Book>> {
    let updated = state.services.admin.update_book(id, input).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/admin/books/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    _admin: AdminUser,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.services.admin.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload a cover image (multipart field `file`)
#[utoipa::path(
    post,
    path = "/admin/books/{id}/cover",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Cover stored", body = Book),
        (status = 400, description = "Missing or unsupported file"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn upload_cover(
    State(state): State<AppState>,
    _admin: AdminUser,
    EntityId(id): EntityId,
    multipart: Multipart,
) -> AppResult<Json<Book>> {
    let (file_name, data) = read_upload(multipart).await?;
    let book = state.services.admin.upload_cover(id, &file_name, &data).await?;
    Ok(Json(book))
}
