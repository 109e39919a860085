//! Admin author endpoints

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};

use super::{read_upload, AdminUser, EntityId};
use crate::{
    error::AppResult,
    models::{
        admin::AdminListResponse,
        author::{Author, AuthorInput},
    },
    pagination::PageQuery,
    AppState,
};

/// Admin author list
#[utoipa::path(
    get,
    path = "/admin/authors",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("page" = Option<i64>, Query, description = "Page number (default: 1)")),
    responses(
        (status = 200, description = "Authors by last name", body = AdminListResponse)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AdminListResponse>> {
    let authors = state.services.admin.list_authors(query.page.as_deref()).await?;
    Ok(Json(authors))
}

#[utoipa::path(
    get,
    path = "/admin/authors/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author record", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    _admin: AdminUser,
    EntityId(id): EntityId,
) -> AppResult<Json<Author>> {
    let author = state.services.admin.get_author(id).await?;
    Ok(Json(author))
}

#[utoipa::path(
    post,
    path = "/admin/authors",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = AuthorInput,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<AuthorInput>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state.services.admin.create_author(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/admin/authors/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AuthorInput,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    _admin: AdminUser,
    EntityId(id): EntityId,
    Json(input): Json<AuthorInput>,
) -> AppResult<Json<Author>> {
    let updated = state.services.admin.update_author(id, input).await?;
    Ok(Json(updated))
}

/// Delete an author; their books are kept
#[utoipa::path(
    delete,
    path = "/admin/authors/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    _admin: AdminUser,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.services.admin.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload a portrait (multipart field `file`)
#[utoipa::path(
    post,
    path = "/admin/authors/{id}/picture",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Picture stored", body = Author),
        (status = 400, description = "Missing or unsupported file"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn upload_picture(
    State(state): State<AppState>,
    _admin: AdminUser,
    EntityId(id): EntityId,
    multipart: Multipart,
) -> AppResult<Json<Author>> {
    let (file_name, data) = read_upload(multipart).await?;
    let author = state.services.admin.upload_picture(id, &file_name, &data).await?;
    Ok(Json(author))
}
