//! Admin endpoints shared by publishers, languages and tags.
//!
//! The entity kind is attached to each nested router as an extension.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::{AdminUser, EntityId};
use crate::{
    error::AppResult,
    models::{
        admin::AdminListResponse,
        named::{NamedEntity, NamedInput, NamedKind},
    },
    pagination::PageQuery,
    AppState,
};

#[utoipa::path(
    get,
    path = "/admin/{kind}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "publishers, languages or tags"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)")
    ),
    responses(
        (status = 200, description = "Newest first", body = AdminListResponse)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    Extension(kind): Extension<NamedKind>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AdminListResponse>> {
    let rows = state.services.admin.list_named(kind, query.page.as_deref()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/admin/{kind}/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "publishers, languages or tags"),
        ("id" = i32, Path, description = "Entity ID")
    ),
    responses(
        (status = 200, description = "Entity", body = NamedEntity),
        (status = 404, description = "Entity not found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Extension(kind): Extension<NamedKind>,
    EntityId(id): EntityId,
) -> AppResult<Json<NamedEntity>> {
    let entity = state.services.admin.get_named(kind, id).await?;
    Ok(Json(entity))
}

#[utoipa::path(
    post,
    path = "/admin/{kind}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("kind" = String, Path, description = "publishers, languages or tags")),
    request_body = NamedInput,
    responses(
        (status = 201, description = "Entity created", body = NamedEntity),
        (status = 400, description = "Invalid name")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Extension(kind): Extension<NamedKind>,
    Json(input): Json<NamedInput>,
) -> AppResult<(StatusCode, Json<NamedEntity>)> {
    let created = state.services.admin.create_named(kind, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/admin/{kind}/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "publishers, languages or tags"),
        ("id" = i32, Path, description = "Entity ID")
    ),
    request_body = NamedInput,
    responses(
        (status = 200, description = "Entity updated", body = NamedEntity),
        (status = 404, description = "Entity not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Extension(kind): Extension<NamedKind>,
    EntityId(id): EntityId,
    Json(input): Json<NamedInput>,
) -> AppResult<Json<NamedEntity>> {
    let updated = state.services.admin.update_named(kind, id, input).await?;
    Ok(Json(updated))
}

/// Delete an entity. Books that referenced a deleted publisher or language
/// keep existing with that field cleared.
#[utoipa::path(
    delete,
    path = "/admin/{kind}/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "publishers, languages or tags"),
        ("id" = i32, Path, description = "Entity ID")
    ),
    responses(
        (status = 204, description = "Entity deleted"),
        (status = 404, description = "Entity not found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Extension(kind): Extension<NamedKind>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.services.admin.delete_named(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
