//! API handlers for Bookshelf REST endpoints

pub mod admin;
pub mod admin_authors;
pub mod admin_named;
pub mod catalog;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequestParts, Multipart, Path},
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{error::AppError, models::named::NamedKind, AppState};

/// Extractor guarding admin routes: requires `Authorization: Bearer <admin token>`
pub struct AdminUser;

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let expected = &state.config.admin.api_token;
        if expected.is_empty() || token != expected {
            return Err(AppError::Authentication("Invalid admin token".to_string()));
        }

        Ok(AdminUser)
    }
}

/// Numeric `:id` path segment. Anything that is not an integer id
/// cannot name an entity, so it is answered with 404.
pub struct EntityId(pub i32);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;

        raw.parse::<i32>()
            .map(EntityId)
            .map_err(|_| AppError::NotFound(format!("No entity with id {}", raw)))
    }
}

/// Read the `file` field of a multipart upload: original file name and bytes
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no name".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok((file_name, data.to_vec()));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route("/models", get(admin::list_models))
        // Books
        .route("/books", get(admin::list_books).post(admin::create_book))
        .route(
            "/books/:id",
            get(admin::get_book)
                .put(admin::update_book)
                .delete(admin::delete_book),
        )
        .route("/books/:id/cover", post(admin::upload_cover))
        // Authors
        .route(
            "/authors",
            get(admin_authors::list_authors).post(admin_authors::create_author),
        )
        .route(
            "/authors/:id",
            get(admin_authors::get_author)
                .put(admin_authors::update_author)
                .delete(admin_authors::delete_author),
        )
        .route("/authors/:id/picture", post(admin_authors::upload_picture))
        // Publishers, languages, tags
        .nest("/publishers", named_routes(NamedKind::Publisher))
        .nest("/languages", named_routes(NamedKind::Language))
        .nest("/tags", named_routes(NamedKind::Tag))
        .layer(DefaultBodyLimit::max(state.config.media.max_upload_bytes));

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog
        .route("/catalog", get(catalog::index))
        .route("/books", get(catalog::list_books))
        .route("/books/:id", get(catalog::get_book))
        .route("/authors", get(catalog::list_authors))
        .route("/authors/:id", get(catalog::get_author))
        .route("/search", get(catalog::search))
        // Administration
        .nest("/admin", admin)
        .with_state(state.clone());

    let media = ServeDir::new(&state.config.media.root);

    Router::new()
        .nest("/api/v1", api_v1)
        .nest_service(&state.config.media.url_prefix, media)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

fn named_routes(kind: NamedKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(admin_named::list).post(admin_named::create),
        )
        .route(
            "/:id",
            get(admin_named::get)
                .put(admin_named::update)
                .delete(admin_named::delete),
        )
        .layer(Extension(kind))
}
