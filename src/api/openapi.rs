//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, admin_authors, admin_named, catalog, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "Library catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::index,
        catalog::list_books,
        catalog::get_book,
        catalog::list_authors,
        catalog::get_author,
        catalog::search,
        // Admin
        admin::list_models,
        admin::list_books,
        admin::get_book,
        admin::create_book,
        admin::update_book,
        admin::delete_book,
        admin::upload_cover,
        admin_authors::list_authors,
        admin_authors::get_author,
        admin_authors::create_author,
        admin_authors::update_author,
        admin_authors::delete_author,
        admin_authors::upload_picture,
        admin_named::list,
        admin_named::get,
        admin_named::create,
        admin_named::update,
        admin_named::delete,
    ),
    components(
        schemas(
            // Catalog
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookDetail,
            crate::models::book::BookInput,
            crate::models::book::BookAdminRow,
            crate::models::author::Author,
            crate::models::author::AuthorName,
            crate::models::author::AuthorShort,
            crate::models::author::AuthorDetail,
            crate::models::author::AuthorInput,
            crate::models::named::NamedEntity,
            crate::models::named::NamedInput,
            crate::models::named::NamedKind,
            crate::models::catalog::IndexResponse,
            crate::models::catalog::BookListResponse,
            crate::models::catalog::AuthorListResponse,
            crate::models::catalog::SearchResponse,
            crate::pagination::PageInfo,
            // Admin
            crate::models::admin::ModelAdminView,
            crate::models::admin::AdminBookFilters,
            crate::models::admin::AdminBookListResponse,
            crate::models::admin::AdminRow,
            crate::models::admin::AdminListResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Public catalog"),
        (name = "admin", description = "Data entry and admin lists")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
