//! Bookshelf Library Catalog
//!
//! A REST JSON API over a catalog of books, authors, publishers, languages
//! and tags: public list, detail and search endpoints plus an administrative
//! API for data entry.

use std::sync::Arc;

use sqlx::PgPool;

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let repository = repository::Repository::new(pool);
        let services = services::Services::new(repository, &config.media);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
