//! Business logic services

pub mod books;
pub mod bookshelves;
pub mod categories;
pub mod google_books;
pub mod series;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, BooksApiConfig},
    error::AppResult,
    repository::Repository,
};

use google_books::{BookLookup, GoogleBooksClient, NoopLookup};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub categories: categories::CategoriesService,
    pub series: series::SeriesService,
    pub bookshelves: bookshelves::BookshelvesService,
    pub books: books::BooksService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository and lookup backend
    pub fn new(repository: Repository, auth_config: AuthConfig, lookup: Arc<dyn BookLookup>) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            categories: categories::CategoriesService::new(repository.clone()),
            series: series::SeriesService::new(repository.clone()),
            bookshelves: bookshelves::BookshelvesService::new(repository.clone()),
            books: books::BooksService::new(repository.clone(), lookup),
            repository,
        }
    }

    /// Whether the database answers queries
    pub async fn database_ready(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Database readiness check failed: {}", e);
                false
            }
        }
    }

    /// Lookup backend selected by configuration
    pub fn lookup_from_config(config: &BooksApiConfig) -> AppResult<Arc<dyn BookLookup>> {
        if config.enabled {
            Ok(Arc::new(GoogleBooksClient::new(config)?))
        } else {
            tracing::warn!("Bibliographic enrichment disabled; books will keep placeholder metadata");
            Ok(Arc::new(NoopLookup))
        }
    }
}
