//! Shelfkeeper personal library server
//!
//! A REST JSON API where each user catalogs their own books on bookshelves,
//! grouped by category and series, with bibliographic data filled in from an
//! ISBN lookup.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
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
