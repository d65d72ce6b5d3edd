//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, bookshelves, categories, health, series};

/// Registers the JWT bearer scheme referenced by protected endpoints
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfkeeper API",
        version = "0.3.0",
        description = "Personal library cataloging REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::logout,
        auth::refresh,
        auth::verify,
        auth::me,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Series
        series::list_series,
        series::get_series,
        series::create_series,
        series::update_series,
        series::delete_series,
        // Bookshelves
        bookshelves::list_bookshelves,
        bookshelves::get_bookshelf,
        bookshelves::create_bookshelf,
        bookshelves::update_bookshelf,
        bookshelves::delete_bookshelf,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::search_by_isbn,
    ),
    components(
        schemas(
            // Auth
            auth::LogoutResponse,
            crate::models::user::RegisterUser,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::UserInfo,
            crate::models::user::TokenResponse,
            crate::models::user::TokenStatus,
            // Organization
            crate::models::category::Category,
            crate::models::category::CategoryPayload,
            crate::models::series::Series,
            crate::models::series::SeriesPayload,
            crate::models::bookshelf::Bookshelf,
            crate::models::bookshelf::BookshelfPayload,
            // Books
            crate::models::book::BookResponse,
            crate::models::book::BookDetailResponse,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and authentication"),
        (name = "categories", description = "Book categories"),
        (name = "series", description = "Book series"),
        (name = "bookshelves", description = "Bookshelves"),
        (name = "books", description = "Books and ISBN lookup")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
