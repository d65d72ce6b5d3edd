//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{BookDetailResponse, BookQuery, BookResponse, CreateBook, IsbnQuery, UpdateBook},
        volume::VolumeInfo,
    },
};

use super::{AppJson, AuthenticatedUser};

/// List the caller's books in display order
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "Book list", body = Vec<BookResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.books.list(user.user_id(), &query).await?;
    Ok(Json(books))
}

/// Book details, including bibliographic data fetched live
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetailResponse>> {
    let book = state.services.books.get(user.user_id(), id).await?;
    Ok(Json(book))
}

/// Add a book; title, author, thumbnails and description come from the ISBN lookup
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input or bookshelf", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.books.create(user.user_id(), data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid input or bookshelf", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    AppJson(data): AppJson<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(user.user_id(), id, data).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(user.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Look up bibliographic data for an ISBN without saving anything
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    security(("bearer_auth" = [])),
    params(IsbnQuery),
    responses(
        (status = 200, description = "Raw volumeInfo document from the bibliographic source"),
        (status = 404, description = "No data found for this ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_by_isbn(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<IsbnQuery>,
) -> AppResult<Json<VolumeInfo>> {
    let info = state.services.books.search(&query.isbn).await?;
    Ok(Json(info))
}
