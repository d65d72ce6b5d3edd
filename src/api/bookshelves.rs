//! Bookshelf endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::bookshelf::{Bookshelf, BookshelfPayload},
};

use super::{AppJson, AuthenticatedUser};

/// List the caller's bookshelves
#[utoipa::path(
    get,
    path = "/bookshelves",
    tag = "bookshelves",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookshelf list", body = Vec<Bookshelf>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_bookshelves(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<Bookshelf>>> {
    let shelves = state.services.bookshelves.list(user.user_id()).await?;
    Ok(Json(shelves))
}

/// Get a bookshelf by ID
#[utoipa::path(
    get,
    path = "/bookshelves/{id}",
    tag = "bookshelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Bookshelf ID")),
    responses(
        (status = 200, description = "Bookshelf", body = Bookshelf),
        (status = 404, description = "Bookshelf not found")
    )
)]
pub async fn get_bookshelf(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Bookshelf>> {
    let shelf = state.services.bookshelves.get(user.user_id(), id).await?;
    Ok(Json(shelf))
}

/// Create a bookshelf
#[utoipa::path(
    post,
    path = "/bookshelves",
    tag = "bookshelves",
    security(("bearer_auth" = [])),
    request_body = BookshelfPayload,
    responses(
        (status = 201, description = "Bookshelf created", body = Bookshelf),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_bookshelf(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    AppJson(data): AppJson<BookshelfPayload>,
) -> AppResult<(StatusCode, Json<Bookshelf>)> {
    let shelf = state.services.bookshelves.create(user.user_id(), data).await?;
    Ok((StatusCode::CREATED, Json(shelf)))
}

/// Rename a bookshelf
#[utoipa::path(
    put,
    path = "/bookshelves/{id}",
    tag = "bookshelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Bookshelf ID")),
    request_body = BookshelfPayload,
    responses(
        (status = 200, description = "Bookshelf updated", body = Bookshelf),
        (status = 404, description = "Bookshelf not found")
    )
)]
pub async fn update_bookshelf(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    AppJson(data): AppJson<BookshelfPayload>,
) -> AppResult<Json<Bookshelf>> {
    let shelf = state.services.bookshelves.update(user.user_id(), id, data).await?;
    Ok(Json(shelf))
}

/// Delete a bookshelf together with all books on it
#[utoipa::path(
    delete,
    path = "/bookshelves/{id}",
    tag = "bookshelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Bookshelf ID")),
    responses(
        (status = 204, description = "Bookshelf and its books deleted"),
        (status = 404, description = "Bookshelf not found")
    )
)]
pub async fn delete_bookshelf(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.bookshelves.delete(user.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
