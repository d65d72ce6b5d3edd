//! Series endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::series::{Series, SeriesPayload},
};

use super::{AppJson, AuthenticatedUser};

/// List the caller's series
#[utoipa::path(
    get,
    path = "/series",
    tag = "series",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Series list", body = Vec<Series>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_series(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<Series>>> {
    Ok(Json(state.services.series.list(user.user_id()).await?))
}

#[utoipa::path(
    get,
    path = "/series/{id}",
    tag = "series",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Series ID")),
    responses(
        (status = 200, description = "Series", body = Series),
        (status = 404, description = "Series not found")
    )
)]
pub async fn get_series(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Series>> {
    Ok(Json(state.services.series.get(user.user_id(), id).await?))
}

#[utoipa::path(
    post,
    path = "/series",
    tag = "series",
    security(("bearer_auth" = [])),
    request_body = SeriesPayload,
    responses(
        (status = 201, description = "Series created", body = Series),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_series(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    AppJson(data): AppJson<SeriesPayload>,
) -> AppResult<(StatusCode, Json<Series>)> {
    let series = state.services.series.create(user.user_id(), data).await?;
    Ok((StatusCode::CREATED, Json(series)))
}

#[utoipa::path(
    put,
    path = "/series/{id}",
    tag = "series",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Series ID")),
    request_body = SeriesPayload,
    responses(
        (status = 200, description = "Series updated", body = Series),
        (status = 404, description = "Series not found")
    )
)]
pub async fn update_series(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    AppJson(data): AppJson<SeriesPayload>,
) -> AppResult<Json<Series>> {
    Ok(Json(state.services.series.update(user.user_id(), id, data).await?))
}

/// Delete a series; its books stay without a series
#[utoipa::path(
    delete,
    path = "/series/{id}",
    tag = "series",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Series ID")),
    responses(
        (status = 204, description = "Series deleted"),
        (status = 404, description = "Series not found")
    )
)]
pub async fn delete_series(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.series.delete(user.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
