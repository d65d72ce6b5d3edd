//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{LoginRequest, LoginResponse, RegisterUser, TokenResponse, TokenStatus, UserInfo},
};

use super::{AppJson, AuthenticatedUser};

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    pub detail: String,
}

fn auth_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = UserInfo),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let user = state.services.users.register(data).await?;
    Ok((StatusCode::CREATED, Json(UserInfo::from(user))))
}

/// Log in and obtain an access token (also set as an HTTP-only cookie)
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    AppJson(data): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let (token, user) = state.services.users.authenticate(&data).await?;
    let jar = jar.add(auth_cookie(&state.config.auth, token.clone()));

    Ok((
        jar,
        Json(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            user: UserInfo::from(user),
        }),
    ))
}

/// Log out by clearing the auth cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse)
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let name = state.config.auth.cookie_name.clone();
    let jar = jar.remove(Cookie::build((name, "")).path("/"));
    (
        jar,
        Json(LogoutResponse {
            detail: "Successfully logged out.".to_string(),
        }),
    )
}

/// Re-issue the access token (and cookie) from a still-valid one
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New token issued", body = TokenResponse),
        (status = 401, description = "Token missing, invalid or expired", body = crate::error::ErrorResponse)
    )
)]
pub async fn refresh(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    user: AuthenticatedUser,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let token = state.services.users.refresh_token(&user.0)?;
    let jar = jar.add(auth_cookie(&state.config.auth, token.clone()));
    tracing::debug!("Refreshed token for user {}", user.user_id());

    Ok((
        jar,
        Json(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
        }),
    ))
}

/// Check the caller's access token without touching any resource
#[utoipa::path(
    post,
    path = "/auth/verify",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = TokenStatus),
        (status = 401, description = "Token missing, invalid or expired", body = crate::error::ErrorResponse)
    )
)]
pub async fn verify(user: AuthenticatedUser) -> Json<TokenStatus> {
    let claims = user.0;
    Json(TokenStatus {
        valid: true,
        user_id: claims.user_id,
        username: claims.sub,
        expires_at: claims.exp,
    })
}

/// Current user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<UserInfo>> {
    let user = match state.services.users.get_by_id(user.user_id()).await {
        Err(AppError::NotFound(_)) => {
            return Err(AppError::Authentication("Token refers to an unknown user".to_string()))
        }
        other => other?,
    };
    Ok(Json(UserInfo::from(user)))
}
