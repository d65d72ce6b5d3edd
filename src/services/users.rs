//! Registration and authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{LoginRequest, RegisterUser, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account
    pub async fn register(&self, data: RegisterUser) -> AppResult<User> {
        let data = RegisterUser {
            username: data.username.trim().to_string(),
            email: data
                .email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            password: data.password,
        };
        data.validate()?;

        if self.repository.users_username_exists(&data.username).await? {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let hash = hash_password(&data.password)?;
        let user = self
            .repository
            .users_create(&data.username, data.email.as_deref(), &hash)
            .await?;
        tracing::info!("Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Check credentials and issue a JWT
    pub async fn authenticate(&self, data: &LoginRequest) -> AppResult<(String, User)> {
        data.validate()?;

        let user = self
            .repository
            .users_get_by_username(&data.username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(&user.password, &data.password)? {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        tracing::info!("User {} logged in", user.id);
        Ok((token, user))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users_get_by_id(id).await
    }

    /// Issue a new token for the identity in still-valid `claims`
    pub fn refresh_token(&self, claims: &UserClaims) -> AppResult<String> {
        claims
            .renewed(self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        UserClaims::for_user(user, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
