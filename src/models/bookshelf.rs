//! Bookshelf model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Bookshelf record. Every book sits on exactly one bookshelf.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Bookshelf {
    pub id: i32,
    pub name: String,
    /// Owning user
    #[serde(rename = "user")]
    pub user_id: i32,
}

/// Create / update bookshelf request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookshelfPayload {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
}

impl BookshelfPayload {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}
