//! Series model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Series record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Series {
    pub id: i32,
    pub title: String,
    /// Owning user
    #[serde(rename = "user")]
    pub user_id: i32,
}

/// Create / update series request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SeriesPayload {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,
}

impl SeriesPayload {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
        }
    }
}
