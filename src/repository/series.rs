//! Series domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::series::{Series, SeriesPayload},
};

impl Repository {
    /// List series owned by `user_id`
    pub async fn series_list(&self, user_id: i32) -> AppResult<Vec<Series>> {
        let rows = sqlx::query_as::<_, Series>(
            "SELECT id, title, user_id FROM series WHERE user_id = $1 ORDER BY title, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a series owned by `user_id`
    pub async fn series_get(&self, user_id: i32, id: i32) -> AppResult<Series> {
        sqlx::query_as::<_, Series>(
            "SELECT id, title, user_id FROM series WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Series {} not found", id)))
    }

    pub async fn series_create(&self, user_id: i32, data: &SeriesPayload) -> AppResult<Series> {
        let row = sqlx::query_as::<_, Series>(
            "INSERT INTO series (title, user_id) VALUES ($1, $2) RETURNING id, title, user_id",
        )
        .bind(&data.title)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn series_update(&self, user_id: i32, id: i32, data: &SeriesPayload) -> AppResult<Series> {
        sqlx::query_as::<_, Series>(
            r#"
            UPDATE series SET title = $1
            WHERE id = $2 AND user_id = $3
            RETURNING id, title, user_id
            "#,
        )
        .bind(&data.title)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Series {} not found", id)))
    }

    /// Delete a series owned by `user_id`; its books lose the series reference
    pub async fn series_delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM series WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Series {} not found", id)));
        }
        Ok(())
    }
}
