//! Category domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CategoryPayload},
};

impl Repository {
    /// List categories owned by `user_id`
    pub async fn categories_list(&self, user_id: i32) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, user_id FROM categories WHERE user_id = $1 ORDER BY name, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a category owned by `user_id`
    pub async fn categories_get(&self, user_id: i32, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, user_id FROM categories WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Create a category for `user_id`
    pub async fn categories_create(&self, user_id: i32, data: &CategoryPayload) -> AppResult<Category> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, user_id) VALUES ($1, $2) RETURNING id, name, user_id",
        )
        .bind(&data.name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Rename a category owned by `user_id`
    pub async fn categories_update(
        &self,
        user_id: i32,
        id: i32,
        data: &CategoryPayload,
    ) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET name = $1
            WHERE id = $2 AND user_id = $3
            RETURNING id, name, user_id
            "#,
        )
        .bind(&data.name)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category owned by `user_id`. Books keep existing with no category
    /// (`ON DELETE SET NULL`).
    pub async fn categories_delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}
