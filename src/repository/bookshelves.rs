//! Bookshelf domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::bookshelf::{Bookshelf, BookshelfPayload},
};

impl Repository {
    /// List bookshelves owned by `user_id`
    pub async fn bookshelves_list(&self, user_id: i32) -> AppResult<Vec<Bookshelf>> {
        let rows = sqlx::query_as::<_, Bookshelf>(
            "SELECT id, name, user_id FROM bookshelves WHERE user_id = $1 ORDER BY name, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a bookshelf owned by `user_id`
    pub async fn bookshelves_get(&self, user_id: i32, id: i32) -> AppResult<Bookshelf> {
        sqlx::query_as::<_, Bookshelf>(
            "SELECT id, name, user_id FROM bookshelves WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Bookshelf {} not found", id)))
    }

    pub async fn bookshelves_create(&self, user_id: i32, data: &BookshelfPayload) -> AppResult<Bookshelf> {
        let row = sqlx::query_as::<_, Bookshelf>(
            "INSERT INTO bookshelves (name, user_id) VALUES ($1, $2) RETURNING id, name, user_id",
        )
        .bind(&data.name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn bookshelves_update(
        &self,
        user_id: i32,
        id: i32,
        data: &BookshelfPayload,
    ) -> AppResult<Bookshelf> {
        sqlx::query_as::<_, Bookshelf>(
            r#"
            UPDATE bookshelves SET name = $1
            WHERE id = $2 AND user_id = $3
            RETURNING id, name, user_id
            "#,
        )
        .bind(&data.name)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Bookshelf {} not found", id)))
    }

    /// Delete a bookshelf owned by `user_id` together with every book on it.
    /// Returns the number of books removed.
    pub async fn bookshelves_delete(&self, user_id: i32, id: i32) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        let books = sqlx::query("DELETE FROM books WHERE bookshelf_id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM bookshelves WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Bookshelf {} not found", id)));
        }

        tx.commit().await?;
        Ok(books)
    }
}
