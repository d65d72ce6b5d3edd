//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookRecord},
};

/// Projection shared by every book read: the book row `b` plus the display
/// names of its relations
const BOOK_COLUMNS: &str = r#"
    b.id, b.isbn, b.title, b.subtitle, b.author,
    b.small_thumbnail_url, b.large_thumbnail_url, b.details,
    b.volume_number, b.user_id, b.bookshelf_id, b.category_id, b.series_id,
    s.name AS bookshelf_name, c.name AS category_name, se.title AS series_title
"#;

const BOOK_JOINS: &str = r#"
    LEFT JOIN bookshelves s ON s.id = b.bookshelf_id
    LEFT JOIN categories c ON c.id = b.category_id
    LEFT JOIN series se ON se.id = b.series_id
"#;

impl Repository {
    /// List books owned by `user_id`, optionally restricted to one bookshelf.
    /// Display ordering is applied by the caller.
    pub async fn books_list(&self, user_id: i32, bookshelf_id: Option<i32>) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books b {} WHERE b.user_id = $1 AND ($2::INT IS NULL OR b.bookshelf_id = $2)",
            BOOK_COLUMNS, BOOK_JOINS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(user_id)
            .bind(bookshelf_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a book owned by `user_id`
    pub async fn books_get(&self, user_id: i32, id: i32) -> AppResult<Book> {
        let query = format!(
            "SELECT {} FROM books b {} WHERE b.id = $1 AND b.user_id = $2",
            BOOK_COLUMNS, BOOK_JOINS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Insert a book; relations must already be checked against `record.user_id`
    pub async fn books_create(&self, record: &BookRecord) -> AppResult<Book> {
        let query = format!(
            r#"
            WITH b AS (
                INSERT INTO books (
                    user_id, isbn, title, subtitle, author,
                    small_thumbnail_url, large_thumbnail_url, details,
                    volume_number, bookshelf_id, category_id, series_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING *
            )
            SELECT {} FROM b {}
            "#,
            BOOK_COLUMNS, BOOK_JOINS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(record.user_id)
            .bind(&record.isbn)
            .bind(&record.title)
            .bind(&record.subtitle)
            .bind(&record.author)
            .bind(&record.small_thumbnail_url)
            .bind(&record.large_thumbnail_url)
            .bind(&record.details)
            .bind(record.volume_number)
            .bind(record.bookshelf_id)
            .bind(record.category_id)
            .bind(record.series_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replace every stored field of a book owned by `record.user_id`
    pub async fn books_update(&self, id: i32, record: &BookRecord) -> AppResult<Book> {
        let query = format!(
            r#"
            WITH b AS (
                UPDATE books SET
                    isbn = $3, title = $4, subtitle = $5, author = $6,
                    small_thumbnail_url = $7, large_thumbnail_url = $8, details = $9,
                    volume_number = $10, bookshelf_id = $11, category_id = $12, series_id = $13,
                    updated_at = NOW()
                WHERE id = $1 AND user_id = $2
                RETURNING *
            )
            SELECT {} FROM b {}
            "#,
            BOOK_COLUMNS, BOOK_JOINS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(record.user_id)
            .bind(&record.isbn)
            .bind(&record.title)
            .bind(&record.subtitle)
            .bind(&record.author)
            .bind(&record.small_thumbnail_url)
            .bind(&record.large_thumbnail_url)
            .bind(&record.details)
            .bind(record.volume_number)
            .bind(record.bookshelf_id)
            .bind(record.category_id)
            .bind(record.series_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete a book owned by `user_id`
    pub async fn books_delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
