//! Bookshelf service

use validator::Validate;

use crate::{
    error::AppResult,
    models::bookshelf::{Bookshelf, BookshelfPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookshelvesService {
    repository: Repository,
}

impl BookshelvesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: i32) -> AppResult<Vec<Bookshelf>> {
        self.repository.bookshelves_list(user_id).await
    }

    pub async fn get(&self, user_id: i32, id: i32) -> AppResult<Bookshelf> {
        self.repository.bookshelves_get(user_id, id).await
    }

    pub async fn create(&self, user_id: i32, data: BookshelfPayload) -> AppResult<Bookshelf> {
        let data = data.normalized();
        data.validate()?;
        let shelf = self.repository.bookshelves_create(user_id, &data).await?;
        tracing::info!("User {} created bookshelf {}", user_id, shelf.id);
        Ok(shelf)
    }

    pub async fn update(&self, user_id: i32, id: i32, data: BookshelfPayload) -> AppResult<Bookshelf> {
        let data = data.normalized();
        data.validate()?;
        self.repository.bookshelves_update(user_id, id, &data).await
    }

    /// Delete a bookshelf and every book on it
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        let removed = self.repository.bookshelves_delete(user_id, id).await?;
        tracing::info!(
            "User {} deleted bookshelf {} ({} books removed)",
            user_id, id, removed
        );
        Ok(())
    }
}
