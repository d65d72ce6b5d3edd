//! Category service

use validator::Validate;

use crate::{
    error::AppResult,
    models::category::{Category, CategoryPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: i32) -> AppResult<Vec<Category>> {
        self.repository.categories_list(user_id).await
    }

    pub async fn get(&self, user_id: i32, id: i32) -> AppResult<Category> {
        self.repository.categories_get(user_id, id).await
    }

    pub async fn create(&self, user_id: i32, data: CategoryPayload) -> AppResult<Category> {
        let data = data.normalized();
        data.validate()?;
        let category = self.repository.categories_create(user_id, &data).await?;
        tracing::info!("User {} created category {}", user_id, category.id);
        Ok(category)
    }

    pub async fn update(&self, user_id: i32, id: i32, data: CategoryPayload) -> AppResult<Category> {
        let data = data.normalized();
        data.validate()?;
        self.repository.categories_update(user_id, id, &data).await
    }

    /// Delete a category; books filed under it become uncategorized
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        self.repository.categories_delete(user_id, id).await?;
        tracing::info!("User {} deleted category {}", user_id, id);
        Ok(())
    }
}
