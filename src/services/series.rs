//! Series service

use validator::Validate;

use crate::{
    error::AppResult,
    models::series::{Series, SeriesPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct SeriesService {
    repository: Repository,
}

impl SeriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: i32) -> AppResult<Vec<Series>> {
        self.repository.series_list(user_id).await
    }

    pub async fn get(&self, user_id: i32, id: i32) -> AppResult<Series> {
        self.repository.series_get(user_id, id).await
    }

    pub async fn create(&self, user_id: i32, data: SeriesPayload) -> AppResult<Series> {
        let data = data.normalized();
        data.validate()?;
        let series = self.repository.series_create(user_id, &data).await?;
        tracing::info!("User {} created series {}", user_id, series.id);
        Ok(series)
    }

    pub async fn update(&self, user_id: i32, id: i32, data: SeriesPayload) -> AppResult<Series> {
        let data = data.normalized();
        data.validate()?;
        self.repository.series_update(user_id, id, &data).await
    }

    /// Delete a series; its books stay, detached from the series
    pub async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        self.repository.series_delete(user_id, id).await?;
        tracing::info!("User {} deleted series {}", user_id, id);
        Ok(())
    }
}
