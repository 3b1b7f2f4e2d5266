//! Genre service

use validator::Validate;

use crate::{
    error::AppResult,
    models::genre::{Genre, GenreIn},
    repository::Repository,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres_get_by_id(id).await
    }

    pub async fn create(&self, data: &GenreIn) -> AppResult<Genre> {
        data.validate()?;
        let genre = self.repository.genres_create(data).await?;
        tracing::info!("Created genre id={} ({})", genre.id, genre.name);
        Ok(genre)
    }

    pub async fn update(&self, id: i32, data: &GenreIn) -> AppResult<Genre> {
        data.validate()?;
        let genre = self.repository.genres_update(id, data).await?;
        tracing::info!("Updated genre id={}", id);
        Ok(genre)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.genres_delete(id).await?;
        tracing::info!("Deleted genre id={}", id);
        Ok(())
    }
}
