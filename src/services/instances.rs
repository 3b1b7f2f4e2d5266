//! Book instance (copy) service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book_instance::{BookInstance, BookInstanceIn},
    repository::Repository,
};

#[derive(Clone)]
pub struct InstancesService {
    repository: Repository,
}

impl InstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        self.repository.instances_list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.instances_get_by_id(id).await
    }

    pub async fn create(&self, data: &BookInstanceIn) -> AppResult<BookInstance> {
        data.validate()?;
        let copy = self.repository.instances_create(data).await?;
        tracing::info!("Created copy {} of book {}", copy.id, copy.book_id);
        Ok(copy)
    }

    pub async fn update(&self, id: Uuid, data: &BookInstanceIn) -> AppResult<BookInstance> {
        data.validate()?;
        let copy = self.repository.instances_update(id, data).await?;
        tracing::info!("Updated copy {} (status {})", id, copy.status.code());
        Ok(copy)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.instances_delete(id).await?;
        tracing::info!("Deleted copy {}", id);
        Ok(())
    }
}
