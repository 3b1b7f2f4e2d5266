//! Language service

use validator::Validate;

use crate::{
    error::AppResult,
    models::language::{Language, LanguageIn},
    repository::Repository,
};

#[derive(Clone)]
pub struct LanguagesService {
    repository: Repository,
}

impl LanguagesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Language>> {
        self.repository.languages_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Language> {
        self.repository.languages_get_by_id(id).await
    }

    pub async fn create(&self, data: &LanguageIn) -> AppResult<Language> {
        data.validate()?;
        let language = self.repository.languages_create(data).await?;
        tracing::info!("Created language id={} ({})", language.id, language.name);
        Ok(language)
    }

    pub async fn update(&self, id: i32, data: &LanguageIn) -> AppResult<Language> {
        data.validate()?;
        let language = self.repository.languages_update(id, data).await?;
        tracing::info!("Updated language id={}", id);
        Ok(language)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.languages_delete(id).await?;
        tracing::info!("Deleted language id={}", id);
        Ok(())
    }
}
