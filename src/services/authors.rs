//! Author service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorIn},
        book::Book,
    },
    repository::Repository,
};

/// Author with the books they wrote
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors_list().await
    }

    /// One page of authors and the total count
    pub async fn list_page(&self, limit: i64, offset: i64) -> AppResult<(Vec<Author>, i64)> {
        let authors = self.repository.authors_list_page(limit, offset).await?;
        let total = self.repository.authors_count().await?;
        Ok((authors, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.repository.authors_get_by_id(id).await
    }

    pub async fn get_detail(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.authors_get_by_id(id).await?;
        let books = self.repository.books_list_by_author(id).await?;
        Ok(AuthorDetail { author, books })
    }

    pub async fn create(&self, data: &AuthorIn) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors_create(data).await?;
        tracing::info!("Created author id={} ({})", author.id, author.display_name());
        Ok(author)
    }

    pub async fn update(&self, id: i32, data: &AuthorIn) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors_update(id, data).await?;
        tracing::info!("Updated author id={}", id);
        Ok(author)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors_delete(id).await?;
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }
}
