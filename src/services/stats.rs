//! Catalog counts for the home page

use serde::Serialize;

use crate::{error::AppResult, models::book_instance::LoanStatus, repository::Repository};

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        Ok(CatalogSummary {
            num_books: self.repository.books_count().await?,
            num_instances: self.repository.instances_count().await?,
            num_instances_available: self
                .repository
                .instances_count_by_status(LoanStatus::Available)
                .await?,
            num_authors: self.repository.authors_count().await?,
            num_genres: self.repository.genres_count().await?,
        })
    }
}
