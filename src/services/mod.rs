//! Business logic services

pub mod authors;
pub mod books;
pub mod genres;
pub mod instances;
pub mod languages;
pub mod loans;
pub mod stats;
pub mod users;

use crate::{
    config::{AuthConfig, CatalogConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub languages: languages::LanguagesService,
    pub books: books::BooksService,
    pub instances: instances::InstancesService,
    pub loans: loans::LoansService,
    pub users: users::UsersService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, catalog_config: CatalogConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            languages: languages::LanguagesService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            instances: instances::InstancesService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone(), catalog_config),
            users: users::UsersService::new(repository.clone(), auth_config),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }
}
