//! Business logic services

pub mod admins;
pub mod borrowed;
pub mod catalog;
pub mod documents;
pub mod sessions;

use crate::{config::AuthConfig, repository::Repository};

pub use documents::{DeleteStatus, UpdateStatus};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub admins: admins::AdminService,
    pub sessions: sessions::SessionService,
    pub catalog: catalog::CatalogService,
    pub borrowed: borrowed::BorrowedService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            admins: admins::AdminService::new(repository.admins.clone()),
            sessions: sessions::SessionService::new(auth_config),
            catalog: catalog::CatalogService::new(
                repository.books.clone(),
                repository.categories.clone(),
            ),
            borrowed: borrowed::BorrowedService::new(repository.borrowed),
        }
    }
}
