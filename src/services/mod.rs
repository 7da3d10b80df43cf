//! Business logic services

pub mod auth;
pub mod borrowers;
pub mod borrows;
pub mod catalog;

use crate::{
    config::AuthConfig,
    error::AppResult,
    repository::{Repository, Store},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub borrowers: borrowers::BorrowersService,
    pub borrows: borrows::BorrowsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            borrowers: borrowers::BorrowersService::new(repository.clone()),
            borrows: borrows::BorrowsService::new(repository.clone()),
            repository,
        }
    }

    /// Check the backing store answers
    pub async fn readiness(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
