//! Libris library lending server
//!
//! A REST JSON API for managing a library's catalog, its borrowers and the
//! books lent to them. Staff authenticate with a token carried in the
//! `x-auth` header.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire services on top of a repository
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, config.auth);
        Self {
            services: Arc::new(services),
        }
    }
}
