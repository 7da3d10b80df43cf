//! Repository layer for database operations
//!
//! Each domain declares an async store trait next to its PostgreSQL
//! implementation. [`memory::MemoryRepository`] implements the same traits
//! in process. Services talk to whichever backend is configured through
//! [`Repository`].

pub mod books;
pub mod borrowers;
pub mod borrows;
pub mod categories;
pub mod memory;
pub mod users;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::{AppError, AppResult};

pub use books::BooksStore;
pub use borrowers::BorrowersStore;
pub use borrows::BorrowsStore;
pub use categories::CategoriesStore;
pub use users::UsersStore;

/// Everything the services need from a backend
#[async_trait]
pub trait Store:
    UsersStore + CategoriesStore + BooksStore + BorrowersStore + BorrowsStore + Send + Sync + 'static
{
    /// Check the backend can serve requests
    async fn ping(&self) -> AppResult<()>;
}

/// Shared handle on the configured store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn Store>,
}

impl Repository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Repository backed by the given PostgreSQL pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::new(Arc::new(PgRepository::new(pool)))
    }

    /// Repository backed by an empty in-memory store
    pub fn memory() -> Self {
        Self::new(Arc::new(memory::MemoryRepository::new()))
    }
}

impl Deref for Repository {
    type Target = dyn Store;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}

/// PostgreSQL store holding the connection pool
#[derive(Clone)]
pub struct PgRepository {
    pub pool: Pool<Postgres>,
}

impl PgRepository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgRepository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
