//! Borrower management service

use crate::{
    error::{AppError, AppResult},
    models::{Borrower, BorrowerInput, ObjectId},
    repository::{BorrowersStore, Repository},
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("The borrower with the given id was not found".to_string())
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Borrower>> {
        self.repository.borrowers_list().await
    }

    pub async fn get_by_id(&self, id: &ObjectId) -> AppResult<Borrower> {
        self.repository
            .borrowers_get_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(&self, data: &BorrowerInput) -> AppResult<Borrower> {
        self.repository.borrowers_create(data).await
    }

    pub async fn update(&self, id: &ObjectId, data: &BorrowerInput) -> AppResult<Borrower> {
        self.repository
            .borrowers_update(id, data)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<Borrower> {
        self.repository
            .borrowers_delete(id)
            .await?
            .ok_or_else(not_found)
    }
}
