//! Lending service: borrowing and returning books

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult, LoanError},
    models::{BookSnapshot, Borrow, BorrowerSnapshot, ObjectId},
    repository::{BooksStore, BorrowersStore, BorrowsStore, Repository},
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Borrow>> {
        self.repository.borrows_list().await
    }

    pub async fn get_by_id(&self, id: &ObjectId) -> AppResult<Borrow> {
        self.repository
            .borrows_get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("The borrow with the given id was not found".to_string()))
    }

    /// Lend one copy of a book to a borrower
    pub async fn create_borrow(&self, borrower_id: &ObjectId, book_id: &ObjectId) -> AppResult<Borrow> {
        self.create_borrow_at(borrower_id, book_id, Utc::now()).await
    }

    pub async fn create_borrow_at(
        &self,
        borrower_id: &ObjectId,
        book_id: &ObjectId,
        now: DateTime<Utc>,
    ) -> AppResult<Borrow> {
        let borrower = self
            .repository
            .borrowers_get_by_id(borrower_id)
            .await?
            .ok_or(LoanError::InvalidBorrower)?;

        let book = self
            .repository
            .books_get_by_id(book_id)
            .await?
            .ok_or(LoanError::InvalidBook)?;

        if !book.in_stock() {
            tracing::debug!(book_id = %book.id, "Borrow rejected, book not in stock");
            return Err(LoanError::OutOfStock.into());
        }

        // Stock is re-checked atomically by the store
        let borrow = Borrow::new(
            BorrowerSnapshot::from(&borrower),
            BookSnapshot::from(&book),
            now,
        );
        let borrow = self.repository.borrows_checkout(&borrow).await?;

        tracing::info!(
            borrow_id = %borrow.id,
            borrower_id = %borrow.borrower.id,
            book_id = %borrow.book.id,
            due_date = %borrow.due_date,
            "Book borrowed"
        );

        Ok(borrow)
    }

    /// Close a borrow, settle its penalty and restock the book
    pub async fn return_borrow(&self, borrow_id: &ObjectId) -> AppResult<Borrow> {
        self.return_borrow_at(borrow_id, Utc::now()).await
    }

    pub async fn return_borrow_at(&self, borrow_id: &ObjectId, at: DateTime<Utc>) -> AppResult<Borrow> {
        let mut borrow = self
            .repository
            .borrows_get_by_id(borrow_id)
            .await?
            .ok_or_else(|| AppError::NotFound("borrow not found".to_string()))?;

        if borrow.is_returned() {
            tracing::debug!(borrow_id = %borrow.id, "Return already processed");
            return Err(LoanError::AlreadyReturned.into());
        }

        borrow.mark_returned(at);
        let borrow = self.repository.borrows_checkin(&borrow).await?;

        tracing::info!(
            borrow_id = %borrow.id,
            penalty_fee = borrow.penalty_fee.unwrap_or_default(),
            "Book returned"
        );

        Ok(borrow)
    }
}
