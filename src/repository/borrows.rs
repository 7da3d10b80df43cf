//! Borrows repository: lending records and the stock movements tied to them

use async_trait::async_trait;

use super::PgRepository;
use crate::{
    error::{AppResult, LoanError},
    models::{
        book::MAX_STOCK,
        borrow::{Borrow, BorrowRow},
        ObjectId,
    },
};

#[async_trait]
pub trait BorrowsStore {
    /// List all borrows, most recent first
    async fn borrows_list(&self) -> AppResult<Vec<Borrow>>;

    async fn borrows_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Borrow>>;

    /// Take one copy of `borrow.book` off the shelf and record the borrow.
    ///
    /// Both writes happen atomically: when no copy is left (or the book is
    /// gone) nothing is written and the matching [`LoanError`] is returned.
    async fn borrows_checkout(&self, borrow: &Borrow) -> AppResult<Borrow>;

    /// Persist the return fields of `borrow` and put the copy back on the
    /// shelf, atomically. Fails with [`LoanError::AlreadyReturned`] if the
    /// stored borrow was returned in the meantime.
    async fn borrows_checkin(&self, borrow: &Borrow) -> AppResult<Borrow>;
}

#[async_trait]
impl BorrowsStore for PgRepository {
    async fn borrows_list(&self) -> AppResult<Vec<Borrow>> {
        let rows = sqlx::query_as::<_, BorrowRow>(
            "SELECT * FROM borrows ORDER BY date_borrowed DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Borrow::from).collect())
    }

    async fn borrows_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Borrow>> {
        let row = sqlx::query_as::<_, BorrowRow>("SELECT * FROM borrows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Borrow::from))
    }

    async fn borrows_checkout(&self, borrow: &Borrow) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        // Conditional decrement: concurrent checkouts serialize on the row lock
        let remaining: Option<i32> = sqlx::query_scalar(
            "UPDATE books SET stock = stock - 1 WHERE id = $1 AND stock > 0 RETURNING stock",
        )
        .bind(&borrow.book.id)
        .fetch_optional(&mut *tx)
        .await?;

        if remaining.is_none() {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                .bind(&borrow.book.id)
                .fetch_one(&mut *tx)
                .await?;
            tx.rollback().await?;
            return Err(if exists {
                LoanError::OutOfStock
            } else {
                LoanError::InvalidBook
            }
            .into());
        }

        let row = sqlx::query_as::<_, BorrowRow>(
            r#"
            INSERT INTO borrows (
                id, borrower_id, borrower_first_name, borrower_last_name,
                borrower_email, borrower_phone, book_id, book_title,
                book_failed_return_fee, date_borrowed, due_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&borrow.id)
        .bind(&borrow.borrower.id)
        .bind(&borrow.borrower.first_name)
        .bind(&borrow.borrower.last_name)
        .bind(&borrow.borrower.email)
        .bind(&borrow.borrower.phone)
        .bind(&borrow.book.id)
        .bind(&borrow.book.title)
        .bind(borrow.book.failed_return_fee)
        .bind(borrow.date_borrowed)
        .bind(borrow.due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn borrows_checkin(&self, borrow: &Borrow) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BorrowRow>(
            r#"
            UPDATE borrows
            SET date_returned = $2, penalty_fee = $3
            WHERE id = $1 AND date_returned IS NULL
            RETURNING *
            "#,
        )
        .bind(&borrow.id)
        .bind(borrow.date_returned)
        .bind(borrow.penalty_fee)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Err(LoanError::AlreadyReturned.into());
        };

        // No-op when the book has been deleted since it was lent
        sqlx::query("UPDATE books SET stock = LEAST(stock + 1, $2) WHERE id = $1")
            .bind(&borrow.book.id)
            .bind(MAX_STOCK)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }
}
