//! Borrow (loan) model and the lending rules attached to it

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{BookSnapshot, Borrower, ObjectId};

/// Days a book may be kept before late fees start accruing
pub const LOAN_DURATION_DAYS: i64 = 2;

/// Copy of the borrower's contact details taken when the book is lent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerSnapshot {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Borrower> for BorrowerSnapshot {
    fn from(borrower: &Borrower) -> Self {
        Self {
            id: borrower.id.clone(),
            first_name: borrower.first_name.clone(),
            last_name: borrower.last_name.clone(),
            email: borrower.email.clone(),
            phone: borrower.phone.clone(),
        }
    }
}

/// One lending of one book copy to one borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub borrower: BorrowerSnapshot,
    pub book: BookSnapshot,
    pub date_borrowed: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_returned: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty_fee: Option<f64>,
}

impl Borrow {
    /// Start a new borrow at `now`, due [`LOAN_DURATION_DAYS`] later
    pub fn new(borrower: BorrowerSnapshot, book: BookSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            borrower,
            book,
            date_borrowed: now,
            due_date: now + Duration::days(LOAN_DURATION_DAYS),
            date_returned: None,
            penalty_fee: None,
        }
    }

    pub fn is_returned(&self) -> bool {
        self.date_returned.is_some()
    }

    /// Whole days elapsed past the due date (negative while not yet due)
    pub fn days_overdue(&self, at: DateTime<Utc>) -> i64 {
        (at - self.due_date).num_days()
    }

    /// Fee owed if the book came back at `at`
    pub fn penalty_at(&self, at: DateTime<Utc>) -> f64 {
        let days = self.days_overdue(at);
        if days > 0 {
            days as f64 * self.book.failed_return_fee
        } else {
            0.0
        }
    }

    /// Record the return and settle the penalty
    pub fn mark_returned(&mut self, at: DateTime<Utc>) {
        self.penalty_fee = Some(self.penalty_at(at));
        self.date_returned = Some(at);
    }
}

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct BorrowRow {
    id: ObjectId,
    borrower_id: ObjectId,
    borrower_first_name: String,
    borrower_last_name: String,
    borrower_email: String,
    borrower_phone: String,
    book_id: ObjectId,
    book_title: String,
    book_failed_return_fee: f64,
    date_borrowed: DateTime<Utc>,
    due_date: DateTime<Utc>,
    date_returned: Option<DateTime<Utc>>,
    penalty_fee: Option<f64>,
}

impl From<BorrowRow> for Borrow {
    fn from(row: BorrowRow) -> Self {
        Borrow {
            id: row.id,
            borrower: BorrowerSnapshot {
                id: row.borrower_id,
                first_name: row.borrower_first_name,
                last_name: row.borrower_last_name,
                email: row.borrower_email,
                phone: row.borrower_phone,
            },
            book: BookSnapshot {
                id: row.book_id,
                title: row.book_title,
                failed_return_fee: row.book_failed_return_fee,
            },
            date_borrowed: row.date_borrowed,
            due_date: row.due_date,
            date_returned: row.date_returned,
            penalty_fee: row.penalty_fee,
        }
    }
}

/// Create borrow request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBorrow {
    pub borrower_id: ObjectId,
    pub book_id: ObjectId,
}

/// Return request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReturnBorrow {
    pub borrow_id: ObjectId,
}
