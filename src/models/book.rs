//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{CategorySnapshot, ObjectId};

/// Upper bound on copies held for a single title
pub const MAX_STOCK: i32 = 30;
/// Upper bound on the per-day late fee
pub const MAX_FAILED_RETURN_FEE: f64 = 500.0;

/// Book in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub category: CategorySnapshot,
    /// Copies currently on the shelf
    pub stock: i32,
    /// Fee charged per day a borrow is overdue
    pub failed_return_fee: f64,
}

impl Book {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    id: ObjectId,
    title: String,
    category_id: ObjectId,
    category_name: String,
    stock: i32,
    failed_return_fee: f64,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            category: CategorySnapshot {
                id: row.category_id,
                name: row.category_name,
            },
            stock: row.stock,
            failed_return_fee: row.failed_return_fee,
        }
    }
}

/// Create or update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookInput {
    #[validate(length(min = 5, max = 50, message = "title must be 5-50 characters long"))]
    pub title: String,
    pub category_id: ObjectId,
    #[validate(range(min = 0, max = MAX_STOCK, message = "stock must be between 0 and 30"))]
    pub stock: i32,
    #[validate(range(min = 0.0, max = MAX_FAILED_RETURN_FEE, message = "failedReturnFee must be between 0 and 500"))]
    pub failed_return_fee: f64,
}

/// Book fields once the category has been resolved
#[derive(Debug, Clone)]
pub struct BookFields {
    pub title: String,
    pub category: CategorySnapshot,
    pub stock: i32,
    pub failed_return_fee: f64,
}

impl BookFields {
    pub fn new(input: BookInput, category: CategorySnapshot) -> Self {
        Self {
            title: input.title,
            category,
            stock: input.stock,
            failed_return_fee: input.failed_return_fee,
        }
    }
}

/// Copy of the book fields a borrow needs, taken when the book is lent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSnapshot {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub failed_return_fee: f64,
}

impl From<&Book> for BookSnapshot {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            failed_return_fee: book.failed_return_fee,
        }
    }
}
