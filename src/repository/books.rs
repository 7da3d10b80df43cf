//! Books domain methods

use async_trait::async_trait;

use super::PgRepository;
use crate::{
    error::AppResult,
    models::{
        book::{Book, BookFields, BookRow},
        ObjectId,
    },
};

#[async_trait]
pub trait BooksStore {
    /// List all books, sorted by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;

    async fn books_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Book>>;

    async fn books_create(&self, book: &BookFields) -> AppResult<Book>;

    /// Replace a book's fields; `None` when it does not exist
    async fn books_update(&self, id: &ObjectId, book: &BookFields) -> AppResult<Option<Book>>;

    /// Delete a book, returning what was removed
    async fn books_delete(&self, id: &ObjectId) -> AppResult<Option<Book>>;
}

#[async_trait]
impl BooksStore for PgRepository {
    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>("SELECT * FROM books ORDER BY title, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn books_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }

    async fn books_create(&self, book: &BookFields) -> AppResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (id, title, category_id, category_name, stock, failed_return_fee)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ObjectId::new())
        .bind(&book.title)
        .bind(&book.category.id)
        .bind(&book.category.name)
        .bind(book.stock)
        .bind(book.failed_return_fee)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn books_update(&self, id: &ObjectId, book: &BookFields) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
            SET title = $2, category_id = $3, category_name = $4,
                stock = $5, failed_return_fee = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.category.id)
        .bind(&book.category.name)
        .bind(book.stock)
        .bind(book.failed_return_fee)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn books_delete(&self, id: &ObjectId) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>("DELETE FROM books WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }
}
