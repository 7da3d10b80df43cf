//! Catalog service (categories and books)

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookFields, BookInput},
        Book, Category, CategorySnapshot, ObjectId,
    },
    repository::{BooksStore, CategoriesStore, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

fn category_not_found() -> AppError {
    AppError::NotFound("The category with the given id was not found".to_string())
}

fn book_not_found() -> AppError {
    AppError::NotFound("The book with the given id was not found".to_string())
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories_list().await
    }

    pub async fn get_category(&self, id: &ObjectId) -> AppResult<Category> {
        self.repository
            .categories_get_by_id(id)
            .await?
            .ok_or_else(category_not_found)
    }

    pub async fn create_category(&self, name: &str) -> AppResult<Category> {
        self.repository.categories_create(name).await
    }

    /// Rename a category. Books keep the name they were saved with.
    pub async fn update_category(&self, id: &ObjectId, name: &str) -> AppResult<Category> {
        self.repository
            .categories_update(id, name)
            .await?
            .ok_or_else(category_not_found)
    }

    pub async fn delete_category(&self, id: &ObjectId) -> AppResult<Category> {
        self.repository
            .categories_delete(id)
            .await?
            .ok_or_else(category_not_found)
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books_list().await
    }

    pub async fn get_book(&self, id: &ObjectId) -> AppResult<Book> {
        self.repository
            .books_get_by_id(id)
            .await?
            .ok_or_else(book_not_found)
    }

    pub async fn create_book(&self, input: BookInput) -> AppResult<Book> {
        let category = self.resolve_category(&input.category_id).await?;
        let book = self
            .repository
            .books_create(&BookFields::new(input, category))
            .await?;
        tracing::info!(book_id = %book.id, stock = book.stock, "Book added to catalog");
        Ok(book)
    }

    pub async fn update_book(&self, id: &ObjectId, input: BookInput) -> AppResult<Book> {
        let category = self.resolve_category(&input.category_id).await?;
        self.repository
            .books_update(id, &BookFields::new(input, category))
            .await?
            .ok_or_else(book_not_found)
    }

    pub async fn delete_book(&self, id: &ObjectId) -> AppResult<Book> {
        self.repository
            .books_delete(id)
            .await?
            .ok_or_else(book_not_found)
    }

    /// Look up the category a book refers to and copy it
    async fn resolve_category(&self, category_id: &ObjectId) -> AppResult<CategorySnapshot> {
        self.repository
            .categories_get_by_id(category_id)
            .await?
            .map(|category| CategorySnapshot::from(&category))
            .ok_or_else(|| AppError::BadRequest("Invalid category".to_string()))
    }
}
