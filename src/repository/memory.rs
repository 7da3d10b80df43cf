//! In-memory store, used for local development and tests.
//!
//! All collections live behind a single `RwLock`; every operation that
//! touches more than one collection holds the write lock for its whole
//! duration, which gives the same all-or-nothing behavior as the
//! PostgreSQL transactions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    users::DUPLICATE_EMAIL, BooksStore, BorrowersStore, BorrowsStore, CategoriesStore, Store,
    UsersStore,
};
use crate::{
    error::{AppError, AppResult, LoanError},
    models::{
        book::MAX_STOCK,
        user::{NewUser, User},
        Book, BookFields, Borrow, Borrower, BorrowerInput, Category, ObjectId,
    },
};

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<ObjectId, User>,
    categories: HashMap<ObjectId, Category>,
    books: HashMap<ObjectId, Book>,
    borrowers: HashMap<ObjectId, Borrower>,
    borrows: HashMap<ObjectId, Borrow>,
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    data: RwLock<Collections>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by<T: Clone, K: Ord>(items: &HashMap<ObjectId, T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = items.values().cloned().collect();
    out.sort_by_key(|item| key(item));
    out
}

#[async_trait]
impl Store for MemoryRepository {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UsersStore for MemoryRepository {
    async fn users_get_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.data.read().await.users.get(id).cloned())
    }

    async fn users_get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.values().find(|u| u.email == email).cloned())
    }

    async fn users_email_exists(&self, email: &str) -> AppResult<bool> {
        let data = self.data.read().await;
        Ok(data.users.values().any(|u| u.email == email))
    }

    async fn users_create(&self, user: &NewUser) -> AppResult<User> {
        let mut data = self.data.write().await;
        if data.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }
        let created = User {
            id: ObjectId::new(),
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
        };
        data.users.insert(created.id.clone(), created.clone());
        Ok(created)
    }
}

#[async_trait]
impl CategoriesStore for MemoryRepository {
    async fn categories_list(&self) -> AppResult<Vec<Category>> {
        let data = self.data.read().await;
        Ok(sorted_by(&data.categories, |c| (c.name.clone(), c.id.clone())))
    }

    async fn categories_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        Ok(self.data.read().await.categories.get(id).cloned())
    }

    async fn categories_create(&self, name: &str) -> AppResult<Category> {
        let category = Category {
            id: ObjectId::new(),
            name: name.to_string(),
        };
        self.data
            .write()
            .await
            .categories
            .insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn categories_update(&self, id: &ObjectId, name: &str) -> AppResult<Option<Category>> {
        let mut data = self.data.write().await;
        Ok(data.categories.get_mut(id).map(|category| {
            category.name = name.to_string();
            category.clone()
        }))
    }

    async fn categories_delete(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        Ok(self.data.write().await.categories.remove(id))
    }
}

#[async_trait]
impl BooksStore for MemoryRepository {
    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let data = self.data.read().await;
        Ok(sorted_by(&data.books, |b| (b.title.clone(), b.id.clone())))
    }

    async fn books_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Book>> {
        Ok(self.data.read().await.books.get(id).cloned())
    }

    async fn books_create(&self, book: &BookFields) -> AppResult<Book> {
        let created = Book {
            id: ObjectId::new(),
            title: book.title.clone(),
            category: book.category.clone(),
            stock: book.stock,
            failed_return_fee: book.failed_return_fee,
        };
        self.data
            .write()
            .await
            .books
            .insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn books_update(&self, id: &ObjectId, book: &BookFields) -> AppResult<Option<Book>> {
        let mut data = self.data.write().await;
        Ok(data.books.get_mut(id).map(|stored| {
            stored.title = book.title.clone();
            stored.category = book.category.clone();
            stored.stock = book.stock;
            stored.failed_return_fee = book.failed_return_fee;
            stored.clone()
        }))
    }

    async fn books_delete(&self, id: &ObjectId) -> AppResult<Option<Book>> {
        Ok(self.data.write().await.books.remove(id))
    }
}

fn borrower_from_input(id: ObjectId, data: &BorrowerInput) -> Borrower {
    Borrower {
        id,
        first_name: data.first_name.clone(),
        last_name: data.last_name.clone(),
        age: data.age,
        gender: data.gender.clone(),
        email: data.email.clone(),
        address: data.address.clone(),
        phone: data.phone.clone(),
    }
}

#[async_trait]
impl BorrowersStore for MemoryRepository {
    async fn borrowers_list(&self) -> AppResult<Vec<Borrower>> {
        let data = self.data.read().await;
        Ok(sorted_by(&data.borrowers, |b| (b.last_name.clone(), b.id.clone())))
    }

    async fn borrowers_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Borrower>> {
        Ok(self.data.read().await.borrowers.get(id).cloned())
    }

    async fn borrowers_create(&self, data: &BorrowerInput) -> AppResult<Borrower> {
        let borrower = borrower_from_input(ObjectId::new(), data);
        self.data
            .write()
            .await
            .borrowers
            .insert(borrower.id.clone(), borrower.clone());
        Ok(borrower)
    }

    async fn borrowers_update(
        &self,
        id: &ObjectId,
        data: &BorrowerInput,
    ) -> AppResult<Option<Borrower>> {
        let mut collections = self.data.write().await;
        Ok(collections.borrowers.get_mut(id).map(|stored| {
            *stored = borrower_from_input(id.clone(), data);
            stored.clone()
        }))
    }

    async fn borrowers_delete(&self, id: &ObjectId) -> AppResult<Option<Borrower>> {
        Ok(self.data.write().await.borrowers.remove(id))
    }
}

#[async_trait]
impl BorrowsStore for MemoryRepository {
    async fn borrows_list(&self) -> AppResult<Vec<Borrow>> {
        let data = self.data.read().await;
        let mut borrows = sorted_by(&data.borrows, |b| (b.date_borrowed, b.id.clone()));
        borrows.reverse();
        Ok(borrows)
    }

    async fn borrows_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Borrow>> {
        Ok(self.data.read().await.borrows.get(id).cloned())
    }

    async fn borrows_checkout(&self, borrow: &Borrow) -> AppResult<Borrow> {
        let mut data = self.data.write().await;

        let book = data
            .books
            .get_mut(&borrow.book.id)
            .ok_or(LoanError::InvalidBook)?;
        if book.stock <= 0 {
            return Err(LoanError::OutOfStock.into());
        }
        book.stock -= 1;

        data.borrows.insert(borrow.id.clone(), borrow.clone());
        Ok(borrow.clone())
    }

    async fn borrows_checkin(&self, borrow: &Borrow) -> AppResult<Borrow> {
        let mut data = self.data.write().await;

        let stored = data
            .borrows
            .get_mut(&borrow.id)
            .ok_or_else(|| AppError::NotFound("borrow not found".to_string()))?;
        if stored.is_returned() {
            return Err(LoanError::AlreadyReturned.into());
        }
        stored.date_returned = borrow.date_returned;
        stored.penalty_fee = borrow.penalty_fee;
        let updated = stored.clone();

        if let Some(book) = data.books.get_mut(&borrow.book.id) {
            book.stock = (book.stock + 1).min(MAX_STOCK);
        }

        Ok(updated)
    }
}
