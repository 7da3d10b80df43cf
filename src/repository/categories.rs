//! Categories domain methods

use async_trait::async_trait;

use super::PgRepository;
use crate::{
    error::AppResult,
    models::{Category, ObjectId},
};

#[async_trait]
pub trait CategoriesStore {
    /// List all categories, sorted by name
    async fn categories_list(&self) -> AppResult<Vec<Category>>;

    async fn categories_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>>;

    async fn categories_create(&self, name: &str) -> AppResult<Category>;

    /// Rename a category; `None` when it does not exist
    async fn categories_update(&self, id: &ObjectId, name: &str) -> AppResult<Option<Category>>;

    /// Delete a category, returning what was removed
    async fn categories_delete(&self, id: &ObjectId) -> AppResult<Option<Category>>;
}

#[async_trait]
impl CategoriesStore for PgRepository {
    async fn categories_list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn categories_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn categories_create(&self, name: &str) -> AppResult<Category> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(ObjectId::new())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn categories_update(&self, id: &ObjectId, name: &str) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn categories_delete(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>("DELETE FROM categories WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
