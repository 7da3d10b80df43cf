//! Borrowers domain methods

use async_trait::async_trait;

use super::PgRepository;
use crate::{
    error::AppResult,
    models::{Borrower, BorrowerInput, ObjectId},
};

#[async_trait]
pub trait BorrowersStore {
    /// List all borrowers, sorted by last name
    async fn borrowers_list(&self) -> AppResult<Vec<Borrower>>;

    async fn borrowers_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Borrower>>;

    async fn borrowers_create(&self, data: &BorrowerInput) -> AppResult<Borrower>;

    /// Replace a borrower's fields; `None` when it does not exist
    async fn borrowers_update(
        &self,
        id: &ObjectId,
        data: &BorrowerInput,
    ) -> AppResult<Option<Borrower>>;

    /// Delete a borrower, returning what was removed
    async fn borrowers_delete(&self, id: &ObjectId) -> AppResult<Option<Borrower>>;
}

#[async_trait]
impl BorrowersStore for PgRepository {
    async fn borrowers_list(&self) -> AppResult<Vec<Borrower>> {
        let rows = sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers ORDER BY last_name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn borrowers_get_by_id(&self, id: &ObjectId) -> AppResult<Option<Borrower>> {
        let row = sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn borrowers_create(&self, data: &BorrowerInput) -> AppResult<Borrower> {
        let row = sqlx::query_as::<_, Borrower>(
            r#"
            INSERT INTO borrowers (id, first_name, last_name, age, gender, email, address, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(ObjectId::new())
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.age)
        .bind(&data.gender)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn borrowers_update(
        &self,
        id: &ObjectId,
        data: &BorrowerInput,
    ) -> AppResult<Option<Borrower>> {
        let row = sqlx::query_as::<_, Borrower>(
            r#"
            UPDATE borrowers
            SET first_name = $2, last_name = $3, age = $4, gender = $5,
                email = $6, address = $7, phone = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.age)
        .bind(&data.gender)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn borrowers_delete(&self, id: &ObjectId) -> AppResult<Option<Borrower>> {
        let row = sqlx::query_as::<_, Borrower>("DELETE FROM borrowers WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
