//! Borrower model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::ObjectId;

/// Library member who borrows books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

/// Create or update borrower request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BorrowerInput {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 3, max = 50, message = "firstName must be 3-50 characters long"))]
    pub first_name: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 3, max = 50, message = "lastName must be 3-50 characters long"))]
    pub last_name: String,
    #[validate(range(min = 8, max = 100, message = "age must be between 8 and 100"))]
    pub age: i32,
    #[validate(length(min = 1, message = "gender is required"))]
    pub gender: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(
        length(min = 10, max = 100, message = "email must be 10-100 characters long"),
        email(message = "email must be a valid email")
    )]
    pub email: String,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 10, max = 100, message = "address must be 10-100 characters long"))]
    pub address: String,
    #[validate(length(min = 7, max = 20, message = "phone must be 7-20 characters long"))]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BorrowerInput {
        BorrowerInput {
            first_name: "first".to_string(),
            last_name: "last".to_string(),
            age: 30,
            gender: "male".to_string(),
            email: "test@mail.com".to_string(),
            address: "12 Long Street".to_string(),
            phone: "123-12-12".to_string(),
        }
    }

    #[test]
    fn test_valid_borrower() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_age_bounds() {
        assert!(BorrowerInput { age: 7, ..valid() }.validate().is_err());
        assert!(BorrowerInput { age: 101, ..valid() }.validate().is_err());
        assert!(BorrowerInput { age: 8, ..valid() }.validate().is_ok());
    }

    #[test]
    fn test_field_lengths() {
        assert!(BorrowerInput { first_name: "ab".to_string(), ..valid() }.validate().is_err());
        assert!(BorrowerInput { address: "short".to_string(), ..valid() }.validate().is_err());
        assert!(BorrowerInput { phone: "123456".to_string(), ..valid() }.validate().is_err());
        assert!(BorrowerInput { gender: String::new(), ..valid() }.validate().is_err());
    }
}
