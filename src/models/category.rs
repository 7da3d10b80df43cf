//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::ObjectId;

/// Book category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

/// Copy of a category embedded in a book at write time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySnapshot {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

impl From<&Category> for CategorySnapshot {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
        }
    }
}

/// Create or update category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryInput {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 5, max = 50, message = "name must be 5-50 characters long"))]
    pub name: String,
}
