//! Data models for Libris

pub mod book;
pub mod borrow;
pub mod borrower;
pub mod category;
pub mod object_id;
pub mod user;

use serde::{Deserialize, Deserializer};

// Re-export commonly used types
pub use book::{Book, BookFields, BookSnapshot};
pub use borrow::{Borrow, BorrowerSnapshot};
pub use borrower::{Borrower, BorrowerInput};
pub use category::{Category, CategorySnapshot};
pub use object_id::ObjectId;
pub use user::{User, UserClaims};

/// Deserialize a string with surrounding whitespace removed
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}
