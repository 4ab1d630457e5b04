//! Author and author profile models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A persisted author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub date_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// Short display form: username plus abbreviated initials,
    /// e.g. `ipetrov - Petrov I.`
    pub fn display_name(&self) -> String {
        match self.first_name.chars().next() {
            Some(initial) => format!(
                "{} - {} {}.",
                self.username,
                self.last_name,
                initial.to_uppercase()
            ),
            None => format!("{} - {}", self.username, self.last_name),
        }
    }
}

/// An author candidate, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub date_birth: Option<NaiveDate>,
    pub is_active: bool,
}

/// A persisted author profile (one per author)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorProfile {
    pub id: i64,
    pub author_id: i64,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An author profile candidate, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthorProfile {
    pub author_id: i64,
    pub bio: Option<String>,
}
