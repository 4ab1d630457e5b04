//! Blog model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted blog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A blog candidate, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlog {
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
}

impl NewBlog {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            tagline: None,
            description: None,
        }
    }
}
