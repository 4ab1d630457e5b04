//! Tag model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// A tag candidate, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}
