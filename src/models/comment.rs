//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub entry_id: i64,
    pub author_id: i64,
    pub parent_id: Option<i64>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A comment candidate, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub entry_id: i64,
    pub author_id: i64,
    pub parent_id: Option<i64>,
    pub text: String,
}
