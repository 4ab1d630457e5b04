//! Author repository
//!
//! Database lookups for authors. Serves the read-only author API and
//! resolves author references while seeding.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Author;

/// Author repository trait
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Get an author by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Author>>;

    /// Get an author by username
    async fn get_by_username(&self, username: &str) -> Result<Option<Author>>;

    /// List all authors ordered by username
    async fn list(&self) -> Result<Vec<Author>>;
}

/// SQLx-based author repository
pub struct SqlxAuthorRepository {
    pool: SqlitePool,
}

impl SqlxAuthorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn AuthorRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl AuthorRepository for SqlxAuthorRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<Author>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, first_name, last_name, phone_number,
                   city, date_birth, is_active, created_at, updated_at
            FROM authors
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get author by ID")?;

        row.map(|r| row_to_author(&r)).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Author>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, first_name, last_name, phone_number,
                   city, date_birth, is_active, created_at, updated_at
            FROM authors
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get author by username")?;

        row.map(|r| row_to_author(&r)).transpose()
    }

    async fn list(&self) -> Result<Vec<Author>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, first_name, last_name, phone_number,
                   city, date_birth, is_active, created_at, updated_at
            FROM authors
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list authors")?;

        rows.iter().map(row_to_author).collect()
    }
}

fn row_to_author(row: &sqlx::sqlite::SqliteRow) -> Result<Author> {
    Ok(Author {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        phone_number: row.try_get("phone_number")?,
        city: row.try_get("city")?,
        date_birth: row.try_get("date_birth")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
