//! Blog repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Blog;

/// Blog repository trait
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Get a blog by its unique name
    async fn get_by_name(&self, name: &str) -> Result<Option<Blog>>;

    /// List all blogs ordered by name
    async fn list(&self) -> Result<Vec<Blog>>;
}

/// SQLx-based blog repository
pub struct SqlxBlogRepository {
    pool: SqlitePool,
}

impl SqlxBlogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn BlogRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BlogRepository for SqlxBlogRepository {
    async fn get_by_name(&self, name: &str) -> Result<Option<Blog>> {
        let row = sqlx::query(
            "SELECT id, name, slug, tagline, description, created_at FROM blogs WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get blog by name")?;

        row.map(|r| row_to_blog(&r)).transpose()
    }

    async fn list(&self) -> Result<Vec<Blog>> {
        let rows = sqlx::query(
            "SELECT id, name, slug, tagline, description, created_at FROM blogs ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list blogs")?;

        rows.iter().map(row_to_blog).collect()
    }
}

fn row_to_blog(row: &sqlx::sqlite::SqliteRow) -> Result<Blog> {
    Ok(Blog {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        tagline: row.try_get("tagline")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}
