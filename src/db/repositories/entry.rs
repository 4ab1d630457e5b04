//! Entry repository
//!
//! Entry lookups plus the many-to-many join rows that attach authors and
//! tags to an entry after it has been stored.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Entry;

/// Entry repository trait
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Get an entry by headline
    async fn get_by_headline(&self, headline: &str) -> Result<Option<Entry>>;

    /// Attach authors to an entry (idempotent)
    async fn set_authors(&self, entry_id: i64, author_ids: &[i64]) -> Result<()>;

    /// Attach tags to an entry (idempotent)
    async fn set_tags(&self, entry_id: i64, tag_ids: &[i64]) -> Result<()>;
}

/// SQLx-based entry repository
pub struct SqlxEntryRepository {
    pool: SqlitePool,
}

impl SqlxEntryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn EntryRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl EntryRepository for SqlxEntryRepository {
    async fn get_by_headline(&self, headline: &str) -> Result<Option<Entry>> {
        let row = sqlx::query(
            r#"
            SELECT id, blog_id, headline, slug, summary, body_text, pub_date,
                   mod_date, number_of_comments, number_of_pingbacks, rating, created_at
            FROM entries
            WHERE headline = ?
            "#,
        )
        .bind(headline)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get entry by headline")?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    async fn set_authors(&self, entry_id: i64, author_ids: &[i64]) -> Result<()> {
        for author_id in author_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO entry_authors (entry_id, author_id) VALUES (?, ?)",
            )
            .bind(entry_id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .context("Failed to attach author to entry")?;
        }
        Ok(())
    }

    async fn set_tags(&self, entry_id: i64, tag_ids: &[i64]) -> Result<()> {
        for tag_id in tag_ids {
            sqlx::query("INSERT OR IGNORE INTO entry_tags (entry_id, tag_id) VALUES (?, ?)")
                .bind(entry_id)
                .bind(tag_id)
                .execute(&self.pool)
                .await
                .context("Failed to attach tag to entry")?;
        }
        Ok(())
    }
}

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<Entry> {
    Ok(Entry {
        id: row.try_get("id")?,
        blog_id: row.try_get("blog_id")?,
        headline: row.try_get("headline")?,
        slug: row.try_get("slug")?,
        summary: row.try_get("summary")?,
        body_text: row.try_get("body_text")?,
        pub_date: row.try_get("pub_date")?,
        mod_date: row.try_get("mod_date")?,
        number_of_comments: row.try_get("number_of_comments")?,
        number_of_pingbacks: row.try_get("number_of_pingbacks")?,
        rating: row.try_get("rating")?,
        created_at: row.try_get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> (SqlitePool, SqlxEntryRepository) {
        let pool = create_test_pool().await.expect("Failed to create pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Migrations failed");
        (pool.clone(), SqlxEntryRepository::new(pool))
    }

    async fn insert_entry(pool: &SqlitePool, headline: &str, slug: &str) -> i64 {
        sqlx::query("INSERT INTO blogs (name, slug) VALUES (?, ?)")
            .bind(format!("blog-for-{}", slug))
            .bind(slug)
            .execute(pool)
            .await
            .expect("Failed to insert blog");
        let blog_id = sqlx::query("SELECT id FROM blogs WHERE slug = ?")
            .bind(slug)
            .fetch_one(pool)
            .await
            .expect("Failed to fetch blog")
            .get::<i64, _>("id");

        sqlx::query(
            r#"
            INSERT INTO entries (blog_id, headline, slug, body_text, pub_date, mod_date)
            VALUES (?, ?, ?, 'body', CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(blog_id)
        .bind(headline)
        .bind(slug)
        .execute(pool)
        .await
        .expect("Failed to insert entry")
        .last_insert_rowid()
    }

    #[tokio::test]
    async fn test_get_by_headline() {
        let (pool, repo) = setup().await;
        insert_entry(&pool, "First Post", "first-post").await;

        let entry = repo
            .get_by_headline("First Post")
            .await
            .expect("query failed")
            .expect("entry should exist");
        assert_eq!(entry.slug, "first-post");

        let missing = repo.get_by_headline("Nope").await.expect("query failed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_set_tags_is_idempotent() {
        let (pool, repo) = setup().await;
        let entry_id = insert_entry(&pool, "Tagged", "tagged").await;
        sqlx::query("INSERT INTO tags (name, slug) VALUES ('rust', 'rust')")
            .execute(&pool)
            .await
            .expect("Failed to insert tag");

        repo.set_tags(entry_id, &[1]).await.expect("set_tags failed");
        repo.set_tags(entry_id, &[1]).await.expect("set_tags failed");

        let row = sqlx::query("SELECT COUNT(*) as count FROM entry_tags WHERE entry_id = ?")
            .bind(entry_id)
            .fetch_one(&pool)
            .await
            .expect("Failed to count join rows");
        let count: i64 = row.get("count");
        assert_eq!(count, 1);
    }
}
