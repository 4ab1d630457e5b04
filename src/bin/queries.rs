//! Illustrative read queries against a seeded database.
//!
//! Small showcase of joins and aggregates over the blog schema: entries
//! written by authors without a profile bio, entry counts per blog, and
//! tag usage.

use anyhow::Result;
use sqlx::Row;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogseed::{config::Config, db};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogseed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(Path::new("config.yml"))?;
    let pool = db::create_pool(&config.database).await?;

    // Entries whose authors have no profile bio.
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT e.headline
        FROM entries e
        JOIN entry_authors ea ON ea.entry_id = e.id
        JOIN authors a ON a.id = ea.author_id
        LEFT JOIN author_profiles p ON p.author_id = a.id
        WHERE p.bio IS NULL
        ORDER BY e.headline
        "#,
    )
    .fetch_all(&pool)
    .await?;
    tracing::info!("Entries by authors without a bio:");
    for row in &rows {
        let headline: String = row.get("headline");
        tracing::info!("  {}", headline);
    }

    // Entry counts per blog.
    let rows = sqlx::query(
        r#"
        SELECT b.name, COUNT(e.id) AS entry_count
        FROM blogs b
        LEFT JOIN entries e ON e.blog_id = b.id
        GROUP BY b.id
        ORDER BY entry_count DESC, b.name
        "#,
    )
    .fetch_all(&pool)
    .await?;
    tracing::info!("Entries per blog:");
    for row in &rows {
        let name: String = row.get("name");
        let count: i64 = row.get("entry_count");
        tracing::info!("  {}: {}", name, count);
    }

    // Tag usage, most used first.
    let rows = sqlx::query(
        r#"
        SELECT t.name, COUNT(et.entry_id) AS usage_count
        FROM tags t
        LEFT JOIN entry_tags et ON et.tag_id = t.id
        GROUP BY t.id
        ORDER BY usage_count DESC, t.name
        "#,
    )
    .fetch_all(&pool)
    .await?;
    tracing::info!("Tag usage:");
    for row in &rows {
        let name: String = row.get("name");
        let count: i64 = row.get("usage_count");
        tracing::info!("  {}: {}", name, count);
    }

    Ok(())
}
