//! Seed the database from JSON fixture files.
//!
//! Runs migrations first, then every seeding pass in dependency order.
//! Validation failures are reported per record and reject their batch;
//! missing references and storage errors halt the run with a non-zero exit.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogseed::{
    config::Config,
    db,
    seed::{FixtureSet, Seeder},
};

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
    db::migrations::run_migrations(&pool).await?;

    let fixtures = FixtureSet::load(&config.fixtures.dir)?;
    tracing::info!(
        "Loaded fixtures from {}: {} blogs, {} authors, {} profiles, {} tags, {} entries, {} comments",
        config.fixtures.dir.display(),
        fixtures.blogs.len(),
        fixtures.authors.len(),
        fixtures.profiles.len(),
        fixtures.tags.len(),
        fixtures.entries.len(),
        fixtures.comments.len()
    );

    let seeder = Seeder::new(pool);
    let reports = seeder.run(&fixtures).await?;

    let persisted: usize = reports.iter().map(|r| r.persisted).sum();
    let attempted: usize = reports.iter().map(|r| r.attempted).sum();
    tracing::info!("Seeding finished: {} of {} record(s) persisted", persisted, attempted);

    Ok(())
}
