//! Fixture loader
//!
//! Runs the seeding passes in dependency order: blogs and authors first,
//! then profiles, tags, entries with their associations, and finally
//! comments. Whole-table batches go through `commit_batch` (all-or-nothing);
//! entries and comments are committed one record at a time because their
//! associations need the assigned row id.
//!
//! A record whose foreign-key lookup fails is skipped before validation;
//! the rest of the pass still runs, and the missing reference is surfaced
//! to the caller once the pass finishes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sqlx::SqlitePool;

use crate::db::repositories::{
    AuthorRepository, BlogRepository, EntryRepository, SqlxAuthorRepository, SqlxBlogRepository,
    SqlxEntryRepository, SqlxTagRepository, TagRepository,
};
use crate::models::{parse_pub_date, NewAuthor, NewAuthorProfile, NewBlog, NewComment, NewEntry, NewTag};
use crate::seed::committer::Committer;
use crate::seed::fixtures::FixtureSet;

/// Errors surfaced by the seeding passes
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// A fixture record points at an entity that is not in storage
    #[error("{entity} record references missing {field}: {value:?}")]
    MissingReference {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Storage failure or unparsable field; fatal for the run
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Outcome of one seeding pass
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub entity: &'static str,
    pub attempted: usize,
    pub persisted: usize,
    pub elapsed: Duration,
}

impl SeedReport {
    fn finish(entity: &'static str, attempted: usize, persisted: usize, started: Instant) -> Self {
        let report = Self {
            entity,
            attempted,
            persisted,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            "Seeded {} of {} {} record(s) in {:.4}s",
            report.persisted,
            report.attempted,
            report.entity,
            report.elapsed.as_secs_f64()
        );
        report
    }
}

/// Seeds a database from a [`FixtureSet`]
pub struct Seeder {
    pool: SqlitePool,
    blogs: Arc<dyn BlogRepository>,
    authors: Arc<dyn AuthorRepository>,
    entries: Arc<dyn EntryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl Seeder {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            blogs: SqlxBlogRepository::boxed(pool.clone()),
            authors: SqlxAuthorRepository::boxed(pool.clone()),
            entries: SqlxEntryRepository::boxed(pool.clone()),
            tags: SqlxTagRepository::boxed(pool.clone()),
            pool,
        }
    }

    /// Run every seeding pass in dependency order.
    pub async fn run(&self, fixtures: &FixtureSet) -> Result<Vec<SeedReport>, SeedError> {
        let mut reports = Vec::with_capacity(6);
        reports.push(self.seed_blogs(fixtures).await?);
        reports.push(self.seed_authors(fixtures).await?);
        reports.push(self.seed_profiles(fixtures).await?);
        reports.push(self.seed_tags(fixtures).await?);
        reports.push(self.seed_entries(fixtures).await?);
        reports.push(self.seed_comments(fixtures).await?);
        Ok(reports)
    }

    async fn seed_blogs(&self, fixtures: &FixtureSet) -> Result<SeedReport, SeedError> {
        let started = Instant::now();
        let committer = Committer::new(&self.pool);

        let batch: Vec<NewBlog> = fixtures
            .blogs
            .iter()
            .map(|f| NewBlog {
                name: f.name.clone(),
                slug: f.slug.clone(),
                tagline: f.tagline.clone(),
                description: f.description.clone(),
            })
            .collect();

        let committed = committer.commit_batch(&batch).await?;
        let persisted = if committed { batch.len() } else { 0 };
        Ok(SeedReport::finish("Blog", batch.len(), persisted, started))
    }

    async fn seed_authors(&self, fixtures: &FixtureSet) -> Result<SeedReport, SeedError> {
        let started = Instant::now();
        let committer = Committer::new(&self.pool);

        let batch: Vec<NewAuthor> = fixtures
            .authors
            .iter()
            .map(|f| NewAuthor {
                username: f.username.clone(),
                email: f.email.clone(),
                first_name: f.first_name.clone(),
                last_name: f.last_name.clone(),
                phone_number: f.phone_number.clone(),
                city: f.city.clone(),
                date_birth: f.date_birth,
                is_active: f.is_active,
            })
            .collect();

        let committed = committer.commit_batch(&batch).await?;
        let persisted = if committed { batch.len() } else { 0 };
        Ok(SeedReport::finish("Author", batch.len(), persisted, started))
    }

    /// Bulk pass with reference resolution: every profile names its author
    /// by username. Records with missing authors are skipped before
    /// validation; if any were skipped the batch is never written and the
    /// first missing reference is returned after the validation pass.
    async fn seed_profiles(&self, fixtures: &FixtureSet) -> Result<SeedReport, SeedError> {
        let started = Instant::now();
        let committer = Committer::new(&self.pool);

        let mut missing: Vec<SeedError> = Vec::new();
        let mut batch: Vec<NewAuthorProfile> = Vec::with_capacity(fixtures.profiles.len());

        for fixture in &fixtures.profiles {
            match self.authors.get_by_username(&fixture.username).await? {
                Some(author) => batch.push(NewAuthorProfile {
                    author_id: author.id,
                    bio: fixture.bio.clone(),
                }),
                None => missing.push(SeedError::MissingReference {
                    entity: "AuthorProfile",
                    field: "author",
                    value: fixture.username.clone(),
                }),
            }
        }

        if !missing.is_empty() {
            // Still validate what was constructed so every bad record gets
            // its diagnostic, but write nothing: the batch is incomplete.
            committer.validate_batch(&batch).await?;
            SeedReport::finish("AuthorProfile", fixtures.profiles.len(), 0, started);
            return Err(missing.remove(0));
        }

        let committed = committer.commit_batch(&batch).await?;
        let persisted = if committed { batch.len() } else { 0 };
        Ok(SeedReport::finish(
            "AuthorProfile",
            fixtures.profiles.len(),
            persisted,
            started,
        ))
    }

    async fn seed_tags(&self, fixtures: &FixtureSet) -> Result<SeedReport, SeedError> {
        let started = Instant::now();
        let committer = Committer::new(&self.pool);

        let mut persisted = 0;
        for fixture in &fixtures.tags {
            let tag = NewTag::new(fixture.name.clone(), fixture.slug.clone());
            if committer.commit_single(&tag).await?.is_some() {
                persisted += 1;
            }
        }

        Ok(SeedReport::finish(
            "Tag",
            fixtures.tags.len(),
            persisted,
            started,
        ))
    }

    /// Per-record pass: each entry resolves its blog, authors and tags by
    /// natural key, is committed on its own, and then gets its association
    /// rows. A missing reference skips that entry; the pass continues and
    /// the first missing reference is surfaced at the end.
    async fn seed_entries(&self, fixtures: &FixtureSet) -> Result<SeedReport, SeedError> {
        let started = Instant::now();
        let committer = Committer::new(&self.pool);

        let mut missing: Vec<SeedError> = Vec::new();
        let mut persisted = 0;

        for fixture in &fixtures.entries {
            let blog = match self.blogs.get_by_name(&fixture.blog).await? {
                Some(blog) => blog,
                None => {
                    missing.push(SeedError::MissingReference {
                        entity: "Entry",
                        field: "blog",
                        value: fixture.blog.clone(),
                    });
                    continue;
                }
            };

            let mut author_ids = Vec::with_capacity(fixture.authors.len());
            let mut tag_ids = Vec::with_capacity(fixture.tags.len());
            let mut unresolved = false;

            for username in &fixture.authors {
                match self.authors.get_by_username(username).await? {
                    Some(author) => author_ids.push(author.id),
                    None => {
                        missing.push(SeedError::MissingReference {
                            entity: "Entry",
                            field: "author",
                            value: username.clone(),
                        });
                        unresolved = true;
                    }
                }
            }
            for name in &fixture.tags {
                match self.tags.get_by_name(name).await? {
                    Some(tag) => tag_ids.push(tag.id),
                    None => {
                        missing.push(SeedError::MissingReference {
                            entity: "Entry",
                            field: "tag",
                            value: name.clone(),
                        });
                        unresolved = true;
                    }
                }
            }
            if unresolved {
                continue;
            }

            let pub_date = parse_pub_date(fixture.pub_date.as_deref())?;
            let entry = NewEntry {
                blog_id: blog.id,
                headline: fixture.headline.clone(),
                slug: fixture.slug.clone(),
                summary: fixture.summary.clone(),
                body_text: fixture.body_text.clone(),
                pub_date,
                mod_date: pub_date,
                number_of_comments: fixture.number_of_comments,
                number_of_pingbacks: fixture.number_of_pingbacks,
                rating: fixture.rating.unwrap_or(0.0),
            };

            if let Some(entry_id) = committer.commit_single(&entry).await? {
                // Associations go in after the entry row exists.
                self.entries.set_authors(entry_id, &author_ids).await?;
                self.entries.set_tags(entry_id, &tag_ids).await?;
                persisted += 1;
            }
        }

        let report = SeedReport::finish("Entry", fixtures.entries.len(), persisted, started);
        if missing.is_empty() {
            Ok(report)
        } else {
            Err(missing.remove(0))
        }
    }

    /// Per-record pass. `parent` in the fixture is the index of an earlier
    /// comment in the same file; it resolves through the ids assigned this
    /// run.
    async fn seed_comments(&self, fixtures: &FixtureSet) -> Result<SeedReport, SeedError> {
        let started = Instant::now();
        let committer = Committer::new(&self.pool);

        let mut missing: Vec<SeedError> = Vec::new();
        let mut persisted = 0;
        let mut assigned_ids: HashMap<usize, i64> = HashMap::new();

        for (index, fixture) in fixtures.comments.iter().enumerate() {
            let entry = match self.entries.get_by_headline(&fixture.entry).await? {
                Some(entry) => entry,
                None => {
                    missing.push(SeedError::MissingReference {
                        entity: "Comment",
                        field: "entry",
                        value: fixture.entry.clone(),
                    });
                    continue;
                }
            };
            let author = match self.authors.get_by_username(&fixture.author).await? {
                Some(author) => author,
                None => {
                    missing.push(SeedError::MissingReference {
                        entity: "Comment",
                        field: "author",
                        value: fixture.author.clone(),
                    });
                    continue;
                }
            };
            let parent_id = match fixture.parent {
                Some(parent_index) => match assigned_ids.get(&parent_index) {
                    Some(id) => Some(*id),
                    None => {
                        missing.push(SeedError::MissingReference {
                            entity: "Comment",
                            field: "parent",
                            value: parent_index.to_string(),
                        });
                        continue;
                    }
                },
                None => None,
            };

            let comment = NewComment {
                entry_id: entry.id,
                author_id: author.id,
                parent_id,
                text: fixture.text.clone(),
            };

            if let Some(id) = committer.commit_single(&comment).await? {
                assigned_ids.insert(index, id);
                persisted += 1;
            }
        }

        let report = SeedReport::finish("Comment", fixtures.comments.len(), persisted, started);
        if missing.is_empty() {
            Ok(report)
        } else {
            Err(missing.remove(0))
        }
    }
}
