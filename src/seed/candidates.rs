//! Candidate contracts for the persisted entities
//!
//! One [`Candidate`] implementation per entity: field-format checks,
//! uniqueness and referential checks against current storage state, and the
//! single/bulk insert statements. Validation queries are read-only.

use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::{QueryBuilder, SqlitePool};

use crate::models::{NewAuthor, NewAuthorProfile, NewBlog, NewComment, NewEntry, NewTag};
use crate::seed::committer::{Candidate, FieldError, ValidationResult};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid username regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\d{7,15}$").expect("valid phone regex"));

fn require(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "This field is required"));
    }
}

/// Quote a text column for diagnostics, shortened so the line stays readable.
fn abbreviate(text: &str) -> String {
    const LIMIT: usize = 60;
    if text.chars().count() <= LIMIT {
        format!("{:?}", text)
    } else {
        let head: String = text.chars().take(LIMIT).collect();
        format!("{:?}", format!("{}...", head))
    }
}

fn check_slug(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if !SLUG_RE.is_match(value) {
        errors.push(FieldError::new(
            field,
            "Enter a valid slug of lowercase letters, numbers and hyphens",
        ));
    }
}

/// Count rows matching a single bound value. Used for uniqueness and
/// referential checks.
async fn count_where(pool: &SqlitePool, sql: &str, value: &str) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(sql)
        .bind(value)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Constraint query failed: {}", sql))?;
    Ok(row.0)
}

async fn count_where_id(pool: &SqlitePool, sql: &str, id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Constraint query failed: {}", sql))?;
    Ok(row.0)
}

// ============================================================================
// Blog
// ============================================================================

#[async_trait]
impl Candidate for NewBlog {
    fn entity_name() -> &'static str {
        "Blog"
    }

    fn describe_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", format!("{:?}", self.name)),
            ("slug", format!("{:?}", self.slug)),
            ("tagline", format!("{:?}", self.tagline)),
            ("description", format!("{:?}", self.description)),
        ]
    }

    async fn validate(&self, pool: &SqlitePool) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        check_slug(&mut errors, "slug", &self.slug);

        if !self.name.trim().is_empty()
            && count_where(pool, "SELECT COUNT(*) FROM blogs WHERE name = ?", &self.name).await? > 0
        {
            errors.push(FieldError::new("name", "Blog with this name already exists"));
        }

        Ok(ValidationResult::from_errors(errors))
    }

    async fn insert_one(&self, pool: &SqlitePool) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO blogs (name, slug, tagline, description) VALUES (?, ?, ?, ?)",
        )
        .bind(&self.name)
        .bind(&self.slug)
        .bind(&self.tagline)
        .bind(&self.description)
        .execute(pool)
        .await
        .context("Failed to insert blog")?;
        Ok(result.last_insert_rowid())
    }

    async fn insert_many(pool: &SqlitePool, batch: &[Self]) -> Result<u64> {
        let mut builder =
            QueryBuilder::new("INSERT INTO blogs (name, slug, tagline, description) ");
        builder.push_values(batch, |mut row, blog| {
            row.push_bind(&blog.name)
                .push_bind(&blog.slug)
                .push_bind(&blog.tagline)
                .push_bind(&blog.description);
        });
        let result = builder
            .build()
            .execute(pool)
            .await
            .context("Failed to bulk insert blogs")?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Author
// ============================================================================

#[async_trait]
impl Candidate for NewAuthor {
    fn entity_name() -> &'static str {
        "Author"
    }

    fn describe_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", format!("{:?}", self.username)),
            ("email", format!("{:?}", self.email)),
            ("first_name", format!("{:?}", self.first_name)),
            ("last_name", format!("{:?}", self.last_name)),
            ("phone_number", format!("{:?}", self.phone_number)),
            ("city", format!("{:?}", self.city)),
            ("date_birth", format!("{:?}", self.date_birth)),
            ("is_active", format!("{:?}", self.is_active)),
        ]
    }

    async fn validate(&self, pool: &SqlitePool) -> Result<ValidationResult> {
        let mut errors = Vec::new();

        require(&mut errors, "username", &self.username);
        if !self.username.trim().is_empty() && !USERNAME_RE.is_match(&self.username) {
            errors.push(FieldError::new(
                "username",
                "Enter a valid username of lowercase letters, numbers and underscores",
            ));
        }

        require(&mut errors, "email", &self.email);
        if !self.email.trim().is_empty() && !EMAIL_RE.is_match(&self.email) {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }

        require(&mut errors, "first_name", &self.first_name);
        require(&mut errors, "last_name", &self.last_name);

        if let Some(phone) = &self.phone_number {
            if !PHONE_RE.is_match(phone) {
                errors.push(FieldError::new(
                    "phone_number",
                    "Enter a phone number as + followed by 7 to 15 digits",
                ));
            }
        }

        if count_where(
            pool,
            "SELECT COUNT(*) FROM authors WHERE username = ?",
            &self.username,
        )
        .await?
            > 0
        {
            errors.push(FieldError::new(
                "username",
                "Author with this username already exists",
            ));
        }
        if count_where(pool, "SELECT COUNT(*) FROM authors WHERE email = ?", &self.email).await? > 0
        {
            errors.push(FieldError::new(
                "email",
                "Author with this email already exists",
            ));
        }

        Ok(ValidationResult::from_errors(errors))
    }

    async fn insert_one(&self, pool: &SqlitePool) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO authors (username, email, first_name, last_name,
                                 phone_number, city, date_birth, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.username)
        .bind(&self.email)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.phone_number)
        .bind(&self.city)
        .bind(self.date_birth)
        .bind(self.is_active)
        .execute(pool)
        .await
        .context("Failed to insert author")?;
        Ok(result.last_insert_rowid())
    }

    async fn insert_many(pool: &SqlitePool, batch: &[Self]) -> Result<u64> {
        let mut builder = QueryBuilder::new(
            "INSERT INTO authors (username, email, first_name, last_name, \
             phone_number, city, date_birth, is_active) ",
        );
        builder.push_values(batch, |mut row, author| {
            row.push_bind(&author.username)
                .push_bind(&author.email)
                .push_bind(&author.first_name)
                .push_bind(&author.last_name)
                .push_bind(&author.phone_number)
                .push_bind(&author.city)
                .push_bind(author.date_birth)
                .push_bind(author.is_active);
        });
        let result = builder
            .build()
            .execute(pool)
            .await
            .context("Failed to bulk insert authors")?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// AuthorProfile
// ============================================================================

#[async_trait]
impl Candidate for NewAuthorProfile {
    fn entity_name() -> &'static str {
        "AuthorProfile"
    }

    fn describe_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("author_id", format!("{}", self.author_id)),
            (
                "bio",
                self.bio
                    .as_deref()
                    .map_or_else(|| "None".to_string(), abbreviate),
            ),
        ]
    }

    async fn validate(&self, pool: &SqlitePool) -> Result<ValidationResult> {
        let mut errors = Vec::new();

        if count_where_id(
            pool,
            "SELECT COUNT(*) FROM authors WHERE id = ?",
            self.author_id,
        )
        .await?
            == 0
        {
            errors.push(FieldError::new(
                "author_id",
                "Referenced author does not exist",
            ));
        } else if count_where_id(
            pool,
            "SELECT COUNT(*) FROM author_profiles WHERE author_id = ?",
            self.author_id,
        )
        .await?
            > 0
        {
            errors.push(FieldError::new(
                "author_id",
                "Author profile with this author already exists",
            ));
        }

        Ok(ValidationResult::from_errors(errors))
    }

    async fn insert_one(&self, pool: &SqlitePool) -> Result<i64> {
        let result = sqlx::query("INSERT INTO author_profiles (author_id, bio) VALUES (?, ?)")
            .bind(self.author_id)
            .bind(&self.bio)
            .execute(pool)
            .await
            .context("Failed to insert author profile")?;
        Ok(result.last_insert_rowid())
    }

    async fn insert_many(pool: &SqlitePool, batch: &[Self]) -> Result<u64> {
        let mut builder = QueryBuilder::new("INSERT INTO author_profiles (author_id, bio) ");
        builder.push_values(batch, |mut row, profile| {
            row.push_bind(profile.author_id).push_bind(&profile.bio);
        });
        let result = builder
            .build()
            .execute(pool)
            .await
            .context("Failed to bulk insert author profiles")?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Tag
// ============================================================================

#[async_trait]
impl Candidate for NewTag {
    fn entity_name() -> &'static str {
        "Tag"
    }

    fn describe_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", format!("{:?}", self.name)),
            ("slug", format!("{:?}", self.slug)),
        ]
    }

    async fn validate(&self, pool: &SqlitePool) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        check_slug(&mut errors, "slug", &self.slug);

        if !self.name.trim().is_empty()
            && count_where(pool, "SELECT COUNT(*) FROM tags WHERE name = ?", &self.name).await? > 0
        {
            errors.push(FieldError::new("name", "Tag with this name already exists"));
        }

        Ok(ValidationResult::from_errors(errors))
    }

    async fn insert_one(&self, pool: &SqlitePool) -> Result<i64> {
        let result = sqlx::query("INSERT INTO tags (name, slug) VALUES (?, ?)")
            .bind(&self.name)
            .bind(&self.slug)
            .execute(pool)
            .await
            .context("Failed to insert tag")?;
        Ok(result.last_insert_rowid())
    }

    async fn insert_many(pool: &SqlitePool, batch: &[Self]) -> Result<u64> {
        let mut builder = QueryBuilder::new("INSERT INTO tags (name, slug) ");
        builder.push_values(batch, |mut row, tag| {
            row.push_bind(&tag.name).push_bind(&tag.slug);
        });
        let result = builder
            .build()
            .execute(pool)
            .await
            .context("Failed to bulk insert tags")?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Entry
// ============================================================================

#[async_trait]
impl Candidate for NewEntry {
    fn entity_name() -> &'static str {
        "Entry"
    }

    fn describe_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("blog_id", format!("{}", self.blog_id)),
            ("headline", format!("{:?}", self.headline)),
            ("slug", format!("{:?}", self.slug)),
            ("summary", format!("{:?}", self.summary)),
            ("body_text", abbreviate(&self.body_text)),
            ("pub_date", self.pub_date.to_rfc3339()),
            ("mod_date", self.mod_date.to_rfc3339()),
            ("number_of_comments", format!("{}", self.number_of_comments)),
            ("number_of_pingbacks", format!("{}", self.number_of_pingbacks)),
            ("rating", format!("{}", self.rating)),
        ]
    }

    async fn validate(&self, pool: &SqlitePool) -> Result<ValidationResult> {
        let mut errors = Vec::new();

        require(&mut errors, "headline", &self.headline);
        require(&mut errors, "body_text", &self.body_text);
        check_slug(&mut errors, "slug", &self.slug);

        if self.number_of_comments < 0 {
            errors.push(FieldError::new(
                "number_of_comments",
                "Must not be negative",
            ));
        }
        if self.number_of_pingbacks < 0 {
            errors.push(FieldError::new(
                "number_of_pingbacks",
                "Must not be negative",
            ));
        }
        if !(0.0..=10.0).contains(&self.rating) {
            errors.push(FieldError::new("rating", "Must be between 0 and 10"));
        }

        if count_where_id(pool, "SELECT COUNT(*) FROM blogs WHERE id = ?", self.blog_id).await? == 0
        {
            errors.push(FieldError::new("blog_id", "Referenced blog does not exist"));
        }
        if count_where(pool, "SELECT COUNT(*) FROM entries WHERE slug = ?", &self.slug).await? > 0 {
            errors.push(FieldError::new("slug", "Entry with this slug already exists"));
        }

        Ok(ValidationResult::from_errors(errors))
    }

    async fn insert_one(&self, pool: &SqlitePool) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO entries (blog_id, headline, slug, summary, body_text, pub_date,
                                 mod_date, number_of_comments, number_of_pingbacks, rating)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(self.blog_id)
        .bind(&self.headline)
        .bind(&self.slug)
        .bind(&self.summary)
        .bind(&self.body_text)
        .bind(self.pub_date)
        .bind(self.mod_date)
        .bind(self.number_of_comments)
        .bind(self.number_of_pingbacks)
        .bind(self.rating)
        .execute(pool)
        .await
        .context("Failed to insert entry")?;
        Ok(result.last_insert_rowid())
    }

    async fn insert_many(pool: &SqlitePool, batch: &[Self]) -> Result<u64> {
        let mut builder = QueryBuilder::new(
            "INSERT INTO entries (blog_id, headline, slug, summary, body_text, pub_date, \
             mod_date, number_of_comments, number_of_pingbacks, rating) ",
        );
        builder.push_values(batch, |mut row, entry| {
            row.push_bind(entry.blog_id)
                .push_bind(&entry.headline)
                .push_bind(&entry.slug)
                .push_bind(&entry.summary)
                .push_bind(&entry.body_text)
                .push_bind(entry.pub_date)
                .push_bind(entry.mod_date)
                .push_bind(entry.number_of_comments)
                .push_bind(entry.number_of_pingbacks)
                .push_bind(entry.rating);
        });
        let result = builder
            .build()
            .execute(pool)
            .await
            .context("Failed to bulk insert entries")?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Comment
// ============================================================================

#[async_trait]
impl Candidate for NewComment {
    fn entity_name() -> &'static str {
        "Comment"
    }

    fn describe_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("entry_id", format!("{}", self.entry_id)),
            ("author_id", format!("{}", self.author_id)),
            ("parent_id", format!("{:?}", self.parent_id)),
            ("text", abbreviate(&self.text)),
        ]
    }

    async fn validate(&self, pool: &SqlitePool) -> Result<ValidationResult> {
        let mut errors = Vec::new();

        require(&mut errors, "text", &self.text);

        if count_where_id(pool, "SELECT COUNT(*) FROM entries WHERE id = ?", self.entry_id).await?
            == 0
        {
            errors.push(FieldError::new("entry_id", "Referenced entry does not exist"));
        }
        if count_where_id(pool, "SELECT COUNT(*) FROM authors WHERE id = ?", self.author_id).await?
            == 0
        {
            errors.push(FieldError::new(
                "author_id",
                "Referenced author does not exist",
            ));
        }
        if let Some(parent_id) = self.parent_id {
            if count_where_id(pool, "SELECT COUNT(*) FROM comments WHERE id = ?", parent_id)
                .await?
                == 0
            {
                errors.push(FieldError::new(
                    "parent_id",
                    "Referenced parent comment does not exist",
                ));
            }
        }

        Ok(ValidationResult::from_errors(errors))
    }

    async fn insert_one(&self, pool: &SqlitePool) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO comments (entry_id, author_id, parent_id, text) VALUES (?, ?, ?, ?)",
        )
        .bind(self.entry_id)
        .bind(self.author_id)
        .bind(self.parent_id)
        .bind(&self.text)
        .execute(pool)
        .await
        .context("Failed to insert comment")?;
        Ok(result.last_insert_rowid())
    }

    async fn insert_many(pool: &SqlitePool, batch: &[Self]) -> Result<u64> {
        let mut builder =
            QueryBuilder::new("INSERT INTO comments (entry_id, author_id, parent_id, text) ");
        builder.push_values(batch, |mut row, comment| {
            row.push_bind(comment.entry_id)
                .push_bind(comment.author_id)
                .push_bind(comment.parent_id)
                .push_bind(&comment.text);
        });
        let result = builder
            .build()
            .execute(pool)
            .await
            .context("Failed to bulk insert comments")?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use chrono::{NaiveDate, Utc};

    async fn setup_pool() -> SqlitePool {
        let pool = create_test_pool().await.expect("Failed to create pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Migrations failed");
        pool
    }

    fn sample_author(username: &str) -> NewAuthor {
        NewAuthor {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            phone_number: Some("+79123456789".to_string()),
            city: Some("Moscow".to_string()),
            date_birth: NaiveDate::from_ymd_opt(1990, 4, 12),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_author_valid() {
        let pool = setup_pool().await;
        let result = sample_author("ipetrov")
            .validate(&pool)
            .await
            .expect("validate failed");
        assert!(result.is_valid());
    }

    #[tokio::test]
    async fn test_author_bad_email() {
        let pool = setup_pool().await;
        let mut author = sample_author("ipetrov");
        author.email = "not-an-email".to_string();

        let result = author.validate(&pool).await.expect("validate failed");
        match result {
            ValidationResult::Invalid(errors) => {
                assert!(errors.iter().any(|e| e.field == "email"));
            }
            ValidationResult::Valid => panic!("email should be rejected"),
        }
    }

    #[tokio::test]
    async fn test_author_bad_phone() {
        let pool = setup_pool().await;
        let mut author = sample_author("ipetrov");
        author.phone_number = Some("12345".to_string());

        let result = author.validate(&pool).await.expect("validate failed");
        assert!(!result.is_valid());
    }

    #[tokio::test]
    async fn test_author_duplicate_username() {
        let pool = setup_pool().await;
        sample_author("taken")
            .insert_one(&pool)
            .await
            .expect("insert failed");

        let mut duplicate = sample_author("taken");
        duplicate.email = "different@example.com".to_string();

        let result = duplicate.validate(&pool).await.expect("validate failed");
        match result {
            ValidationResult::Invalid(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.field == "username" && e.message.contains("already exists")));
            }
            ValidationResult::Valid => panic!("duplicate username should be rejected"),
        }
    }

    #[tokio::test]
    async fn test_profile_requires_existing_author() {
        let pool = setup_pool().await;
        let profile = NewAuthorProfile {
            author_id: 42,
            bio: Some("bio".to_string()),
        };

        let result = profile.validate(&pool).await.expect("validate failed");
        assert!(!result.is_valid());
    }

    #[tokio::test]
    async fn test_profile_one_per_author() {
        let pool = setup_pool().await;
        let author_id = sample_author("solo")
            .insert_one(&pool)
            .await
            .expect("insert failed");

        let profile = NewAuthorProfile {
            author_id,
            bio: None,
        };
        assert!(profile.validate(&pool).await.expect("validate failed").is_valid());
        profile.insert_one(&pool).await.expect("insert failed");

        // A second profile for the same author fails the uniqueness check.
        let second = NewAuthorProfile {
            author_id,
            bio: Some("another".to_string()),
        };
        assert!(!second.validate(&pool).await.expect("validate failed").is_valid());
    }

    #[tokio::test]
    async fn test_entry_rating_out_of_range() {
        let pool = setup_pool().await;
        let blog_id = NewBlog::new("A Blog", "a-blog")
            .insert_one(&pool)
            .await
            .expect("insert failed");

        let entry = NewEntry {
            blog_id,
            headline: "Hello".to_string(),
            slug: "hello".to_string(),
            summary: None,
            body_text: "body".to_string(),
            pub_date: Utc::now(),
            mod_date: Utc::now(),
            number_of_comments: 0,
            number_of_pingbacks: 0,
            rating: 11.0,
        };

        let result = entry.validate(&pool).await.expect("validate failed");
        match result {
            ValidationResult::Invalid(errors) => {
                assert!(errors.iter().any(|e| e.field == "rating"));
            }
            ValidationResult::Valid => panic!("rating should be rejected"),
        }
    }

    #[tokio::test]
    async fn test_entry_missing_blog_is_invalid() {
        let pool = setup_pool().await;
        let entry = NewEntry {
            blog_id: 999,
            headline: "Orphan".to_string(),
            slug: "orphan".to_string(),
            summary: None,
            body_text: "body".to_string(),
            pub_date: Utc::now(),
            mod_date: Utc::now(),
            number_of_comments: 0,
            number_of_pingbacks: 0,
            rating: 0.0,
        };

        let result = entry.validate(&pool).await.expect("validate failed");
        assert!(!result.is_valid());
    }

    #[tokio::test]
    async fn test_comment_empty_text() {
        let pool = setup_pool().await;
        let comment = NewComment {
            entry_id: 1,
            author_id: 1,
            parent_id: None,
            text: "  ".to_string(),
        };

        let result = comment.validate(&pool).await.expect("validate failed");
        match result {
            ValidationResult::Invalid(errors) => {
                assert!(errors.iter().any(|e| e.field == "text"));
            }
            ValidationResult::Valid => panic!("blank text should be rejected"),
        }
    }

    #[tokio::test]
    async fn test_describe_fields_excludes_nothing_scalar() {
        let author = sample_author("ipetrov");
        let fields = author.describe_fields();
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "username",
                "email",
                "first_name",
                "last_name",
                "phone_number",
                "city",
                "date_birth",
                "is_active"
            ]
        );
        assert_eq!(fields[0].1, "\"ipetrov\"");
    }

    #[tokio::test]
    async fn test_entry_diagnostics_cover_all_scalar_columns() {
        let entry = NewEntry {
            blog_id: 1,
            headline: "Hello".to_string(),
            slug: "hello".to_string(),
            summary: None,
            body_text: "word ".repeat(50),
            pub_date: Utc::now(),
            mod_date: Utc::now(),
            number_of_comments: 0,
            number_of_pingbacks: 0,
            rating: 0.0,
        };

        let fields = entry.describe_fields();
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "blog_id",
                "headline",
                "slug",
                "summary",
                "body_text",
                "pub_date",
                "mod_date",
                "number_of_comments",
                "number_of_pingbacks",
                "rating"
            ]
        );
        // Long text columns are shortened so the log line stays readable.
        let body = &fields[4].1;
        assert!(body.len() < entry.body_text.len());
        assert!(body.ends_with("...\""));
    }

    #[tokio::test]
    async fn test_bulk_insert_authors() {
        let pool = setup_pool().await;
        let batch = vec![sample_author("first"), sample_author("second")];

        let written = NewAuthor::insert_many(&pool, &batch)
            .await
            .expect("bulk insert failed");
        assert_eq!(written, 2);

        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authors")
            .fetch_one(&pool)
            .await
            .expect("count failed");
        assert_eq!(row.0, 2);
    }
}
