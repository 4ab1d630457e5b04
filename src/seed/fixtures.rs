//! Fixture file parsing
//!
//! Raw fixture records as they appear in the JSON files under the fixture
//! directory. Parsing is owned here; reference resolution and validation
//! belong to the loader and the candidate contracts.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// A blog record from blogs.json
#[derive(Debug, Clone, Deserialize)]
pub struct BlogFixture {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// An author record from authors.json
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorFixture {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub date_birth: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// An author profile record from author_profiles.json, keyed by username
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileFixture {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// A tag record from tags.json
#[derive(Debug, Clone, Deserialize)]
pub struct TagFixture {
    pub name: String,
    pub slug: String,
}

/// An entry record from entries.json.
///
/// References are by natural key: blog by name, authors by username, tags
/// by name. `pub_date` stays a raw string here; normalization happens when
/// the candidate is built.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryFixture {
    pub blog: String,
    pub headline: String,
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub body_text: String,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub number_of_comments: i64,
    #[serde(default)]
    pub number_of_pingbacks: i64,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// A comment record from comments.json.
///
/// `parent` is the zero-based index of an earlier comment in the same file.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentFixture {
    pub entry: String,
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub parent: Option<usize>,
}

/// All fixture files loaded from one directory
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub blogs: Vec<BlogFixture>,
    pub authors: Vec<AuthorFixture>,
    pub profiles: Vec<ProfileFixture>,
    pub tags: Vec<TagFixture>,
    pub entries: Vec<EntryFixture>,
    pub comments: Vec<CommentFixture>,
}

impl FixtureSet {
    /// Load every fixture file from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            blogs: load_file(dir, "blogs.json")?,
            authors: load_file(dir, "authors.json")?,
            profiles: load_file(dir, "author_profiles.json")?,
            tags: load_file(dir, "tags.json")?,
            entries: load_file(dir, "entries.json")?,
            comments: load_file(dir, "comments.json")?,
        })
    }
}

fn load_file<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse fixture file: {}", path.display()))
}
