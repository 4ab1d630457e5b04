//! Entry model

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A persisted blog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub blog_id: i64,
    pub headline: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body_text: String,
    pub pub_date: DateTime<Utc>,
    pub mod_date: DateTime<Utc>,
    pub number_of_comments: i64,
    pub number_of_pingbacks: i64,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// An entry candidate, not yet persisted.
///
/// Carries only the scalar columns; author and tag associations are join
/// rows written separately after the entry itself is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub blog_id: i64,
    pub headline: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body_text: String,
    pub pub_date: DateTime<Utc>,
    pub mod_date: DateTime<Utc>,
    pub number_of_comments: i64,
    pub number_of_pingbacks: i64,
    pub rating: f64,
}

/// Parse and normalize a fixture publication date.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` (midnight); a
/// missing value falls back to the current time. Results are always UTC.
pub fn parse_pub_date(raw: Option<&str>) -> Result<DateTime<Utc>> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s.trim(),
        _ => return Ok(Utc::now()),
    };

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        return Ok(Utc.from_utc_datetime(&dt));
    }

    bail!("Unrecognized publication date: {:?}", raw)
}
