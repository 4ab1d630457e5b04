//! Repositories
//!
//! Per-entity data access. Each repository is a trait with a SQLx-backed
//! implementation; the API and the fixture loader only see the traits.

mod author;
mod blog;
mod entry;
mod tag;

pub use author::{AuthorRepository, SqlxAuthorRepository};
pub use blog::{BlogRepository, SqlxBlogRepository};
pub use entry::{EntryRepository, SqlxEntryRepository};
pub use tag::{SqlxTagRepository, TagRepository};
