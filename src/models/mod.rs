//! Data models
//!
//! Persisted blog entities and their not-yet-persisted candidate inputs.
//! A `New*` struct is a candidate entity: fully populated fields but no
//! storage-assigned id. The corresponding plain struct is the persisted row.

mod author;
mod blog;
mod comment;
mod entry;
mod tag;

pub use author::{Author, AuthorProfile, NewAuthor, NewAuthorProfile};
pub use blog::{Blog, NewBlog};
pub use comment::{Comment, NewComment};
pub use entry::{parse_pub_date, Entry, NewEntry};
pub use tag::{NewTag, Tag};
