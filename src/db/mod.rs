//! Database layer
//!
//! SQLite access for blogseed: connection pool creation, embedded
//! migrations, and per-entity repositories.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
