//! Blogseed - a teaching blog backend with a validated fixture seeder
//!
//! This library provides the persisted blog entities, the SQLite database
//! layer, the read-only author API, and the fixture seeding machinery.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod seed;
