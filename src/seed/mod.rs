//! Fixture seeding
//!
//! Everything needed to populate a fresh database from JSON fixture files:
//! the batch record committer (validate-then-insert with all-or-nothing
//! batches), the per-entity candidate contracts, fixture file parsing, and
//! the loader that runs the seeding passes in dependency order.

pub mod candidates;
pub mod committer;
pub mod fixtures;
pub mod loader;

pub use committer::{Candidate, Committer, FieldError, ValidationResult};
pub use fixtures::FixtureSet;
pub use loader::{SeedError, SeedReport, Seeder};
