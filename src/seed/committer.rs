//! Batch record committer
//!
//! Candidate entities are validated against their field constraints and the
//! current storage state, then either persisted or discarded. Batches are
//! all-or-nothing: one invalid record rejects the whole batch before any
//! write happens. Validation failure is an expected outcome reported through
//! the return value; only storage failures surface as errors.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// A single violated constraint on a candidate field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating one candidate entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    /// Build a result from collected errors: empty means valid.
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Per-entity contract the committer works against.
///
/// `validate` must be read-only: it may query storage for uniqueness and
/// referential checks but never writes and never mutates the candidate, so
/// calling it twice without interleaved writes yields the same result. The
/// batch gate in [`Committer::commit_batch`] depends on this.
#[async_trait]
pub trait Candidate: Sized + Send + Sync {
    /// Entity type name used in diagnostics
    fn entity_name() -> &'static str;

    /// Ordered (field, formatted value) pairs for diagnostics.
    ///
    /// Scalar columns only; relationship id lists are excluded so that
    /// diagnostics never chase related records.
    fn describe_fields(&self) -> Vec<(&'static str, String)>;

    /// Check field constraints and storage-scoped constraints (uniqueness,
    /// referenced rows). Read-only.
    async fn validate(&self, pool: &SqlitePool) -> Result<ValidationResult>;

    /// Persist this candidate with a single INSERT, returning the assigned id.
    async fn insert_one(&self, pool: &SqlitePool) -> Result<i64>;

    /// Persist a whole batch with one multi-row INSERT, returning the number
    /// of rows written.
    async fn insert_many(pool: &SqlitePool, batch: &[Self]) -> Result<u64>;
}

/// Validates candidates and writes the ones that pass.
pub struct Committer<'a> {
    pool: &'a SqlitePool,
}

impl<'a> Committer<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and persist one candidate.
    ///
    /// Returns the assigned row id when the candidate was valid and stored,
    /// or `None` after logging a diagnostic when validation failed. At most
    /// one write happens.
    pub async fn commit_single<C: Candidate>(&self, candidate: &C) -> Result<Option<i64>> {
        match candidate.validate(self.pool).await? {
            ValidationResult::Valid => {
                let id = candidate.insert_one(self.pool).await?;
                Ok(Some(id))
            }
            ValidationResult::Invalid(errors) => {
                report_invalid(candidate, &errors);
                Ok(None)
            }
        }
    }

    /// Validate every candidate without writing, logging a diagnostic per
    /// failure. Returns how many passed.
    pub async fn validate_batch<C: Candidate>(&self, batch: &[C]) -> Result<usize> {
        let mut passed = 0;
        for candidate in batch {
            match candidate.validate(self.pool).await? {
                ValidationResult::Valid => passed += 1,
                ValidationResult::Invalid(errors) => report_invalid(candidate, &errors),
            }
        }
        Ok(passed)
    }

    /// Validate the whole batch, then persist it with one bulk insert only
    /// if every candidate passed. One invalid record means zero writes and
    /// a `false` return; diagnostics for each failure are already logged by
    /// the validation pass.
    pub async fn commit_batch<C: Candidate>(&self, batch: &[C]) -> Result<bool> {
        let passed = self.validate_batch(batch).await?;
        if passed != batch.len() {
            return Ok(false);
        }
        if !batch.is_empty() {
            C::insert_many(self.pool, batch).await?;
        }
        Ok(true)
    }
}

/// One human-readable line per rejected candidate: entity type, scalar field
/// values, and every violated constraint.
fn report_invalid<C: Candidate>(candidate: &C, errors: &[FieldError]) {
    let fields = candidate
        .describe_fields()
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ");
    let messages = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    tracing::warn!(
        "Rejected {}({}): {}",
        C::entity_name(),
        fields,
        messages
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::NewTag;

    async fn setup_pool() -> SqlitePool {
        let pool = create_test_pool().await.expect("Failed to create pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Migrations failed");
        pool
    }

    async fn count_tags(pool: &SqlitePool) -> i64 {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tags")
            .fetch_one(pool)
            .await
            .expect("Failed to count tags");
        row.0
    }

    #[test]
    fn test_validation_result_from_errors() {
        assert!(ValidationResult::from_errors(vec![]).is_valid());
        let invalid =
            ValidationResult::from_errors(vec![FieldError::new("name", "This field is required")]);
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new("email", "Enter a valid email address");
        assert_eq!(err.to_string(), "email: Enter a valid email address");
    }

    #[tokio::test]
    async fn test_commit_single_valid_persists_one_row() {
        let pool = setup_pool().await;
        let committer = Committer::new(&pool);

        let id = committer
            .commit_single(&NewTag::new("rust", "rust"))
            .await
            .expect("commit should not error");

        assert!(id.is_some());
        assert!(id.unwrap() > 0);
        assert_eq!(count_tags(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_commit_single_invalid_persists_nothing() {
        let pool = setup_pool().await;
        let committer = Committer::new(&pool);

        // Empty name violates the required-field constraint.
        let id = committer
            .commit_single(&NewTag::new("", "empty"))
            .await
            .expect("commit should not error");

        assert!(id.is_none());
        assert_eq!(count_tags(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_commit_batch_all_valid_persists_all() {
        let pool = setup_pool().await;
        let committer = Committer::new(&pool);

        let batch = vec![
            NewTag::new("rust", "rust"),
            NewTag::new("async", "async"),
            NewTag::new("sqlite", "sqlite"),
        ];

        let committed = committer
            .commit_batch(&batch)
            .await
            .expect("commit should not error");

        assert!(committed);
        assert_eq!(count_tags(&pool).await, 3);
    }

    #[tokio::test]
    async fn test_commit_batch_one_invalid_persists_nothing() {
        let pool = setup_pool().await;
        // "duplicate" already exists in storage, so the middle candidate
        // fails its uniqueness check.
        sqlx::query("INSERT INTO tags (name, slug) VALUES ('duplicate', 'duplicate')")
            .execute(&pool)
            .await
            .expect("Failed to insert tag");
        let committer = Committer::new(&pool);

        let batch = vec![
            NewTag::new("rust", "rust"),
            NewTag::new("duplicate", "duplicate"),
            NewTag::new("sqlite", "sqlite"),
        ];

        let committed = committer
            .commit_batch(&batch)
            .await
            .expect("commit should not error");

        assert!(!committed);
        // Only the pre-existing row remains.
        assert_eq!(count_tags(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_commit_batch_empty_is_a_no_op_success() {
        let pool = setup_pool().await;
        let committer = Committer::new(&pool);

        let committed = committer
            .commit_batch::<NewTag>(&[])
            .await
            .expect("commit should not error");

        assert!(committed);
        assert_eq!(count_tags(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_validate_is_repeatable_without_mutation() {
        let pool = setup_pool().await;
        let tag = NewTag::new("stable", "stable");

        let first = tag.validate(&pool).await.expect("validate failed");
        let second = tag.validate(&pool).await.expect("validate failed");

        assert_eq!(first, second);
        // The validation pass itself must not write anything.
        assert_eq!(count_tags(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_validate_batch_counts_passes_and_writes_nothing() {
        let pool = setup_pool().await;
        let committer = Committer::new(&pool);

        let batch = vec![
            NewTag::new("good", "good"),
            NewTag::new("", "bad"),
            NewTag::new("fine", "fine"),
        ];

        let passed = committer
            .validate_batch(&batch)
            .await
            .expect("validate should not error");

        assert_eq!(passed, 2);
        assert_eq!(count_tags(&pool).await, 0);
    }

    // ========================================================================
    // Property-based tests
    // ========================================================================

    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Batch atomicity: for any batch containing at least one invalid
        /// candidate, commit_batch writes zero rows and returns false.
        #[test]
        fn property_batch_with_invalid_member_writes_nothing(
            valid_names in proptest::collection::vec("[a-z]{3,12}", 0..6),
            invalid_position in 0..6usize
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let pool = setup_pool().await;
                let committer = Committer::new(&pool);

                let mut batch: Vec<NewTag> = valid_names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| NewTag::new(format!("{}{}", name, i), format!("{}{}", name, i)))
                    .collect();
                let position = invalid_position.min(batch.len());
                batch.insert(position, NewTag::new("", "invalid"));

                let committed = committer
                    .commit_batch(&batch)
                    .await
                    .expect("commit should not error");

                prop_assert!(!committed);
                prop_assert_eq!(count_tags(&pool).await, 0);
                Ok(())
            });
            result?;
        }

        /// All-valid batches persist exactly len(batch) rows.
        #[test]
        fn property_all_valid_batch_persists_exactly_len(
            names in proptest::collection::vec("[a-z]{3,12}", 1..8)
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let pool = setup_pool().await;
                let committer = Committer::new(&pool);

                // Suffix with the index so generated names never collide.
                let batch: Vec<NewTag> = names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| NewTag::new(format!("{}{}", name, i), format!("{}{}", name, i)))
                    .collect();

                let committed = committer
                    .commit_batch(&batch)
                    .await
                    .expect("commit should not error");

                prop_assert!(committed);
                prop_assert_eq!(count_tags(&pool).await, batch.len() as i64);
                Ok(())
            });
            result?;
        }
    }
}
