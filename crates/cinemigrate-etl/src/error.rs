//! Error types for the migration stages.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a migration run.
///
/// Data-quality anomalies in the source (unparsable ratings, `N/A`
/// placeholders, dangling writer ids) are not errors; they are resolved
/// during transformation.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Opening or querying the legacy store failed.
    #[error("source store error: {0}")]
    Source(#[from] rusqlite::Error),

    /// A movie's writers column is not a JSON list of writer objects.
    #[error("malformed writers list for movie {movie_id}: {source}")]
    MalformedWriters {
        movie_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Connecting to or writing into the target store failed.
    #[error("target store error during {step}: {source}")]
    Target {
        step: &'static str,
        #[source]
        source: BoxError,
    },
}

impl MigrateError {
    /// Wrap a target driver error, tagging the step that failed.
    pub fn target(step: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Target {
            step,
            source: source.into(),
        }
    }

    /// Returns `true` when the error came from the target store.
    #[must_use]
    pub fn is_target(&self) -> bool {
        matches!(self, Self::Target { .. })
    }
}

/// Convenience alias for migration results.
pub type MigrateResult<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_error_names_step() {
        let err = MigrateError::target("genres", std::io::Error::other("boom"));
        assert!(err.is_target());
        assert_eq!(err.to_string(), "target store error during genres: boom");
    }

    #[test]
    fn test_source_error_is_not_target() {
        let err = MigrateError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_target());
    }
}
