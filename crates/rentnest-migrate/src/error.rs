use std::path::PathBuf;

use thiserror::Error;

use crate::report::MigrationReport;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures that abort a migration before any record is written.
///
/// Per-record write failures are not errors at this level; they are
/// collected in the run's report. When earlier migrations in a batch had
/// already finished, their reports travel in `Partial`.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Cannot connect to database at {}", .path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Cannot load collection {collection}")]
    Load {
        collection: String,
        #[source]
        source: BoxError,
    },

    #[error("Stopped after {} completed migration(s)", .completed.len())]
    Partial {
        completed: Vec<MigrationReport>,
        #[source]
        source: Box<MigrationError>,
    },
}

impl MigrationError {
    /// Reports of migrations that finished before the failure.
    pub fn completed(&self) -> &[MigrationReport] {
        match self {
            MigrationError::Partial { completed, .. } => completed,
            _ => &[],
        }
    }
}
