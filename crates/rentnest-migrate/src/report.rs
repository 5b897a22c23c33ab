use std::fmt;

/// A record whose update was attempted and rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub id: String,
    pub error: String,
}

/// Outcome of one migration run.
///
/// `unchanged` records needed nothing; `failures` were attempted and failed.
/// `unresolved` counts records where a backfill found no value to copy; such
/// records may still be updated by their other rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub migration: &'static str,
    pub scanned: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub unresolved: usize,
    pub failures: Vec<RecordFailure>,
}

impl MigrationReport {
    pub fn new(migration: &'static str) -> Self {
        Self {
            migration,
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: updated {} of {} records ({} unchanged, {} unresolved, {} failed)",
            self.migration,
            self.updated,
            self.scanned,
            self.unchanged,
            self.unresolved,
            self.failures.len()
        )
    }
}
