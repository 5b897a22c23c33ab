//! In-place document migrations for RentNest.
//!
//! Each migration is a declarative list of field rules. The migrator loads a
//! collection (plus any collections the rules look up) once, computes every
//! record's update in memory, then writes one field-scoped update per record
//! that needs it. Rules only ever fill absent fields or rewrite legacy values
//! to their current form, so a second run finds nothing to do.

pub mod config;
pub mod error;
pub mod migrator;
pub mod report;
pub mod rules;
pub mod rulesets;
pub mod store;

use rentnest_db::Database;

pub use config::Config;
pub use error::MigrationError;
pub use migrator::{Migration, Migrator};
pub use report::{MigrationReport, RecordFailure};
pub use store::DocumentStore;

/// Open the configured database and run every built-in migration.
pub fn run(config: &Config) -> Result<Vec<MigrationReport>, MigrationError> {
    let db = Database::open_existing(&config.db_path).map_err(|e| MigrationError::Connect {
        path: config.db_path.clone(),
        source: e.into(),
    })?;

    Migrator::new(&db).run_all(&rulesets::all())
}
