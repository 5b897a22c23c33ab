use tracing::{info, warn};

use rentnest_types::document::Document;

use crate::error::MigrationError;
use crate::report::{MigrationReport, RecordFailure};
use crate::rules::{self, FieldRule, RecordPlan, References};
use crate::store::DocumentStore;

/// A named ruleset over one collection.
#[derive(Debug, Clone)]
pub struct Migration {
    pub name: &'static str,
    pub description: &'static str,
    pub collection: &'static str,
    pub rules: Vec<FieldRule>,
}

impl Migration {
    /// Collections the rules look records up in, each listed once.
    pub fn lookups(&self) -> Vec<&'static str> {
        let mut lookups: Vec<&'static str> = Vec::new();
        for collection in self.rules.iter().filter_map(FieldRule::lookup) {
            if !lookups.contains(&collection) {
                lookups.push(collection);
            }
        }
        lookups
    }

    pub fn plan(&self, doc: &Document, refs: &References) -> RecordPlan {
        rules::plan(&self.rules, doc, refs)
    }
}

/// Runs migrations against a store.
///
/// Everything is read before anything is written: a failed load aborts the
/// run with no writes, while a failed write is recorded and the batch
/// continues. There is no retry; rerunning is safe.
pub struct Migrator<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> Migrator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn run(&self, migration: &Migration) -> Result<MigrationReport, MigrationError> {
        info!("Migration {}: {}", migration.name, migration.description);

        let records = self.load(migration.collection)?;
        let mut refs = References::default();
        for collection in migration.lookups() {
            refs.insert(collection, self.load(collection)?);
        }

        let mut report = MigrationReport::new(migration.name);
        for doc in &records {
            report.scanned += 1;

            let plan = migration.plan(doc, &refs);
            if !plan.unresolved.is_empty() {
                report.unresolved += 1;
            }
            if plan.is_empty() {
                report.unchanged += 1;
                continue;
            }

            match self
                .store
                .update_fields(migration.collection, &doc.id, &plan.updates)
            {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    warn!("Migration {}: update of {} failed: {:#}", migration.name, doc.id, e);
                    report.failures.push(RecordFailure {
                        id: doc.id.clone(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        info!("{}", report);
        Ok(report)
    }

    /// Run `migrations` in order, stopping at the first one that cannot load.
    /// Reports of the migrations that already ran are kept in the error.
    pub fn run_all(&self, migrations: &[Migration]) -> Result<Vec<MigrationReport>, MigrationError> {
        let mut completed = Vec::with_capacity(migrations.len());
        for migration in migrations {
            match self.run(migration) {
                Ok(report) => completed.push(report),
                Err(e) if completed.is_empty() => return Err(e),
                Err(e) => {
                    return Err(MigrationError::Partial {
                        completed,
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(completed)
    }

    fn load(&self, collection: &str) -> Result<Vec<Document>, MigrationError> {
        self.store
            .find_all(collection)
            .map_err(|e| MigrationError::Load {
                collection: collection.to_string(),
                source: e.into(),
            })
    }
}
