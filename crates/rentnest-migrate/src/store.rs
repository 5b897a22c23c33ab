use anyhow::Result;
use rentnest_db::Database;
use rentnest_types::document::{Document, FieldMap};

/// What a migration needs from persistence: a full read of a collection and a
/// field-scoped write of one record. No isolation is assumed between the two.
pub trait DocumentStore {
    fn find_all(&self, collection: &str) -> Result<Vec<Document>>;

    fn update_fields(&self, collection: &str, id: &str, fields: &FieldMap) -> Result<()>;
}

impl DocumentStore for Database {
    fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        Database::find_all(self, collection)
    }

    fn update_fields(&self, collection: &str, id: &str, fields: &FieldMap) -> Result<()> {
        Database::update_fields(self, collection, id, fields)
    }
}

#[cfg(test)]
pub use memory::MemoryStore;
