/// Database row types — these map directly to SQLite rows.
/// Distinct from rentnest-types documents to keep the DB layer independent.
pub struct DocumentRow {
    pub id: String,
    pub body: String,
}
