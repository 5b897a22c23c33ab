use crate::Database;
use crate::models::DocumentRow;
use anyhow::{Result, anyhow, bail};
use rentnest_types::collections::{PROPERTIES, USERS};
use rentnest_types::document::{Document, FieldMap};
use rentnest_types::models::{Property, User};
use rusqlite::Connection;
use serde_json::Value;
use uuid::Uuid;

impl Database {
    // -- Documents --

    pub fn insert_document(&self, collection: &str, doc: &Document) -> Result<()> {
        let body = serde_json::to_string(&doc.fields)?;
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
                (collection, &doc.id, &body),
            )?;
            Ok(())
        })
    }

    pub fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.with_conn(|conn| query_document(conn, collection, id))
    }

    /// Every document in `collection`, oldest first.
    pub fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        self.with_conn(|conn| query_collection(conn, collection))
    }

    /// Set only the given top-level fields, leaving the rest of the body as
    /// stored. Issued as a single `json_set` so concurrent writers touching
    /// other fields are not clobbered.
    pub fn update_fields(&self, collection: &str, id: &str, fields: &FieldMap) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let (sql, params) = field_update(collection, id, fields)?;
        let changed = self.with_conn_mut(|conn| {
            Ok(conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?)
        })?;

        if changed == 0 {
            bail!("Document not found: {}/{}", collection, id);
        }
        Ok(())
    }

    // -- Users & properties --

    pub fn insert_user(&self, user: &User) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.insert_document(USERS, &Document::from_model(id.clone(), user)?)?;
        Ok(id)
    }

    pub fn insert_property(&self, property: &Property) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.insert_document(PROPERTIES, &Document::from_model(id.clone(), property)?)?;
        Ok(id)
    }
}

fn field_update(collection: &str, id: &str, fields: &FieldMap) -> Result<(String, Vec<String>)> {
    let mut params = vec![collection.to_string(), id.to_string()];
    let mut setters = Vec::with_capacity(fields.len());

    for (name, value) in fields {
        if name.is_empty() || name.contains('"') {
            bail!("Unsupported field name: {:?}", name);
        }
        params.push(format!("$.\"{}\"", name));
        params.push(value.to_string());
        setters.push(format!("?{}, json(?{})", params.len() - 1, params.len()));
    }

    let sql = format!(
        "UPDATE documents SET body = json_set(body, {}), updated_at = datetime('now')
         WHERE collection = ?1 AND id = ?2",
        setters.join(", ")
    );
    Ok((sql, params))
}

fn query_document(conn: &Connection, collection: &str, id: &str) -> Result<Option<Document>> {
    let mut stmt = conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2")?;

    let row = stmt
        .query_row([collection, id], |row| {
            Ok(DocumentRow {
                id: row.get(0)?,
                body: row.get(1)?,
            })
        })
        .optional()?;

    row.map(into_document).transpose()
}

fn query_collection(conn: &Connection, collection: &str) -> Result<Vec<Document>> {
    let mut stmt =
        conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 ORDER BY rowid")?;

    let rows = stmt
        .query_map([collection], |row| {
            Ok(DocumentRow {
                id: row.get(0)?,
                body: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter().map(into_document).collect()
}

fn into_document(row: DocumentRow) -> Result<Document> {
    match serde_json::from_str(&row.body)? {
        Value::Object(fields) => Ok(Document::new(row.id, fields)),
        _ => Err(anyhow!("Document {} has a non-object body", row.id)),
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_update_binds_paths_and_values() {
        let mut fields = FieldMap::new();
        fields.insert("owner".into(), json!("u9"));
        fields.insert("status".into(), json!("confirmed"));

        let (sql, params) = field_update("bookings", "b1", &fields).unwrap();
        assert!(sql.contains("json_set(body, ?3, json(?4), ?5, json(?6))"));
        assert_eq!(
            params,
            vec!["bookings", "b1", "$.\"owner\"", "\"u9\"", "$.\"status\"", "\"confirmed\""]
        );
    }

    #[test]
    fn quoted_field_names_are_rejected() {
        let mut fields = FieldMap::new();
        fields.insert("a\"b".into(), json!(1));
        assert!(field_update("users", "u1", &fields).is_err());
    }
}
