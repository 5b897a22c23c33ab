use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Field name → value, as stored in a document body.
pub type FieldMap = Map<String, Value>;

/// A persisted record in its schemaless form.
///
/// Migrations work at this level because legacy records may not deserialize
/// into the current typed models.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: FieldMap,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn from_model<T: Serialize>(id: impl Into<String>, model: &T) -> serde_json::Result<Self> {
        Ok(Self::new(id, to_fields(model)?))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// A field counts as present only when it holds a non-null value.
    pub fn is_present(&self, field: &str) -> bool {
        self.present(field).is_some()
    }

    pub fn present(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    pub fn to_model<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}

/// Serialize a model into a document body. Non-object values are rejected.
pub fn to_fields<T: Serialize>(model: &T) -> serde_json::Result<FieldMap> {
    match serde_json::to_value(model)? {
        Value::Object(fields) => Ok(fields),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Reference values are usually plain id strings; anything else is compared
/// by its JSON text.
pub fn reference_key(value: &Value) -> String {
    match value {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}
