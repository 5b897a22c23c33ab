use std::collections::HashMap;

use rentnest_types::document::{Document, FieldMap, reference_key};
use rentnest_types::models::BookingStatus;
use serde_json::Value;
use tracing::debug;

/// Maps a stored value to its current-schema form.
pub type Transform = fn(&Value) -> Value;

pub fn identity(value: &Value) -> Value {
    value.clone()
}

/// `approved → confirmed`, `rejected → cancelled`; anything else unchanged.
pub fn recode_status(value: &Value) -> Value {
    match value.as_str().and_then(BookingStatus::from_legacy) {
        Some(status) => Value::from(status.as_str()),
        None => value.clone(),
    }
}

/// One field-level rule. Every rule is evaluated against the record as
/// loaded, never against another rule's output.
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// Set `target := transform(source)` when `target` is absent and
    /// `source` is present. `source` is left in place.
    RenameIfAbsent {
        target: &'static str,
        source: &'static str,
        transform: Transform,
    },
    /// Rewrite a present `field` when the transform changes its value.
    Recode {
        field: &'static str,
        transform: Transform,
    },
    /// Fill an absent `target` from `field` of the `collection` record whose
    /// id is held in `via`.
    Backfill {
        target: &'static str,
        via: &'static str,
        collection: &'static str,
        field: &'static str,
    },
}

/// What a single rule decided for a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Set(Value),
    Unchanged,
    /// A backfill was due but the related record (or its field) is missing.
    Unresolved,
}

impl FieldRule {
    pub const fn rename(target: &'static str, source: &'static str) -> Self {
        FieldRule::RenameIfAbsent {
            target,
            source,
            transform: identity,
        }
    }

    pub const fn recode(field: &'static str, transform: Transform) -> Self {
        FieldRule::Recode { field, transform }
    }

    pub const fn backfill(
        target: &'static str,
        via: &'static str,
        collection: &'static str,
        field: &'static str,
    ) -> Self {
        FieldRule::Backfill {
            target,
            via,
            collection,
            field,
        }
    }

    pub const fn target(&self) -> &'static str {
        match *self {
            FieldRule::RenameIfAbsent { target, .. } => target,
            FieldRule::Recode { field, .. } => field,
            FieldRule::Backfill { target, .. } => target,
        }
    }

    /// The collection this rule reads from, besides the one it migrates.
    pub const fn lookup(&self) -> Option<&'static str> {
        match *self {
            FieldRule::Backfill { collection, .. } => Some(collection),
            _ => None,
        }
    }

    pub fn evaluate(&self, doc: &Document, refs: &References) -> Outcome {
        match *self {
            FieldRule::RenameIfAbsent {
                target,
                source,
                transform,
            } => {
                if doc.is_present(target) {
                    return Outcome::Unchanged;
                }
                doc.present(source)
                    .map_or(Outcome::Unchanged, |value| Outcome::Set(transform(value)))
            }
            FieldRule::Recode { field, transform } => match doc.present(field) {
                Some(value) => {
                    let recoded = transform(value);
                    if recoded == *value {
                        Outcome::Unchanged
                    } else {
                        Outcome::Set(recoded)
                    }
                }
                None => Outcome::Unchanged,
            },
            FieldRule::Backfill {
                target,
                via,
                collection,
                field,
            } => {
                if doc.is_present(target) {
                    return Outcome::Unchanged;
                }
                doc.present(via)
                    .and_then(|reference| refs.get(collection, &reference_key(reference)))
                    .and_then(|related| related.present(field))
                    .map_or(Outcome::Unresolved, |value| Outcome::Set(value.clone()))
            }
        }
    }
}

/// Related records, keyed by collection and then by id.
#[derive(Debug, Default)]
pub struct References {
    collections: HashMap<&'static str, HashMap<String, Document>>,
}

impl References {
    pub fn insert(&mut self, collection: &'static str, docs: Vec<Document>) {
        let by_id = docs.into_iter().map(|doc| (doc.id.clone(), doc)).collect();
        self.collections.insert(collection, by_id);
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<&Document> {
        self.collections.get(collection)?.get(id)
    }
}

/// The full update for one record.
#[derive(Debug, Default, PartialEq)]
pub struct RecordPlan {
    pub updates: FieldMap,
    /// Targets of backfills that found nothing to copy.
    pub unresolved: Vec<&'static str>,
}

impl RecordPlan {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Apply `rules` in order. The first rule to produce a value for a field
/// wins.
pub fn plan(rules: &[FieldRule], doc: &Document, refs: &References) -> RecordPlan {
    let mut plan = RecordPlan::default();

    for rule in rules {
        let target = rule.target();
        if plan.updates.contains_key(target) {
            continue;
        }
        match rule.evaluate(doc, refs) {
            Outcome::Set(value) => {
                plan.updates.insert(target.to_string(), value);
            }
            Outcome::Unresolved => {
                debug!("Record {}: no value to backfill {}", doc.id, target);
                plan.unresolved.push(target);
            }
            Outcome::Unchanged => {}
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, body: Value) -> Document {
        match body {
            Value::Object(fields) => Document::new(id, fields),
            _ => unreachable!(),
        }
    }

    fn properties() -> References {
        let mut refs = References::default();
        refs.insert(
            "properties",
            vec![
                doc("p1", json!({ "owner": "o1" })),
                doc("p2", json!({ "title": "No owner" })),
            ],
        );
        refs
    }

    #[test]
    fn rename_fills_absent_target() {
        let rule = FieldRule::rename("renter", "user");
        let d = doc("b1", json!({ "user": "u1" }));
        assert_eq!(rule.evaluate(&d, &References::default()), Outcome::Set(json!("u1")));
    }

    #[test]
    fn rename_keeps_existing_target() {
        let rule = FieldRule::rename("renter", "user");
        let d = doc("b1", json!({ "user": "u1", "renter": "u2" }));
        assert_eq!(rule.evaluate(&d, &References::default()), Outcome::Unchanged);
    }

    #[test]
    fn rename_treats_null_target_as_absent() {
        let rule = FieldRule::rename("role", "accountType");
        let d = doc("u1", json!({ "accountType": "owner", "role": null }));
        assert_eq!(rule.evaluate(&d, &References::default()), Outcome::Set(json!("owner")));
    }

    #[test]
    fn rename_without_source_does_nothing() {
        let rule = FieldRule::rename("role", "accountType");
        let d = doc("u1", json!({ "accountType": null }));
        assert_eq!(rule.evaluate(&d, &References::default()), Outcome::Unchanged);
    }

    #[test]
    fn status_recode() {
        let rule = FieldRule::recode("status", recode_status);
        let refs = References::default();
        assert_eq!(
            rule.evaluate(&doc("b1", json!({ "status": "approved" })), &refs),
            Outcome::Set(json!("confirmed"))
        );
        assert_eq!(
            rule.evaluate(&doc("b2", json!({ "status": "rejected" })), &refs),
            Outcome::Set(json!("cancelled"))
        );
        assert_eq!(
            rule.evaluate(&doc("b3", json!({ "status": "pending" })), &refs),
            Outcome::Unchanged
        );
        assert_eq!(
            rule.evaluate(&doc("b4", json!({ "status": "on-hold" })), &refs),
            Outcome::Unchanged
        );
        assert_eq!(rule.evaluate(&doc("b5", json!({})), &refs), Outcome::Unchanged);
    }

    #[test]
    fn backfill_copies_from_related_record() {
        let rule = FieldRule::backfill("owner", "property", "properties", "owner");
        let d = doc("b1", json!({ "property": "p1" }));
        assert_eq!(rule.evaluate(&d, &properties()), Outcome::Set(json!("o1")));
    }

    #[test]
    fn backfill_without_value_is_unresolved() {
        let rule = FieldRule::backfill("owner", "property", "properties", "owner");
        let refs = properties();
        assert_eq!(rule.evaluate(&doc("b1", json!({ "property": "p2" })), &refs), Outcome::Unresolved);
        assert_eq!(rule.evaluate(&doc("b2", json!({ "property": "p9" })), &refs), Outcome::Unresolved);
        assert_eq!(rule.evaluate(&doc("b3", json!({})), &refs), Outcome::Unresolved);
    }

    #[test]
    fn backfill_skips_present_target() {
        let rule = FieldRule::backfill("owner", "property", "properties", "owner");
        let d = doc("b1", json!({ "property": "p1", "owner": "o7" }));
        assert_eq!(rule.evaluate(&d, &properties()), Outcome::Unchanged);
    }

    #[test]
    fn first_rule_for_a_field_wins() {
        let rules = [FieldRule::rename("renter", "user"), FieldRule::rename("renter", "tenant")];
        let d = doc("b1", json!({ "user": "u1", "tenant": "u2" }));
        let plan = plan(&rules, &d, &References::default());
        assert_eq!(plan.updates.get("renter"), Some(&json!("u1")));
        assert_eq!(plan.updates.len(), 1);
    }

    #[test]
    fn plan_collects_updates_and_unresolved() {
        let rules = [
            FieldRule::rename("renter", "user"),
            FieldRule::recode("status", recode_status),
            FieldRule::backfill("owner", "property", "properties", "owner"),
        ];
        let d = doc("b1", json!({ "user": "u1", "status": "approved", "property": "p9" }));
        let plan = plan(&rules, &d, &properties());

        assert_eq!(plan.updates.get("renter"), Some(&json!("u1")));
        assert_eq!(plan.updates.get("status"), Some(&json!("confirmed")));
        assert!(!plan.updates.contains_key("owner"));
        assert_eq!(plan.unresolved, vec!["owner"]);
    }
}
