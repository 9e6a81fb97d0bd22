// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema model: field kinds, record schemas and the schema set.

use crate::diagnostics::{InvariantViolation, LookupError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Primitive subkinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Integer,
    Float,
    String,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Integer => write!(f, "integer"),
            PrimitiveKind::Float => write!(f, "float"),
            PrimitiveKind::String => write!(f, "string"),
        }
    }
}

/// Structural kind of a field. Exactly one variant applies to any field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum FieldKind {
    /// Integer, float or string.
    Primitive(PrimitiveKind),
    Boolean,
    /// Reference to a record type by name.
    Record(String),
    /// Ordered collection of elements of the inner kind.
    SequenceOf(Box<FieldKind>),
    /// Mapping with keys of `key` kind (always string) and values of `value` kind.
    Mapping {
        key: PrimitiveKind,
        value: Box<FieldKind>,
    },
    /// No structural guarantee; consumers inspect values per instance.
    Dynamic,
}

impl FieldKind {
    pub fn sequence_of(element: FieldKind) -> Self {
        FieldKind::SequenceOf(Box::new(element))
    }

    pub fn string_mapping(value: FieldKind) -> Self {
        FieldKind::Mapping {
            key: PrimitiveKind::String,
            value: Box::new(value),
        }
    }

    pub fn record(name: impl Into<String>) -> Self {
        FieldKind::Record(name.into())
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, FieldKind::Dynamic)
    }

    /// Record name referenced by this kind, looking through collections.
    pub fn record_ref(&self) -> Option<&str> {
        match self {
            FieldKind::Record(name) => Some(name),
            FieldKind::SequenceOf(inner) => inner.record_ref(),
            FieldKind::Mapping { value, .. } => value.record_ref(),
            FieldKind::Primitive(_) | FieldKind::Boolean | FieldKind::Dynamic => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(p) => write!(f, "{p}"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Record(name) => write!(f, "record {name}"),
            FieldKind::SequenceOf(inner) => write!(f, "sequence<{inner}>"),
            FieldKind::Mapping { key, value } => write!(f, "mapping<{key}, {value}>"),
            FieldKind::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// A named, classified field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// The declared type was wrapped in an optional marker.
    #[serde(default)]
    pub optional: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Outcome of walking one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecordStatus {
    Complete,
    /// The walk was aborted; `fields` holds what was classified before.
    Invalid { reason: String },
}

/// Schema of one record type: fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub type_name: String,
    pub fields: Vec<FieldDescriptor>,
    pub status: RecordStatus,
}

impl RecordSchema {
    pub fn complete(type_name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
            status: RecordStatus::Complete,
        }
    }

    pub fn invalid(
        type_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
            status: RecordStatus::Invalid {
                reason: reason.into(),
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, RecordStatus::Complete)
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// A record reference that does not resolve inside its schema set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    pub record: String,
    pub field: String,
    pub target: String,
}

/// Every record schema produced by one extraction pass, keyed by type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSet {
    roots: Vec<String>,
    records: BTreeMap<String, RecordSchema>,
}

impl SchemaSet {
    pub(crate) fn with_roots(roots: Vec<String>) -> Self {
        Self {
            roots,
            records: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, schema: RecordSchema) {
        self.records.insert(schema.type_name.clone(), schema);
    }

    /// Look up the schema of `type_name`.
    pub fn lookup(&self, type_name: &str) -> Result<&RecordSchema, LookupError> {
        self.records
            .get(type_name)
            .ok_or_else(|| LookupError::NotFound(type_name.to_string()))
    }

    pub fn get(&self, type_name: &str) -> Option<&RecordSchema> {
        self.records.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.records.contains_key(type_name)
    }

    /// Root type names the pass started from.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Records sorted by type name.
    pub fn records(&self) -> impl Iterator<Item = &RecordSchema> {
        self.records.values()
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose walk was aborted.
    pub fn invalid_records(&self) -> impl Iterator<Item = &RecordSchema> {
        self.records.values().filter(|r| !r.is_complete())
    }

    /// Record references whose target has no schema in this set.
    ///
    /// Empty for any set returned by a finished extraction pass.
    pub fn unresolved_references(&self) -> Vec<UnresolvedRef> {
        let mut dangling = Vec::new();
        for record in self.records.values() {
            for field in &record.fields {
                if let Some(target) = field.kind.record_ref() {
                    if !self.records.contains_key(target) {
                        dangling.push(UnresolvedRef {
                            record: record.type_name.clone(),
                            field: field.name.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }
        dangling
    }

    /// Check the structural invariants of the set.
    ///
    /// Used when a set comes from outside an extraction pass (deserialization).
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.roots.iter().find(|r| !self.records.contains_key(*r)) {
            return Err(InvariantViolation::MissingRoot(root.clone()));
        }

        for (key, record) in &self.records {
            if key != &record.type_name {
                return Err(InvariantViolation::KeyMismatch {
                    key: key.clone(),
                    type_name: record.type_name.clone(),
                });
            }

            let mut seen = HashSet::with_capacity(record.fields.len());
            for field in &record.fields {
                if field.name.is_empty() {
                    return Err(InvariantViolation::EmptyFieldName {
                        record: key.clone(),
                    });
                }
                if !seen.insert(field.name.as_str()) {
                    return Err(InvariantViolation::DuplicateField {
                        record: key.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        match self.unresolved_references().into_iter().next() {
            Some(dangling) => Err(InvariantViolation::DanglingReference {
                record: dangling.record,
                field: dangling.field,
                target: dangling.target,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> SchemaSet {
        let mut set = SchemaSet::with_roots(vec!["Pose".into()]);
        set.insert(RecordSchema::complete(
            "Point",
            vec![
                FieldDescriptor::new("x", FieldKind::Primitive(PrimitiveKind::Float)),
                FieldDescriptor::new("y", FieldKind::Primitive(PrimitiveKind::Float)),
            ],
        ));
        set.insert(RecordSchema::complete(
            "Pose",
            vec![
                FieldDescriptor::new("position", FieldKind::record("Point")),
                FieldDescriptor::new("tag", FieldKind::Primitive(PrimitiveKind::String))
                    .optional(),
            ],
        ));
        set
    }

    #[test]
    fn lookup_found_and_missing() {
        let set = sample_set();
        assert_eq!(set.lookup("Point").unwrap().fields.len(), 2);
        assert_eq!(
            set.lookup("Quaternion").unwrap_err(),
            LookupError::NotFound("Quaternion".into())
        );
    }

    #[test]
    fn records_iterate_in_name_order() {
        let set = sample_set();
        assert_eq!(set.type_names(), vec!["Point", "Pose"]);
    }

    #[test]
    fn record_ref_looks_through_collections() {
        let kind = FieldKind::string_mapping(FieldKind::sequence_of(FieldKind::record("Point")));
        assert_eq!(kind.record_ref(), Some("Point"));
        assert_eq!(FieldKind::Dynamic.record_ref(), None);
    }

    #[test]
    fn display_is_readable() {
        let kind = FieldKind::sequence_of(FieldKind::record("Address"));
        assert_eq!(kind.to_string(), "sequence<record Address>");
        let map = FieldKind::string_mapping(FieldKind::Primitive(PrimitiveKind::String));
        assert_eq!(map.to_string(), "mapping<string, string>");
    }

    #[test]
    fn dangling_reference_is_reported() {
        let mut set = sample_set();
        set.insert(RecordSchema::complete(
            "Path",
            vec![FieldDescriptor::new(
                "poses",
                FieldKind::sequence_of(FieldKind::record("Stamped")),
            )],
        ));

        let dangling = set.unresolved_references();
        assert_eq!(
            dangling,
            vec![UnresolvedRef {
                record: "Path".into(),
                field: "poses".into(),
                target: "Stamped".into(),
            }]
        );
        assert!(matches!(
            set.check_invariants(),
            Err(InvariantViolation::DanglingReference { target, .. }) if target == "Stamped"
        ));
    }

    #[test]
    fn missing_root_breaks_invariants() {
        let set = SchemaSet::with_roots(vec!["Ghost".into()]);
        assert_eq!(
            set.check_invariants(),
            Err(InvariantViolation::MissingRoot("Ghost".into()))
        );
    }

    #[test]
    fn duplicate_field_breaks_invariants() {
        let mut set = SchemaSet::default();
        set.insert(RecordSchema::complete(
            "Twice",
            vec![
                FieldDescriptor::new("a", FieldKind::Boolean),
                FieldDescriptor::new("a", FieldKind::Boolean),
            ],
        ));
        assert_eq!(
            set.check_invariants(),
            Err(InvariantViolation::DuplicateField {
                record: "Twice".into(),
                field: "a".into(),
            })
        );
    }

    #[test]
    fn invalid_records_are_listed() {
        let mut set = sample_set();
        set.insert(RecordSchema::invalid("Broken", Vec::new(), "unknown record"));
        let invalid: Vec<_> = set.invalid_records().map(|r| r.type_name.as_str()).collect();
        assert_eq!(invalid, vec!["Broken"]);
        assert!(set.check_invariants().is_ok());
    }
}
