// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory [`TypeProvider`] with a fluent builder.

use super::{FieldDecl, ProviderError, TypeExpr, TypeProvider};
use std::collections::HashMap;

/// Record descriptions held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    records: HashMap<String, Vec<FieldDecl>>,
    order: Vec<String>,
}

impl TypeGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring record `name`. Redeclaring a record replaces it.
    pub fn record(&mut self, name: impl Into<String>) -> RecordBuilder<'_> {
        RecordBuilder {
            graph: self,
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Insert a record with already-built field declarations.
    pub fn insert(&mut self, name: impl Into<String>, fields: Vec<FieldDecl>) {
        let name = name.into();
        if self.records.insert(name.clone(), fields).is_none() {
            self.order.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Number of declared records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TypeProvider for TypeGraph {
    fn record_fields(&self, name: &str) -> Result<Vec<FieldDecl>, ProviderError> {
        self.records
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownRecord(name.to_string()))
    }

    fn record_names(&self) -> Vec<String> {
        self.order.clone()
    }
}

/// Builder returned by [`TypeGraph::record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    graph: &'a mut TypeGraph,
    name: String,
    fields: Vec<FieldDecl>,
}

impl RecordBuilder<'_> {
    /// Add a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeExpr) -> Self {
        self.fields.push(FieldDecl::new(name, ty));
        self
    }

    /// Add a field wrapped in [`TypeExpr::Optional`].
    #[must_use]
    pub fn optional_field(self, name: impl Into<String>, ty: TypeExpr) -> Self {
        self.field(name, TypeExpr::optional(ty))
    }

    /// Add a field referencing another record.
    #[must_use]
    pub fn record_field(self, name: impl Into<String>, record: impl Into<String>) -> Self {
        self.field(name, TypeExpr::named(record))
    }

    /// Store the record in the graph.
    pub fn finish(self) {
        self.graph.insert(self.name, self.fields);
    }
}
