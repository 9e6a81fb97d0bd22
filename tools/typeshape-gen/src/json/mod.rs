// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Records inferred from a JSON sample document.
//!
//! Every object becomes a record whose fields are its keys, in document
//! order. Objects with the same key set share one record. Record names come
//! from the path that first reached the object: the root name, then each key
//! in PascalCase, with `Item` appended for array elements
//! (`{"user": {"tags": [{..}]}}` under `Root` gives `Root`, `RootUser` and
//! `RootUserTagsItem`).
//!
//! Scalars map to their obvious type. `null` and empty arrays carry no type
//! information and become `any`; so do arrays whose items disagree.

mod naming;

pub use naming::{safe_type_name, split_words, to_pascal_case};

use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use typeshape::{FieldDecl, ProviderError, TypeExpr, TypeProvider};

/// Values nested deeper than this are opaque.
const MAX_SAMPLE_DEPTH: usize = 256;

/// JSON sample errors.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level value is `{0}`, expected an object or an array of objects")]
    RootNotRecord(String),
}

/// Record descriptions inferred from one JSON document.
#[derive(Debug, Clone)]
pub struct JsonSample {
    records: HashMap<String, Vec<FieldDecl>>,
    order: Vec<String>,
    root: String,
}

impl JsonSample {
    /// Infer records from a parsed document. `root_name` names the top-level
    /// object (or the element of a top-level array).
    pub fn from_value(value: &Value, root_name: &str) -> Result<Self, SampleError> {
        let mut inference = Inference::default();
        let ty = inference.infer(value, root_name, 0);

        let root = match &ty {
            TypeExpr::Named(name) => Some(name.clone()),
            TypeExpr::Sequence(Some(element)) => match element.as_ref() {
                TypeExpr::Named(name) => Some(name.clone()),
                _ => None,
            },
            _ => None,
        }
        .ok_or_else(|| SampleError::RootNotRecord(ty.to_string()))?;

        Ok(Self {
            records: inference.records,
            order: inference.order,
            root,
        })
    }

    pub fn parse(text: &str, root_name: &str) -> Result<Self, SampleError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value, root_name)
    }

    pub fn from_file<P: AsRef<Path>>(path: P, root_name: &str) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SampleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sample = Self::parse(&text, root_name)?;
        tracing::debug!(
            "inferred {} record(s) from {}",
            sample.order.len(),
            path.display()
        );
        Ok(sample)
    }

    /// Name of the top-level record.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Record names in the order they were first met.
    pub fn record_order(&self) -> &[String] {
        &self.order
    }
}

impl TypeProvider for JsonSample {
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

#[derive(Default)]
struct Inference {
    records: HashMap<String, Vec<FieldDecl>>,
    order: Vec<String>,
    /// Sorted key set -> record name.
    shapes: HashMap<Vec<String>, String>,
}

impl Inference {
    fn infer(&mut self, node: &Value, hint: &str, depth: usize) -> TypeExpr {
        if depth >= MAX_SAMPLE_DEPTH {
            return TypeExpr::opaque(format!(
                "value nested deeper than {} levels",
                MAX_SAMPLE_DEPTH
            ));
        }

        match node {
            Value::Null => TypeExpr::Any,
            Value::Bool(_) => TypeExpr::Bool,
            Value::Number(n) => number_type(n),
            Value::String(_) => TypeExpr::Str,
            Value::Array(items) => {
                let item_hint = format!("{hint}Item");
                // Every item is inferred, so objects in mixed arrays still get records.
                let mut types = items
                    .iter()
                    .map(|item| self.infer(item, &item_hint, depth + 1));
                let Some(first) = types.next() else {
                    return TypeExpr::seq(TypeExpr::Any);
                };
                let uniform = types.fold(true, |same, ty| same && ty == first);
                TypeExpr::seq(if uniform { first } else { TypeExpr::Any })
            }
            Value::Object(map) => self.infer_object(map, hint, depth),
        }
    }

    fn infer_object(&mut self, map: &Map<String, Value>, hint: &str, depth: usize) -> TypeExpr {
        let mut shape: Vec<String> = map.keys().cloned().collect();
        shape.sort();
        if let Some(existing) = self.shapes.get(&shape) {
            return TypeExpr::named(existing.clone());
        }

        let name = self.unique_name(safe_type_name(hint, "Type"));
        self.shapes.insert(shape, name.clone());
        self.records.insert(name.clone(), Vec::new());
        self.order.push(name.clone());

        let fields = map
            .iter()
            .map(|(key, child)| {
                let child_hint = format!("{}{}", name, safe_type_name(key, "Field"));
                FieldDecl::new(key.clone(), self.infer(child, &child_hint, depth + 1))
            })
            .collect();
        self.records.insert(name.clone(), fields);

        TypeExpr::named(name)
    }

    fn unique_name(&self, base: String) -> String {
        if !self.records.contains_key(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}{n}");
            if !self.records.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Whole numbers are integers, even when written `3.0`.
fn number_type(n: &Number) -> TypeExpr {
    if n.is_i64() || n.is_u64() {
        return TypeExpr::int();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => TypeExpr::int(),
        _ => TypeExpr::float(),
    }
}
