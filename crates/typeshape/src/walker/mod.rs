// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record walker: builds a [`SchemaSet`] from a root record type.
//!
//! Records referenced by fields are not walked recursively on the host
//! stack. They are claimed in the [`CycleGuard`] and pushed on a work queue,
//! which the pass drains until every reachable record has a schema.

mod guard;

pub use guard::{CycleGuard, VisitState};

use crate::classify::classify_field;
use crate::codec::{self, CodecError};
use crate::diagnostics::ExtractError;
use crate::model::{FieldDescriptor, RecordSchema, SchemaSet};
use crate::provider::TypeProvider;
use std::collections::{HashSet, VecDeque};

/// Output of an extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Best-effort schema for every record reached.
    pub schema: SchemaSet,
    /// Problems in the order they were found. Empty means full success.
    pub diagnostics: Vec<ExtractError>,
}

impl Extraction {
    /// No diagnostics were raised.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Pretty JSON document holding both the schema and the diagnostics.
    pub fn to_json_pretty(&self) -> Result<String, CodecError> {
        codec::extraction_to_json_pretty(self)
    }
}

/// Extract the schema of `root` and of every record it reaches.
pub fn extract_schema<P: TypeProvider + ?Sized>(provider: &P, root: &str) -> Extraction {
    extract_schemas(provider, [root])
}

/// Extract several roots in one pass sharing a single schema set.
///
/// Repeated root names are kept once, in first-seen order.
pub fn extract_schemas<P, I, S>(provider: &P, roots: I) -> Extraction
where
    P: TypeProvider + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let roots: Vec<String> = roots
        .into_iter()
        .map(|r| r.as_ref().to_string())
        .filter(|r| seen.insert(r.clone()))
        .collect();
    let mut walker = Walker::new(provider, roots.clone());

    for root in &roots {
        walker.schedule(root);
    }
    walker.drain();

    log::debug!(
        "extracted {} record(s) from {:?} with {} diagnostic(s)",
        walker.schema.len(),
        roots,
        walker.diagnostics.len()
    );

    Extraction {
        schema: walker.schema,
        diagnostics: walker.diagnostics,
    }
}

struct Walker<'p, P: ?Sized> {
    provider: &'p P,
    guard: CycleGuard,
    queue: VecDeque<String>,
    schema: SchemaSet,
    diagnostics: Vec<ExtractError>,
}

impl<'p, P: TypeProvider + ?Sized> Walker<'p, P> {
    fn new(provider: &'p P, roots: Vec<String>) -> Self {
        Self {
            provider,
            guard: CycleGuard::new(),
            queue: VecDeque::new(),
            schema: SchemaSet::with_roots(roots),
            diagnostics: Vec::new(),
        }
    }

    fn schedule(&mut self, name: &str) {
        if self.guard.try_schedule(name) {
            log::debug!("scheduling record `{}`", name);
            self.queue.push_back(name.to_string());
        }
    }

    fn drain(&mut self) {
        while let Some(name) = self.queue.pop_front() {
            self.walk_record(&name);
        }
    }

    fn walk_record(&mut self, name: &str) {
        self.guard.begin(name);

        let decls = match self.provider.record_fields(name) {
            Ok(decls) => decls,
            Err(err) => {
                self.abort(name, Vec::new(), err.to_string());
                return;
            }
        };

        let mut fields = Vec::with_capacity(decls.len());
        let mut seen = HashSet::with_capacity(decls.len());

        for (index, decl) in decls.iter().enumerate() {
            if decl.name.is_empty() {
                self.abort(name, fields, format!("field #{index} has an empty name"));
                return;
            }
            if !seen.insert(decl.name.as_str()) {
                self.abort(
                    name,
                    fields,
                    format!("field `{}` is declared more than once", decl.name),
                );
                return;
            }

            let classification = match classify_field(decl) {
                Ok(classification) => classification,
                Err(err) => {
                    self.abort(name, fields, format!("field `{}`: {}", decl.name, err));
                    return;
                }
            };

            if let Some(type_desc) = classification.unsupported {
                self.report(ExtractError::UnsupportedType {
                    record: name.to_string(),
                    field: decl.name.clone(),
                    type_desc,
                });
            }

            for reference in &classification.references {
                self.schedule(reference);
            }

            fields.push(FieldDescriptor {
                name: decl.name.clone(),
                kind: classification.kind,
                optional: classification.optional,
            });
        }

        self.guard.complete(name);
        self.schema.insert(RecordSchema::complete(name, fields));
    }

    /// Keep what was classified so far and mark the record invalid.
    fn abort(&mut self, name: &str, fields: Vec<FieldDescriptor>, reason: String) {
        self.report(ExtractError::MalformedDescription {
            record: name.to_string(),
            reason: reason.clone(),
        });
        self.guard.complete(name);
        self.schema.insert(RecordSchema::invalid(name, fields, reason));
    }

    fn report(&mut self, diagnostic: ExtractError) {
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests;
