// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Go struct declarations as a [`TypeProvider`].
//!
//! `type X struct { ... }` blocks become records. Named non-struct types
//! (`type Region string`, `type Id = uint64`) are kept as aliases and
//! substituted wherever a field refers to them; named interfaces behave as
//! `any`. A named type that refers back to itself (`type Tree map[string][]Tree`)
//! is `any` at the point where it recurs.

mod scan;
mod types;

use scan::TypeSpec;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use typeshape::{FieldDecl, ProviderError, TypeExpr, TypeProvider};

/// Alias expansions allowed while resolving one declared type.
const ALIAS_BUDGET: usize = 4096;

/// Scanner errors.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("type `{name}` is declared more than once")]
    DuplicateType { name: String },
}

/// Record descriptions scanned from Go source.
#[derive(Debug, Clone, Default)]
pub struct GoSource {
    structs: HashMap<String, Result<Vec<FieldDecl>, String>>,
    aliases: HashMap<String, TypeExpr>,
    order: Vec<String>,
}

impl GoSource {
    /// Scan one source text.
    pub fn parse(src: &str) -> Result<Self, ScanError> {
        let text = scan::sanitize(src);
        let mut source = GoSource::default();

        for spec in scan::find_type_specs(&text) {
            match spec {
                TypeSpec::Struct { name, body } => {
                    let fields = body.and_then(|body| parse_fields(&body));
                    tracing::debug!("found struct {}", name);
                    source.add_struct(name, fields)?;
                }
                TypeSpec::Interface { name } => source.add_alias(name, TypeExpr::Any)?,
                TypeSpec::Alias { name, target } => {
                    source.add_alias(name, types::parse_type(&target))?;
                }
            }
        }

        Ok(source)
    }

    /// Scan and merge several files.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ScanError> {
        let mut merged = GoSource::default();
        for path in paths {
            let path = path.as_ref();
            let src = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let scanned = GoSource::parse(&src)?;
            tracing::debug!(
                "scanned {}: {} struct(s)",
                path.display(),
                scanned.struct_names().len()
            );
            merged.merge(scanned)?;
        }
        Ok(merged)
    }

    /// Add every declaration of `other`. Names must not collide.
    pub fn merge(&mut self, other: GoSource) -> Result<(), ScanError> {
        let GoSource {
            mut structs,
            aliases,
            order,
        } = other;

        for name in order {
            if let Some(fields) = structs.remove(&name) {
                self.add_struct(name, fields)?;
            }
        }
        for (name, target) in aliases {
            self.add_alias(name, target)?;
        }
        Ok(())
    }

    /// Struct names in declaration order.
    pub fn struct_names(&self) -> &[String] {
        &self.order
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    fn add_struct(
        &mut self,
        name: String,
        fields: Result<Vec<FieldDecl>, String>,
    ) -> Result<(), ScanError> {
        if self.is_declared(&name) {
            return Err(ScanError::DuplicateType { name });
        }
        self.order.push(name.clone());
        self.structs.insert(name, fields);
        Ok(())
    }

    fn add_alias(&mut self, name: String, target: TypeExpr) -> Result<(), ScanError> {
        if self.is_declared(&name) {
            return Err(ScanError::DuplicateType { name });
        }
        self.aliases.insert(name, target);
        Ok(())
    }

    fn is_declared(&self, name: &str) -> bool {
        self.structs.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Substitute aliases inside `ty`.
    fn resolve(&self, ty: &TypeExpr) -> TypeExpr {
        AliasResolver {
            aliases: &self.aliases,
            path: Vec::new(),
            budget: ALIAS_BUDGET,
        }
        .resolve(ty, 0)
    }
}

/// One alias substitution pass.
///
/// `path` holds the aliases being expanded above the current node, so a
/// recurring name is cut off instead of expanded again. `budget` bounds the
/// total number of expansions, which keeps alias DAGs like
/// `type B map[A]A; type C map[B]B` from growing exponentially.
struct AliasResolver<'a> {
    aliases: &'a HashMap<String, TypeExpr>,
    path: Vec<&'a str>,
    budget: usize,
}

impl<'a> AliasResolver<'a> {
    fn resolve(&mut self, ty: &'a TypeExpr, depth: usize) -> TypeExpr {
        if depth >= types::MAX_TYPE_DEPTH {
            return TypeExpr::opaque(format!(
                "type nested deeper than {} levels",
                types::MAX_TYPE_DEPTH
            ));
        }

        match ty {
            TypeExpr::Named(name) => {
                let aliases = self.aliases;
                let Some((key, target)) = aliases.get_key_value(name) else {
                    return ty.clone();
                };
                if self.path.contains(&key.as_str()) {
                    return TypeExpr::Any;
                }
                if self.budget == 0 {
                    return TypeExpr::opaque(name.clone());
                }
                self.budget -= 1;
                self.path.push(key);
                let resolved = self.resolve(target, depth + 1);
                self.path.pop();
                resolved
            }
            TypeExpr::Sequence(element) => TypeExpr::Sequence(
                element
                    .as_deref()
                    .map(|e| Box::new(self.resolve(e, depth + 1))),
            ),
            TypeExpr::Mapping { key, value } => {
                let key = key.as_deref().map(|k| Box::new(self.resolve(k, depth + 1)));
                let value = value
                    .as_deref()
                    .map(|v| Box::new(self.resolve(v, depth + 1)));
                TypeExpr::Mapping { key, value }
            }
            TypeExpr::Optional(inner) => TypeExpr::optional(self.resolve(inner, depth + 1)),
            TypeExpr::Bool
            | TypeExpr::Int { .. }
            | TypeExpr::Float { .. }
            | TypeExpr::Str
            | TypeExpr::Any
            | TypeExpr::Opaque(_) => ty.clone(),
        }
    }
}

fn parse_fields(body: &str) -> Result<Vec<FieldDecl>, String> {
    let mut fields = Vec::new();
    for entry in scan::split_entries(body) {
        let parsed = scan::parse_field(entry)?;
        let ty = types::parse_type(&parsed.ty);
        for name in parsed.names {
            fields.push(FieldDecl::new(name, ty.clone()));
        }
    }
    Ok(fields)
}

impl TypeProvider for GoSource {
    fn record_fields(&self, name: &str) -> Result<Vec<FieldDecl>, ProviderError> {
        match self.structs.get(name) {
            Some(Ok(fields)) => Ok(fields
                .iter()
                .map(|f| FieldDecl::new(f.name.clone(), self.resolve(&f.ty)))
                .collect()),
            Some(Err(reason)) => Err(ProviderError::Malformed {
                record: name.to_string(),
                reason: reason.clone(),
            }),
            None => match self.resolve(&TypeExpr::named(name)) {
                TypeExpr::Named(target) if target != name && self.structs.contains_key(&target) => {
                    self.record_fields(&target)
                }
                _ => Err(ProviderError::UnknownRecord(name.to_string())),
            },
        }
    }

    fn record_names(&self) -> Vec<String> {
        self.order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODELS: &str = r#"
package models

import "time"

// Region is stored as a plain string.
type Region string

type UserID = uint64

type Shape interface {
    Area() float64
}

type User struct {
    ID       UserID            `json:"id"`
    Name     string            `json:"name"` // display name
    Region   Region
    Manager  *User
    Teams    []Team
    Joined   time.Time
    Extra    map[string]Shape
}

type Team struct{ Name string; Size int }
"#;

    #[test]
    fn scans_structs_and_aliases() {
        let source = GoSource::parse(MODELS).unwrap();
        assert_eq!(source.struct_names(), ["User".to_string(), "Team".to_string()]);
        assert_eq!(source.alias_count(), 3);
    }

    #[test]
    fn aliases_are_substituted() {
        let source = GoSource::parse(MODELS).unwrap();
        let fields = source.record_fields("User").unwrap();
        let by_name: HashMap<_, _> = fields.iter().map(|f| (f.name.as_str(), &f.ty)).collect();

        assert_eq!(by_name["ID"], &TypeExpr::uint(64));
        assert_eq!(by_name["Region"], &TypeExpr::Str);
        assert_eq!(by_name["Manager"], &TypeExpr::optional(TypeExpr::named("User")));
        assert_eq!(by_name["Joined"], &TypeExpr::opaque("time.Time"));
        assert_eq!(by_name["Extra"], &TypeExpr::map(TypeExpr::Str, TypeExpr::Any));
    }

    #[test]
    fn semicolon_separated_fields() {
        let source = GoSource::parse(MODELS).unwrap();
        let names: Vec<_> = source
            .record_fields("Team")
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Name", "Size"]);
    }

    #[test]
    fn alias_to_struct_describes_the_struct() {
        let source = GoSource::parse("type A struct { X int }\ntype B = A\n").unwrap();
        assert_eq!(source.record_fields("B").unwrap().len(), 1);
        assert!(matches!(
            source.record_fields("C"),
            Err(ProviderError::UnknownRecord(_))
        ));
    }

    #[test]
    fn alias_cycle_becomes_any() {
        let source = GoSource::parse("type A = B\ntype B = A\ntype S struct { F A }\n").unwrap();
        let fields = source.record_fields("S").unwrap();
        assert_eq!(fields[0].ty, TypeExpr::Any);
    }

    #[test]
    fn self_referencing_named_type_recurs_as_any() {
        let source =
            GoSource::parse("type Tree map[string][]Tree\ntype S struct { F Tree }\n").unwrap();
        let fields = source.record_fields("S").unwrap();
        assert_eq!(
            fields[0].ty,
            TypeExpr::map(TypeExpr::Str, TypeExpr::seq(TypeExpr::Any))
        );
    }

    #[test]
    fn doubly_recursive_named_type_resolves_once() {
        let source = GoSource::parse("type A map[*A]A\ntype S struct { F A }\n").unwrap();
        let fields = source.record_fields("S").unwrap();
        assert_eq!(
            fields[0].ty,
            TypeExpr::map(TypeExpr::optional(TypeExpr::Any), TypeExpr::Any)
        );
    }

    #[test]
    fn alias_fan_out_is_bounded() {
        let mut src = String::from("type T0 string\n");
        for i in 1..=40 {
            src.push_str(&format!("type T{i} map[T{prev}]T{prev}\n", prev = i - 1));
        }
        src.push_str("type S struct { F T40 }\n");

        let source = GoSource::parse(&src).unwrap();
        let fields = source.record_fields("S").unwrap();
        assert!(matches!(fields[0].ty, TypeExpr::Mapping { .. }));
    }

    #[test]
    fn unparseable_field_makes_record_malformed() {
        let source = GoSource::parse("type Bad struct {\n 1x int\n}\n").unwrap();
        match source.record_fields("Bad") {
            Err(ProviderError::Malformed { record, reason }) => {
                assert_eq!(record, "Bad");
                assert!(reason.contains("1x int"));
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_declarations_are_rejected() {
        let mut a = GoSource::parse("type A struct {}").unwrap();
        let b = GoSource::parse("type A string").unwrap();
        assert!(matches!(
            a.merge(b),
            Err(ScanError::DuplicateType { name }) if name == "A"
        ));
    }
}
