// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Kind classifier: one declared type in, exactly one [`FieldKind`] out.
//!
//! Rules are applied in a fixed priority order, first match wins:
//!
//! 1. boolean
//! 2. numeric (integer or float)
//! 3. string
//! 4. sequence, element classified recursively
//! 5. mapping with string keys, value classified recursively
//! 6. named record
//! 7. unconstrained -> `Dynamic`
//!
//! Optional wrappers are looked through. Anything else is unsupported, and so
//! is a type nested deeper than [`MAX_NESTING`] levels.

use crate::diagnostics::ClassifyError;
use crate::model::{FieldKind, PrimitiveKind};
use crate::provider::{FieldDecl, TypeExpr};

/// Deepest collection/optional nesting the classifier descends into.
pub const MAX_NESTING: usize = 256;

/// Result of classifying one field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: FieldKind,
    /// The outermost declared type was optional.
    pub optional: bool,
    /// Spelling of the type that matched no rule. `kind` is then `Dynamic`.
    pub unsupported: Option<String>,
    /// Record types this field refers to, in encounter order.
    pub references: Vec<String>,
}

enum Failure {
    Unsupported(String),
    Malformed(ClassifyError),
}

/// Classify a field declaration.
///
/// An unsupported type is not an error: the field degrades to
/// [`FieldKind::Dynamic`] and `unsupported` names the offending type. The
/// `Err` case is a malformed declaration: a collection that lost one of its
/// component types.
pub fn classify_field(decl: &FieldDecl) -> Result<Classification, ClassifyError> {
    let (ty, optional) = strip_optional(&decl.ty);
    let mut references = Vec::new();

    match classify_expr(ty, &mut references, 0) {
        Ok(kind) => Ok(Classification {
            kind,
            optional,
            unsupported: None,
            references,
        }),
        Err(Failure::Unsupported(spelling)) => Ok(Classification {
            kind: FieldKind::Dynamic,
            optional,
            unsupported: Some(spelling),
            references: Vec::new(),
        }),
        Err(Failure::Malformed(reason)) => Err(reason),
    }
}

fn strip_optional(mut ty: &TypeExpr) -> (&TypeExpr, bool) {
    let mut optional = false;
    while let TypeExpr::Optional(inner) = ty {
        optional = true;
        ty = inner;
    }
    (ty, optional)
}

// @audit-ok: Simple pattern matching - one arm per classification rule
fn classify_expr(
    ty: &TypeExpr,
    references: &mut Vec<String>,
    depth: usize,
) -> Result<FieldKind, Failure> {
    if depth >= MAX_NESTING {
        return Err(Failure::Unsupported(format!(
            "type nested deeper than {MAX_NESTING} levels"
        )));
    }

    match ty {
        TypeExpr::Bool => Ok(FieldKind::Boolean),
        TypeExpr::Int { .. } => Ok(FieldKind::Primitive(PrimitiveKind::Integer)),
        TypeExpr::Float { .. } => Ok(FieldKind::Primitive(PrimitiveKind::Float)),
        TypeExpr::Str => Ok(FieldKind::Primitive(PrimitiveKind::String)),
        TypeExpr::Sequence(Some(element)) => {
            let (element, _) = strip_optional(element);
            Ok(FieldKind::sequence_of(classify_expr(
                element,
                references,
                depth + 1,
            )?))
        }
        TypeExpr::Sequence(None) => Err(Failure::Malformed(ClassifyError::MissingElement)),
        TypeExpr::Mapping { key, value } => classify_mapping(ty, key, value, references, depth),
        TypeExpr::Named(name) => {
            references.push(name.clone());
            Ok(FieldKind::Record(name.clone()))
        }
        TypeExpr::Optional(inner) => classify_expr(inner, references, depth + 1),
        TypeExpr::Any => Ok(FieldKind::Dynamic),
        TypeExpr::Opaque(spelling) => Err(Failure::Unsupported(spelling.clone())),
    }
}

fn classify_mapping(
    ty: &TypeExpr,
    key: &Option<Box<TypeExpr>>,
    value: &Option<Box<TypeExpr>>,
    references: &mut Vec<String>,
    depth: usize,
) -> Result<FieldKind, Failure> {
    let (Some(key), Some(value)) = (key, value) else {
        return Err(Failure::Malformed(ClassifyError::IncompleteMapping(
            ty.to_string(),
        )));
    };

    let (key, _) = strip_optional(key);
    if *key != TypeExpr::Str {
        return Err(Failure::Unsupported(ty.to_string()));
    }

    // Values without structure make the whole mapping dynamic.
    let (value, _) = strip_optional(value);
    if *value == TypeExpr::Any {
        return Ok(FieldKind::Dynamic);
    }

    Ok(FieldKind::string_mapping(classify_expr(
        value,
        references,
        depth + 1,
    )?))
}
