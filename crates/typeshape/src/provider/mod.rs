// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type description interface consumed by the walker.
//!
//! A [`TypeProvider`] answers one question: "list the fields of record `X`,
//! each with a name and a declared [`TypeExpr`]". Where the description comes
//! from (source parsing, reflection, IDL loading) is up to the provider.

mod graph;

pub use graph::{RecordBuilder, TypeGraph};

use std::fmt;
use thiserror::Error;

/// Declared type of a field, as reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Bool,
    /// Signed or unsigned integer of `bits` width.
    Int { signed: bool, bits: u8 },
    /// Floating point of `bits` width.
    Float { bits: u8 },
    Str,
    /// Ordered collection. `None` means the provider lost the element type.
    Sequence(Option<Box<TypeExpr>>),
    /// Keyed collection. A `None` component means the provider lost it.
    Mapping {
        key: Option<Box<TypeExpr>>,
        value: Option<Box<TypeExpr>>,
    },
    /// Reference to a record type by name.
    Named(String),
    /// Optional / nullable wrapper.
    Optional(Box<TypeExpr>),
    /// Unconstrained type.
    Any,
    /// A type the provider could not express; carries its source spelling.
    Opaque(String),
}

impl TypeExpr {
    pub fn int() -> Self {
        TypeExpr::Int {
            signed: true,
            bits: 64,
        }
    }

    pub fn uint(bits: u8) -> Self {
        TypeExpr::Int {
            signed: false,
            bits,
        }
    }

    pub fn float() -> Self {
        TypeExpr::Float { bits: 64 }
    }

    pub fn seq(element: TypeExpr) -> Self {
        TypeExpr::Sequence(Some(Box::new(element)))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Mapping {
            key: Some(Box::new(key)),
            value: Some(Box::new(value)),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    pub fn opaque(spelling: impl Into<String>) -> Self {
        TypeExpr::Opaque(spelling.into())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Bool => write!(f, "bool"),
            TypeExpr::Int { signed: true, bits } => write!(f, "i{bits}"),
            TypeExpr::Int {
                signed: false,
                bits,
            } => write!(f, "u{bits}"),
            TypeExpr::Float { bits } => write!(f, "f{bits}"),
            TypeExpr::Str => write!(f, "string"),
            TypeExpr::Sequence(Some(element)) => write!(f, "[{element}]"),
            TypeExpr::Sequence(None) => write!(f, "[?]"),
            TypeExpr::Mapping { key, value } => {
                write!(f, "map<")?;
                match key {
                    Some(key) => write!(f, "{key}")?,
                    None => write!(f, "?")?,
                }
                write!(f, ", ")?;
                match value {
                    Some(value) => write!(f, "{value}")?,
                    None => write!(f, "?")?,
                }
                write!(f, ">")
            }
            TypeExpr::Named(name) => write!(f, "{name}"),
            TypeExpr::Optional(inner) => write!(f, "{inner}?"),
            TypeExpr::Any => write!(f, "any"),
            TypeExpr::Opaque(spelling) => write!(f, "{spelling}"),
        }
    }
}

/// One declared field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeExpr,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Failure answers from a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider has no description for this record type.
    #[error("no description for record type `{0}`")]
    UnknownRecord(String),

    /// The provider found the record but could not describe it consistently.
    #[error("{reason}")]
    Malformed { record: String, reason: String },
}

/// Source of record type descriptions.
pub trait TypeProvider {
    /// List the fields of record `name` in declaration order.
    fn record_fields(&self, name: &str) -> Result<Vec<FieldDecl>, ProviderError>;

    /// Names of every record the provider can describe, if it can enumerate them.
    fn record_names(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<P: TypeProvider + ?Sized> TypeProvider for &P {
    fn record_fields(&self, name: &str) -> Result<Vec<FieldDecl>, ProviderError> {
        (**self).record_fields(name)
    }

    fn record_names(&self) -> Vec<String> {
        (**self).record_names()
    }
}

impl<P: TypeProvider + ?Sized> TypeProvider for Box<P> {
    fn record_fields(&self, name: &str) -> Result<Vec<FieldDecl>, ProviderError> {
        (**self).record_fields(name)
    }

    fn record_names(&self) -> Vec<String> {
        (**self).record_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_compact_notation() {
        let ty = TypeExpr::map(TypeExpr::Str, TypeExpr::seq(TypeExpr::optional(TypeExpr::int())));
        assert_eq!(ty.to_string(), "map<string, [i64?]>");
        assert_eq!(TypeExpr::Sequence(None).to_string(), "[?]");
        assert_eq!(TypeExpr::uint(8).to_string(), "u8");
    }

    #[test]
    fn provider_error_messages() {
        let err = ProviderError::UnknownRecord("Profile".into());
        assert_eq!(err.to_string(), "no description for record type `Profile`");
        let err = ProviderError::Malformed {
            record: "Profile".into(),
            reason: "unbalanced braces".into(),
        };
        assert_eq!(err.to_string(), "unbalanced braces");
    }
}
