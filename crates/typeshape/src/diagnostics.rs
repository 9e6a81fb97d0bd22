// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types reported by an extraction pass.
//!
//! Extraction never fails as a whole. Problems are collected, in the order
//! they were found, as [`ExtractError`] diagnostics next to the best-effort
//! schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Broad category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A field type matched no classification rule; the field became `Dynamic`.
    UnsupportedType,
    /// The provider answered inconsistently; the record was kept as invalid.
    MalformedDescription,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnsupportedType => write!(f, "unsupported-type"),
            DiagnosticKind::MalformedDescription => write!(f, "malformed-description"),
        }
    }
}

/// A single problem found during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractError {
    /// The declared type of `record.field` is outside the closed type universe.
    #[error("unsupported type `{type_desc}` for field `{record}.{field}`")]
    UnsupportedType {
        record: String,
        field: String,
        type_desc: String,
    },

    /// The description of `record` is inconsistent; its walk was aborted.
    #[error("malformed description of `{record}`: {reason}")]
    MalformedDescription { record: String, reason: String },
}

impl ExtractError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ExtractError::UnsupportedType { .. } => DiagnosticKind::UnsupportedType,
            ExtractError::MalformedDescription { .. } => DiagnosticKind::MalformedDescription,
        }
    }

    /// Record the diagnostic is attached to.
    pub fn record(&self) -> &str {
        match self {
            ExtractError::UnsupportedType { record, .. }
            | ExtractError::MalformedDescription { record, .. } => record,
        }
    }
}

/// Errors from [`SchemaSet::lookup`](crate::SchemaSet::lookup).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("record type not found: {0}")]
    NotFound(String),
}

/// A field declaration the classifier cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("sequence without element type")]
    MissingElement,

    #[error("mapping `{0}` is missing its key or value type")]
    IncompleteMapping(String),
}

/// A structural invariant of a [`SchemaSet`](crate::SchemaSet) that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root `{0}` has no record schema")]
    MissingRoot(String),

    #[error("record keyed `{key}` is named `{type_name}`")]
    KeyMismatch { key: String, type_name: String },

    #[error("record `{record}` has a field with an empty name")]
    EmptyFieldName { record: String },

    #[error("record `{record}` declares field `{field}` twice")]
    DuplicateField { record: String, field: String },

    #[error("field `{record}.{field}` references unknown record `{target}`")]
    DanglingReference {
        record: String,
        field: String,
        target: String,
    },
}
