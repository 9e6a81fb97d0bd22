// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural schema extraction.
//!
//! Walks a record type description exhaustively and produces a canonical,
//! serializable [`SchemaSet`]: one [`RecordSchema`] per record type reached
//! from the root, each an ordered list of named, classified fields.
//!
//! # Features
//!
//! - **Closed kind model**: every field is exactly one [`FieldKind`]
//!   (primitive, boolean, record reference, sequence, string-keyed mapping,
//!   or `Dynamic`)
//! - **Cycle safe**: self- and mutually-referential records are walked once
//! - **Partial failure**: unsupported types degrade to `Dynamic`, malformed
//!   records are kept as invalid, and every problem is reported
//! - **JSON form**: schema sets round-trip through [`codec`]
//!
//! # Architecture
//!
//! ```text
//!   TypeProvider (record fields + declared types)
//!        |
//!        v
//!   Walker --- CycleGuard
//!        |
//!        v
//!   Classifier (one FieldKind per declared type)
//!        |
//!        v
//!   SchemaSet + diagnostics
//! ```
//!
//! # Example
//!
//! ```rust
//! use typeshape::{extract_schema, FieldKind, PrimitiveKind, TypeExpr, TypeGraph};
//!
//! let mut graph = TypeGraph::new();
//! graph
//!     .record("Node")
//!     .field("label", TypeExpr::Str)
//!     .field("children", TypeExpr::seq(TypeExpr::named("Node")))
//!     .finish();
//!
//! let extraction = extract_schema(&graph, "Node");
//! assert!(extraction.is_clean());
//!
//! let node = extraction.schema.lookup("Node").unwrap();
//! assert_eq!(node.fields[0].kind, FieldKind::Primitive(PrimitiveKind::String));
//! ```

pub mod classify;
pub mod codec;
pub mod diagnostics;
pub mod model;
pub mod provider;
pub mod walker;

pub use classify::{classify_field, Classification};
pub use codec::CodecError;
pub use diagnostics::{
    ClassifyError, DiagnosticKind, ExtractError, InvariantViolation, LookupError,
};
pub use model::{
    FieldDescriptor, FieldKind, PrimitiveKind, RecordSchema, RecordStatus, SchemaSet,
    UnresolvedRef,
};
pub use provider::{FieldDecl, ProviderError, RecordBuilder, TypeExpr, TypeGraph, TypeProvider};
pub use walker::{extract_schema, extract_schemas, CycleGuard, Extraction, VisitState};
