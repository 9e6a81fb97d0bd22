// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON form of schema sets and extraction results.
//!
//! ```text
//! {
//!   "roots": ["SS"],
//!   "records": {
//!     "Profile": {
//!       "type_name": "Profile",
//!       "fields": [
//!         { "name": "Score", "kind": { "type": "primitive", "of": "float" }, "optional": false }
//!       ],
//!       "status": { "state": "complete" }
//!     }
//!   }
//! }
//! ```
//!
//! Records are emitted in type-name order, so the same schema set always
//! produces the same document.

use crate::diagnostics::{ExtractError, InvariantViolation};
use crate::model::SchemaSet;
use crate::walker::Extraction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serialization failures.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but describes an inconsistent schema set.
    #[error("invalid schema set: {0}")]
    Invalid(#[from] InvariantViolation),
}

/// Compact JSON.
pub fn to_json(schema: &SchemaSet) -> Result<String, CodecError> {
    Ok(serde_json::to_string(schema)?)
}

/// Indented JSON.
pub fn to_json_pretty(schema: &SchemaSet) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(schema)?)
}

/// Parse a schema set and check its invariants.
pub fn from_json(input: &str) -> Result<SchemaSet, CodecError> {
    let schema: SchemaSet = serde_json::from_str(input)?;
    schema.check_invariants()?;
    Ok(schema)
}

#[derive(Serialize)]
struct ExtractionRef<'a> {
    schema: &'a SchemaSet,
    diagnostics: &'a [ExtractError],
}

#[derive(Deserialize)]
struct ExtractionDoc {
    schema: SchemaSet,
    diagnostics: Vec<ExtractError>,
}

impl<'a> From<&'a Extraction> for ExtractionRef<'a> {
    fn from(extraction: &'a Extraction) -> Self {
        Self {
            schema: &extraction.schema,
            diagnostics: &extraction.diagnostics,
        }
    }
}

/// Compact JSON document holding both the schema and the diagnostics.
pub fn extraction_to_json(extraction: &Extraction) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&ExtractionRef::from(extraction))?)
}

pub(crate) fn extraction_to_json_pretty(extraction: &Extraction) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&ExtractionRef::from(extraction))?)
}

/// Parse a document written by [`Extraction::to_json_pretty`] or
/// [`extraction_to_json`].
pub fn extraction_from_json(input: &str) -> Result<Extraction, CodecError> {
    let doc: ExtractionDoc = serde_json::from_str(input)?;
    doc.schema.check_invariants()?;
    Ok(Extraction {
        schema: doc.schema,
        diagnostics: doc.diagnostics,
    })
}
