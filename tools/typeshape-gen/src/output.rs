// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Rendering and writing extraction results.

use std::path::Path;
use typeshape::codec::{self, CodecError};
use typeshape::{Extraction, RecordSchema, RecordStatus};

/// Render an extraction as JSON.
///
/// With `include_diagnostics` the document is `{ "schema": ..., "diagnostics": [...] }`;
/// otherwise it is the bare schema set.
pub fn render(
    extraction: &Extraction,
    pretty: bool,
    include_diagnostics: bool,
) -> Result<String, CodecError> {
    match (include_diagnostics, pretty) {
        (true, true) => extraction.to_json_pretty(),
        (true, false) => codec::extraction_to_json(extraction),
        (false, true) => codec::to_json_pretty(&extraction.schema),
        (false, false) => codec::to_json(&extraction.schema),
    }
}

/// Write `text` to `path`, or to stdout when no path is given.
pub fn write_output(text: &str, path: Option<&Path>) -> std::io::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let mut contents = text.to_string();
            if !contents.ends_with('\n') {
                contents.push('\n');
            }
            std::fs::write(path, contents)
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

/// Short human-readable report of an extraction.
pub fn summarize(extraction: &Extraction) -> String {
    let schema = &extraction.schema;
    let invalid = schema.invalid_records().count();

    let mut out = String::new();
    out.push_str("--- Extraction Summary ---\n");
    out.push_str(&format!("  Roots: {}\n", schema.roots().join(", ")));
    out.push_str(&format!(
        "  Records: {} ({} complete, {} invalid)\n",
        schema.len(),
        schema.len() - invalid,
        invalid
    ));
    out.push_str(&format!("  Diagnostics: {}\n", extraction.diagnostics.len()));
    for diagnostic in &extraction.diagnostics {
        out.push_str(&format!("    [{}] {}\n", diagnostic.kind(), diagnostic));
    }
    out
}

/// One line per field, for `lookup`.
pub fn describe_record(record: &RecordSchema) -> String {
    let mut out = record.type_name.clone();
    if let RecordStatus::Invalid { reason } = &record.status {
        out.push_str(&format!(" (invalid: {})", reason));
    }
    out.push('\n');

    if record.fields.is_empty() {
        out.push_str("  (no fields)\n");
    }
    for field in &record.fields {
        out.push_str(&format!(
            "  {}: {}{}\n",
            field.name,
            field.kind,
            if field.optional { " (optional)" } else { "" }
        ));
    }
    out
}
