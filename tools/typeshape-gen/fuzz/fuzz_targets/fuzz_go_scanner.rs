// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for the Go scanner and the extraction pass
//!
//! Arbitrary UTF-8 is scanned as Go source, then every struct found is used
//! as a root:
//! - `GoSource::parse` must not panic on unbalanced or garbled input
//! - `extract_schemas` must terminate and keep the schema set consistent

#![no_main]

use libfuzzer_sys::fuzz_target;
use typeshape::extract_schemas;
use typeshape_gen::GoSource;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Duplicate declarations are a normal error
    let Ok(source) = GoSource::parse(input) else {
        return;
    };

    let extraction = extract_schemas(&source, source.struct_names());

    // Every root has a schema and no reference dangles
    assert!(extraction.schema.check_invariants().is_ok());
});
