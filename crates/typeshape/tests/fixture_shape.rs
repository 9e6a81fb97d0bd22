// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::sync::Arc;
use std::thread;

use typeshape::{
    extract_schema, ExtractError, FieldKind, PrimitiveKind, SchemaSet, TypeExpr, TypeGraph,
};

/// `SS`, `Profile` and `Address` as declared in the sample Go fixture.
fn fixture() -> TypeGraph {
    let mut graph = TypeGraph::new();
    graph
        .record("SS")
        .field("Name", TypeExpr::Str)
        .field("Age", TypeExpr::int())
        .field("CreatedAt", TypeExpr::Str)
        .field("IsActive", TypeExpr::Bool)
        .field("Email", TypeExpr::Str)
        .field("Tags", TypeExpr::seq(TypeExpr::Str))
        .record_field("Profile", "Profile")
        .field("Addresses", TypeExpr::seq(TypeExpr::named("Address")))
        .field("Metadata", TypeExpr::map(TypeExpr::Str, TypeExpr::Str))
        .field("Attributes", TypeExpr::map(TypeExpr::Str, TypeExpr::Any))
        .finish();
    graph
        .record("Profile")
        .field("Score", TypeExpr::float())
        .field("Timezone", TypeExpr::Str)
        .field("Notifications", TypeExpr::Bool)
        .finish();
    graph
        .record("Address")
        .field("Type", TypeExpr::Str)
        .field("City", TypeExpr::Str)
        .field("Zip", TypeExpr::Str)
        .finish();
    graph
}

#[test]
fn classifies_every_fixture_field_in_order() {
    let extraction = extract_schema(&fixture(), "SS");
    assert!(extraction.is_clean(), "{:?}", extraction.diagnostics);

    let ss = extraction.schema.lookup("SS").unwrap();
    let kinds: Vec<FieldKind> = ss.fields.iter().map(|f| f.kind.clone()).collect();
    let string = || FieldKind::Primitive(PrimitiveKind::String);

    assert_eq!(
        kinds,
        vec![
            string(),
            FieldKind::Primitive(PrimitiveKind::Integer),
            string(),
            FieldKind::Boolean,
            string(),
            FieldKind::sequence_of(string()),
            FieldKind::record("Profile"),
            FieldKind::sequence_of(FieldKind::record("Address")),
            FieldKind::string_mapping(string()),
            FieldKind::Dynamic,
        ]
    );
    assert_eq!(
        ss.field_names(),
        vec![
            "Name",
            "Age",
            "CreatedAt",
            "IsActive",
            "Email",
            "Tags",
            "Profile",
            "Addresses",
            "Metadata",
            "Attributes"
        ]
    );
}

#[test]
fn nested_records_are_extracted() {
    let extraction = extract_schema(&fixture(), "SS");
    let schema = &extraction.schema;

    assert_eq!(schema.type_names(), vec!["Address", "Profile", "SS"]);
    let profile = schema.lookup("Profile").unwrap();
    assert_eq!(
        profile.field("Score").unwrap().kind,
        FieldKind::Primitive(PrimitiveKind::Float)
    );
    assert_eq!(schema.lookup("Address").unwrap().fields.len(), 3);
}

#[test]
fn every_record_reference_resolves() {
    let extraction = extract_schema(&fixture(), "SS");
    let schema = &extraction.schema;

    for record in schema.records() {
        for field in &record.fields {
            if let Some(target) = field.kind.record_ref() {
                assert!(
                    schema.lookup(target).is_ok(),
                    "{}.{} -> {}",
                    record.type_name,
                    field.name,
                    target
                );
            }
        }
    }
    assert!(schema.check_invariants().is_ok());
}

#[test]
fn extraction_is_idempotent() {
    let graph = fixture();
    let first = extract_schema(&graph, "SS");
    let second = extract_schema(&graph, "SS");

    assert_eq!(first, second);
    assert_eq!(
        typeshape::codec::to_json(&first.schema).unwrap(),
        typeshape::codec::to_json(&second.schema).unwrap()
    );
}

#[test]
fn unsupported_field_in_fixture_shape() {
    let mut graph = fixture();
    graph
        .record("Audit")
        .record_field("Subject", "SS")
        .field("Signal", TypeExpr::opaque("chan bool"))
        .field("At", TypeExpr::Str)
        .finish();

    let extraction = extract_schema(&graph, "Audit");

    assert_eq!(extraction.diagnostics.len(), 1);
    assert!(matches!(
        &extraction.diagnostics[0],
        ExtractError::UnsupportedType { field, .. } if field == "Signal"
    ));
    let audit = extraction.schema.lookup("Audit").unwrap();
    assert_eq!(audit.fields.len(), 3);
    assert!(audit.fields[1].kind.is_dynamic());
    assert_eq!(extraction.schema.len(), 4);
}

#[test]
fn finished_schema_is_shared_across_threads() {
    let extraction = extract_schema(&fixture(), "SS");
    let schema: Arc<SchemaSet> = Arc::new(extraction.schema);

    let handles: Vec<_> = ["SS", "Profile", "Address"]
        .into_iter()
        .map(|name| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || schema.lookup(name).map(|r| r.fields.len()).ok())
        })
        .collect();

    let counts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![Some(10), Some(3), Some(3)]);
}

#[test]
fn independent_passes_run_concurrently() {
    let graph = Arc::new(fixture());
    let handles: Vec<_> = ["SS", "Profile"]
        .into_iter()
        .map(|root| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || extract_schema(graph.as_ref(), root).schema.len())
        })
        .collect();

    let sizes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(sizes, vec![3, 1]);
}
