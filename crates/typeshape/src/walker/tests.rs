// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;
use crate::diagnostics::DiagnosticKind;
use crate::model::{FieldKind, PrimitiveKind, RecordStatus};
use crate::provider::{FieldDecl, ProviderError, TypeExpr, TypeGraph};
use std::cell::RefCell;
use std::collections::HashMap;

/// Provider that counts how often each record is asked for.
struct CountingProvider {
    inner: TypeGraph,
    calls: RefCell<HashMap<String, usize>>,
}

impl TypeProvider for CountingProvider {
    fn record_fields(&self, name: &str) -> Result<Vec<FieldDecl>, ProviderError> {
        *self.calls.borrow_mut().entry(name.to_string()).or_default() += 1;
        self.inner.record_fields(name)
    }
}

#[test]
fn self_reference_walks_once() {
    let mut graph = TypeGraph::new();
    graph
        .record("Node")
        .field("value", TypeExpr::int())
        .optional_field("next", TypeExpr::named("Node"))
        .field("children", TypeExpr::seq(TypeExpr::named("Node")))
        .finish();

    let provider = CountingProvider {
        inner: graph,
        calls: RefCell::new(HashMap::new()),
    };
    let extraction = extract_schema(&provider, "Node");

    assert!(extraction.is_clean());
    assert_eq!(extraction.schema.len(), 1);
    assert_eq!(provider.calls.borrow()["Node"], 1);

    let node = extraction.schema.lookup("Node").unwrap();
    assert_eq!(node.fields[1].kind, FieldKind::record("Node"));
    assert!(node.fields[1].optional);
}

#[test]
fn mutual_reference_terminates() {
    let mut graph = TypeGraph::new();
    graph.record("A").record_field("b", "B").finish();
    graph
        .record("B")
        .field("back", TypeExpr::map(TypeExpr::Str, TypeExpr::named("A")))
        .finish();

    let extraction = extract_schema(&graph, "A");

    assert!(extraction.is_clean());
    assert_eq!(extraction.schema.type_names(), vec!["A", "B"]);
    assert!(extraction.schema.unresolved_references().is_empty());
}

#[test]
fn shared_record_is_walked_once() {
    let mut graph = TypeGraph::new();
    graph
        .record("Route")
        .record_field("from", "Stop")
        .record_field("to", "Stop")
        .field("via", TypeExpr::seq(TypeExpr::named("Stop")))
        .finish();
    graph.record("Stop").field("code", TypeExpr::Str).finish();

    let provider = CountingProvider {
        inner: graph,
        calls: RefCell::new(HashMap::new()),
    };
    let extraction = extract_schema(&provider, "Route");

    assert_eq!(extraction.schema.len(), 2);
    assert_eq!(provider.calls.borrow()["Stop"], 1);
}

#[test]
fn empty_record_is_valid() {
    let mut graph = TypeGraph::new();
    graph.record("Marker").finish();

    let extraction = extract_schema(&graph, "Marker");

    assert!(extraction.is_clean());
    let marker = extraction.schema.lookup("Marker").unwrap();
    assert!(marker.fields.is_empty());
    assert!(marker.is_complete());
}

#[test]
fn unsupported_field_degrades_and_siblings_continue() {
    let mut graph = TypeGraph::new();
    graph
        .record("Sensor")
        .field("id", TypeExpr::uint(32))
        .field("feed", TypeExpr::opaque("chan float64"))
        .field("label", TypeExpr::Str)
        .finish();

    let extraction = extract_schema(&graph, "Sensor");

    assert_eq!(
        extraction.diagnostics,
        vec![ExtractError::UnsupportedType {
            record: "Sensor".into(),
            field: "feed".into(),
            type_desc: "chan float64".into(),
        }]
    );
    let sensor = extraction.schema.lookup("Sensor").unwrap();
    assert!(sensor.is_complete());
    assert_eq!(sensor.field_names(), vec!["id", "feed", "label"]);
    assert_eq!(sensor.fields[1].kind, FieldKind::Dynamic);
    assert_eq!(
        sensor.fields[2].kind,
        FieldKind::Primitive(PrimitiveKind::String)
    );
}

#[test]
fn unknown_record_is_kept_as_invalid() {
    let mut graph = TypeGraph::new();
    graph
        .record("Order")
        .field("id", TypeExpr::int())
        .record_field("customer", "Customer")
        .finish();

    let extraction = extract_schema(&graph, "Order");

    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(
        extraction.diagnostics[0].kind(),
        DiagnosticKind::MalformedDescription
    );
    assert!(extraction.schema.lookup("Order").unwrap().is_complete());

    let customer = extraction.schema.lookup("Customer").unwrap();
    assert!(matches!(customer.status, RecordStatus::Invalid { .. }));
    assert!(extraction.schema.unresolved_references().is_empty());
}

#[test]
fn malformed_field_aborts_only_its_record() {
    let mut graph = TypeGraph::new();
    graph
        .record("Root")
        .record_field("good", "Good")
        .record_field("bad", "Bad")
        .finish();
    graph.record("Good").field("ok", TypeExpr::Bool).finish();
    graph
        .record("Bad")
        .field("first", TypeExpr::Str)
        .field("broken", TypeExpr::Sequence(None))
        .field("never", TypeExpr::Str)
        .finish();

    let extraction = extract_schema(&graph, "Root");

    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(extraction.diagnostics[0].record(), "Bad");

    let bad = extraction.schema.lookup("Bad").unwrap();
    assert_eq!(bad.field_names(), vec!["first"]);
    match &bad.status {
        RecordStatus::Invalid { reason } => assert!(reason.contains("broken")),
        RecordStatus::Complete => panic!("Bad should be invalid"),
    }
    assert!(extraction.schema.lookup("Good").unwrap().is_complete());
    assert!(extraction.schema.lookup("Root").unwrap().is_complete());
}

#[test]
fn duplicate_and_empty_field_names_are_malformed() {
    let mut graph = TypeGraph::new();
    graph
        .record("Twice")
        .field("x", TypeExpr::int())
        .field("x", TypeExpr::Str)
        .finish();
    graph.record("Blank").field("", TypeExpr::Bool).finish();

    let extraction = extract_schemas(&graph, ["Twice", "Blank"]);

    let records: Vec<_> = extraction.diagnostics.iter().map(|d| d.record()).collect();
    assert_eq!(records, vec!["Twice", "Blank"]);
    assert_eq!(
        extraction.schema.lookup("Twice").unwrap().field_names(),
        vec!["x"]
    );
    assert!(extraction.schema.lookup("Blank").unwrap().fields.is_empty());
}

#[test]
fn several_roots_share_one_pass() {
    let mut graph = TypeGraph::new();
    graph.record("Left").record_field("shared", "Shared").finish();
    graph.record("Right").record_field("shared", "Shared").finish();
    graph.record("Shared").field("n", TypeExpr::int()).finish();

    let extraction = extract_schemas(&graph, ["Left", "Right"]);

    assert_eq!(extraction.schema.roots(), ["Left".to_string(), "Right".to_string()]);
    assert_eq!(extraction.schema.type_names(), vec!["Left", "Right", "Shared"]);
}

#[test]
fn repeated_roots_are_listed_once() {
    let mut graph = TypeGraph::new();
    graph.record("A").field("n", TypeExpr::int()).finish();
    graph.record("B").record_field("a", "A").finish();

    let extraction = extract_schemas(&graph, ["A", "B", "A", "B"]);

    assert_eq!(extraction.schema.roots(), ["A".to_string(), "B".to_string()]);
    assert!(extraction.is_clean());
    assert!(extraction.schema.check_invariants().is_ok());
}

#[test]
fn deep_chain_does_not_recurse_on_the_stack() {
    let mut graph = TypeGraph::new();
    let depth = 20_000;
    for i in 0..depth {
        graph
            .record(format!("Link{i}"))
            .record_field("next", format!("Link{}", i + 1))
            .finish();
    }
    graph.record(format!("Link{depth}")).finish();

    let extraction = extract_schema(&graph, "Link0");

    assert!(extraction.is_clean());
    assert_eq!(extraction.schema.len(), depth + 1);
}
