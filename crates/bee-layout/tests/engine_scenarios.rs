//! End-to-end resizing scenarios on JSON expression fixtures.
//!
//! Run with: `cargo test -p bee-layout --test engine_scenarios`

use bee_core::{Expression, ExpressionId, ExpressionKind};
use bee_layout::{
    ColumnRef, DragEffect, ResizeError, ResizeTarget, ResizerStopBehavior, ResizingEngine,
    ResizingWidth,
};
use serde_json::json;

fn id(s: &str) -> ExpressionId {
    ExpressionId::new(s)
}

fn fixture(value: serde_json::Value) -> Expression {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn settled_engine(value: serde_json::Value) -> ResizingEngine {
    let mut engine = ResizingEngine::new(fixture(value)).expect("fixture should index");
    engine.settle().expect("fixture should settle");
    engine
}

/// ctx -> [list -> [l1, l2], rel(x, y)]
fn list_beside_relation() -> serde_json::Value {
    json!({
        "id": "ctx",
        "logicType": "context",
        "entries": [
            {
                "name": "a",
                "expression": {
                    "id": "list",
                    "logicType": "list",
                    "items": [
                        { "id": "l1", "logicType": "literal" },
                        { "id": "l2", "logicType": "literal" }
                    ]
                }
            },
            {
                "name": "b",
                "expression": {
                    "id": "rel",
                    "logicType": "relation",
                    "columns": [{ "name": "x" }, { "name": "y" }]
                }
            }
        ]
    })
}

/// One expression of every logic type under a context.
fn every_logic_type() -> serde_json::Value {
    json!({
        "id": "root",
        "logicType": "context",
        "entries": [
            { "name": "dt", "expression": {
                "id": "dt", "logicType": "decisionTable",
                "input": [{ "name": "age" }],
                "output": [{ "name": "risk", "width": 180 }],
                "annotations": [{ "name": "notes" }]
            }},
            { "name": "inv", "expression": {
                "id": "inv", "logicType": "invocation", "invokedFunction": "f",
                "bindings": [{ "name": "p", "expression": { "id": "inv-p", "logicType": "literal" } }]
            }},
            { "name": "fn", "expression": {
                "id": "fn", "logicType": "function", "parameters": ["x"],
                "body": { "id": "fn-body", "logicType": "literal", "width": 260 }
            }},
            { "name": "java", "expression": {
                "id": "java", "logicType": "function", "functionKind": "java"
            }},
            { "name": "for", "expression": {
                "id": "for", "logicType": "for", "variable": "i",
                "in": { "id": "for-in", "logicType": "literal" },
                "return": { "id": "for-ret", "logicType": "literal" }
            }},
            { "name": "every", "expression": {
                "id": "every", "logicType": "every", "variable": "i",
                "in": { "id": "every-in", "logicType": "literal" },
                "satisfies": { "id": "every-sat", "logicType": "literal" }
            }},
            { "name": "if", "expression": {
                "id": "if", "logicType": "conditional",
                "if": { "id": "if-c", "logicType": "literal" },
                "then": { "id": "if-t", "logicType": "literal" },
                "else": { "id": "if-e", "logicType": "undefined" }
            }},
            { "name": "filter", "expression": {
                "id": "filter", "logicType": "filter",
                "in": { "id": "filter-in", "logicType": "list", "items": [] },
                "match": { "id": "filter-match", "logicType": "literal" }
            }}
        ],
        "result": { "id": "root-result", "logicType": "literal" }
    })
}

fn assert_containers_ordered(engine: &ResizingEngine) {
    for id in engine.ids() {
        if let Some(container) = engine.container(id) {
            assert!(
                container.is_ordered(),
                "container of '{id}' out of order: {container}"
            );
        }
    }
}

fn assert_nothing_pivoting(engine: &ResizingEngine) {
    assert_eq!(engine.resizing_widths().pivoting_keys().count(), 0);
    assert_eq!(engine.column_resizing_widths().pivoting_keys().count(), 0);
}

#[test]
fn every_logic_type_settles_in_order() {
    let engine = settled_engine(every_logic_type());
    assert_eq!(engine.node_count(), 21);
    assert_containers_ordered(&engine);
    assert_nothing_pivoting(&engine);

    // Every table and container reports a width.
    for table in ["root", "dt", "inv", "fn", "java", "for", "every", "if", "filter", "filter-in"] {
        assert!(
            engine.resizing_widths().get(&id(table)).is_some(),
            "no width for '{table}'"
        );
    }
    // Literals and undefined cells are only written by drags.
    assert!(engine.resizing_widths().get(&id("if-e")).is_none());
    assert!(engine.resizing_widths().get(&id("fn-body")).is_none());
}

#[test]
fn nested_decision_table_fills_its_container() {
    let engine = settled_engine(every_logic_type());
    let nested = engine
        .inbound_container(&id("dt"))
        .expect("dt was visited")
        .resizing_width
        .value;
    assert_eq!(
        engine.resizing_widths().get(&id("dt")),
        Some(ResizingWidth::settled(nested))
    );
    let columns: u32 = (0..3)
        .map(|i| {
            engine
                .column_resizing_width(&ColumnRef::new("dt", i))
                .unwrap()
                .value
        })
        .sum();
    assert_eq!(columns + 60 + 3 + 1, nested);
}

#[test]
fn drag_pivots_exactly_the_path_to_the_root() {
    let mut engine = settled_engine(list_beside_relation());
    assert_eq!(
        engine.resizing_widths().get(&id("ctx")),
        Some(ResizingWidth::settled(485))
    );
    assert_eq!(
        engine.inbound_container(&id("l1")).map(|c| c.resizing_width.value),
        Some(301)
    );

    let started = engine
        .begin_drag(ResizeTarget::Expression(id("l1")), 500)
        .unwrap();
    assert!(matches!(started.effect, DragEffect::Started { width: 301, .. }));
    engine.drag_to(550).unwrap();

    let widths = engine.resizing_widths();
    assert_eq!(widths.get(&id("l1")), Some(ResizingWidth::pivoting(351)));
    assert_eq!(widths.get(&id("list")), Some(ResizingWidth::pivoting(413)));
    assert_eq!(widths.get(&id("ctx")), Some(ResizingWidth::pivoting(535)));
    assert_eq!(widths.get(&id("l2")), None);
    assert_eq!(widths.get(&id("rel")), Some(ResizingWidth::settled(413)));
    assert_eq!(
        engine.column_resizing_width(&ColumnRef::new("rel", 0)).unwrap(),
        ResizingWidth::settled(175)
    );
    assert_eq!(
        engine.inbound_container(&id("l2")).map(|c| c.resizing_width),
        Some(ResizingWidth::pivoting(351))
    );

    engine.stop_drag(ResizerStopBehavior::SetWidthAlways).unwrap();
    assert_nothing_pivoting(&engine);
    assert_containers_ordered(&engine);
    assert_eq!(
        engine.resizing_widths().get(&id("ctx")),
        Some(ResizingWidth::settled(535))
    );
    let l1 = engine.expression().find(&id("l1")).unwrap();
    assert!(matches!(&l1.kind, ExpressionKind::Literal(l) if l.width == Some(349)));
}

#[test]
fn reset_restores_every_container() {
    let mut engine = settled_engine(list_beside_relation());
    let before: Vec<_> = engine.ids().map(|i| engine.container(i)).collect();

    engine
        .begin_drag(ResizeTarget::Expression(id("l2")), 0)
        .unwrap();
    engine.drag_to(240).unwrap();
    assert!(engine.resizing_widths().is_pivoting(&id("ctx")));
    engine.reset_drag().unwrap();

    let after: Vec<_> = engine.ids().map(|i| engine.container(i)).collect();
    assert_eq!(before, after);
    assert_nothing_pivoting(&engine);
    assert_eq!(engine.expression(), &fixture(list_beside_relation()));
}

#[test]
fn set_width_when_smaller_only_persists_shrinks() {
    let mut engine = settled_engine(json!({
        "id": "rel",
        "logicType": "relation",
        "columns": [{ "name": "x" }, { "name": "y" }]
    }));
    let x = ColumnRef::new("rel", 0);
    let target = ResizeTarget::Column(x.clone());

    engine.begin_drag(target.clone(), 0).unwrap();
    engine.drag_to(50).unwrap();
    assert_eq!(
        engine.resizing_widths().get(&id("rel")),
        Some(ResizingWidth::pivoting(200 + 150 + 63))
    );
    let grown = engine
        .stop_drag(ResizerStopBehavior::SetWidthWhenSmaller)
        .unwrap();
    assert!(matches!(grown.effect, DragEffect::Committed { persisted: None, .. }));
    assert_eq!(engine.column_resizing_width(&x).unwrap(), ResizingWidth::settled(150));
    assert_eq!(
        engine.resizing_widths().get(&id("rel")),
        Some(ResizingWidth::settled(363))
    );

    engine.begin_drag(target, 0).unwrap();
    engine.drag_to(-30).unwrap();
    engine
        .stop_drag(ResizerStopBehavior::SetWidthWhenSmaller)
        .unwrap();
    let ExpressionKind::Relation(relation) = &engine.expression().kind else {
        panic!("root should stay a relation");
    };
    assert_eq!(relation.columns[0].width, Some(120));
    assert_eq!(
        engine.resizing_widths().get(&id("rel")),
        Some(ResizingWidth::settled(120 + 150 + 63))
    );
}

#[test]
fn column_drag_never_goes_below_minimum() {
    let mut engine = settled_engine(every_logic_type());
    let values = ColumnRef::new("java", 1);
    engine
        .begin_drag(ResizeTarget::Column(values.clone()), 0)
        .unwrap();
    engine.drag_to(-10_000).unwrap();
    assert_eq!(
        engine.column_resizing_width(&values).unwrap(),
        ResizingWidth::pivoting(120)
    );
    engine.stop_drag(ResizerStopBehavior::SetWidthAlways).unwrap();
    assert_nothing_pivoting(&engine);
}

#[test]
fn fixed_columns_have_no_handle() {
    let mut engine = settled_engine(list_beside_relation());
    let target = ResizeTarget::Column(ColumnRef::new("list", 0));
    assert_eq!(
        engine.begin_drag(target.clone(), 0).unwrap_err(),
        ResizeError::NotResizable(target)
    );
}

#[test]
fn unknown_logic_type_is_reported() {
    let root = fixture(json!({
        "id": "list",
        "logicType": "list",
        "items": [{ "id": "weird", "logicType": "pivotTable" }]
    }));
    let mut engine = ResizingEngine::new(root).unwrap();
    let err = engine.settle().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unreachable logic type 'pivotTable' on expression 'weird'"
    );
}

#[test]
fn oversized_columns_pin_the_table_width() {
    let engine = settled_engine(json!({
        "id": "rel",
        "logicType": "relation",
        "columns": [
            { "name": "x", "width": 3_000_000_000u32 },
            { "name": "y", "width": 3_000_000_000u32 }
        ]
    }));
    assert_eq!(
        engine.resizing_widths().get(&id("rel")),
        Some(ResizingWidth::settled(u32::MAX))
    );
}

#[test]
fn full_range_drag_beside_a_huge_entry_column() {
    let mut engine = settled_engine(json!({
        "id": "ctx",
        "logicType": "context",
        "entryInfoWidth": 3_000_000_000u32,
        "entries": [{ "name": "a", "expression": { "id": "lit", "logicType": "literal" } }]
    }));
    engine
        .begin_drag(ResizeTarget::Expression(id("lit")), i32::MIN)
        .unwrap();
    engine.drag_to(i32::MAX).unwrap();
    assert_eq!(
        engine.resizing_widths().get(&id("lit")),
        Some(ResizingWidth::pivoting(u32::MAX))
    );
    assert_eq!(engine.resizing_widths().get(&id("ctx")).unwrap().value, u32::MAX);

    engine.stop_drag(ResizerStopBehavior::SetWidthAlways).unwrap();
    assert_nothing_pivoting(&engine);
}

#[test]
fn duplicate_ids_are_rejected() {
    let root = fixture(json!({
        "id": "ctx",
        "logicType": "context",
        "entries": [
            { "name": "a", "expression": { "id": "twin", "logicType": "literal" } },
            { "name": "b", "expression": { "id": "twin", "logicType": "undefined" } }
        ]
    }));
    assert_eq!(
        ResizingEngine::new(root).unwrap_err(),
        ResizeError::DuplicateExpressionId(id("twin"))
    );
}
