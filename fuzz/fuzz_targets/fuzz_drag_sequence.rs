#![no_main]

use arbitrary::Arbitrary;
use bee_core::{ContextEntry, Expression, TableColumn};
use bee_layout::{ColumnRef, ResizeTarget, ResizerStopBehavior, ResizingEngine};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Begin { target: u8, x: i32 },
    Move { x: i32 },
    Stop { always: bool },
    Reset,
}

fn tree() -> Expression {
    Expression::context(
        "ctx",
        vec![
            ContextEntry::new("a", Expression::literal("lit")),
            ContextEntry::new(
                "b",
                Expression::list(
                    "list",
                    vec![Expression::relation(
                        "rel",
                        vec![TableColumn::new("x"), TableColumn::with_width("y", 240)],
                    )],
                ),
            ),
        ],
    )
}

fuzz_target!(|ops: Vec<Op>| {
    // Arbitrary drag sequences must never panic and must always settle.
    let Ok(mut engine) = ResizingEngine::new(tree()) else {
        return;
    };
    if engine.settle().is_err() {
        return;
    }
    let targets = [
        ResizeTarget::Expression("lit".into()),
        ResizeTarget::Column(ColumnRef::new("ctx", 0)),
        ResizeTarget::Column(ColumnRef::new("rel", 0)),
        ResizeTarget::Column(ColumnRef::new("rel", 1)),
    ];
    for op in ops.into_iter().take(64) {
        let result = match op {
            Op::Begin { target, x } => {
                let target = targets[usize::from(target) % targets.len()].clone();
                engine.begin_drag(target, x).map(|_| ())
            }
            Op::Move { x } => engine.drag_to(x).map(|_| ()),
            Op::Stop { always } => {
                let behavior = if always {
                    ResizerStopBehavior::SetWidthAlways
                } else {
                    ResizerStopBehavior::SetWidthWhenSmaller
                };
                engine.stop_drag(behavior).map(|_| ())
            }
            Op::Reset => engine.reset_drag().map(|_| ()),
        };
        let _ = result;
    }
    let _ = engine.reset_drag();
    assert_eq!(engine.resizing_widths().pivoting_keys().count(), 0);
});
