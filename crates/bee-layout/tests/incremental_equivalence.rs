//! Cached passes must produce exactly what full recomputation produces.
//!
//! Random expression trees are driven through the same drag sequences by a
//! cached engine and a `force_full` engine; every registry entry, column
//! width, container and persisted width must agree after every step.
//!
//! Run with: `cargo test -p bee-layout --test incremental_equivalence`

use std::collections::BTreeMap;

use bee_core::{
    ConditionalExpression, ContextEntry, Expression, ExpressionKind, LiteralExpression,
    TableColumn,
};
use bee_layout::{
    ColumnRef, NestedExpressionContainer, ResizeTarget, ResizerStopBehavior, ResizingConfig,
    ResizingEngine, ResizingWidth,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 11
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        min + (self.next_u64() % u64::from(max - min + 1)) as u32
    }

    fn choose_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }

    fn choose_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 0
    }
}

struct TreeGen {
    rng: Lcg,
    next_id: usize,
}

impl TreeGen {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn declared(&mut self, min: u32) -> Option<u32> {
        self.rng.choose_bool().then(|| self.rng.range(min, min + 200))
    }

    fn expression(&mut self, depth: usize) -> Expression {
        let kinds = if depth == 0 { 3 } else { 7 };
        match self.rng.choose_index(kinds) {
            0 => {
                let width = self.declared(100);
                let id = self.id("lit");
                Expression::new(
                    id,
                    ExpressionKind::Literal(LiteralExpression {
                        width,
                        text: String::new(),
                    }),
                )
            }
            1 => Expression::undefined(self.id("undef")),
            2 => {
                let columns = (0..self.rng.range(1, 4))
                    .map(|i| TableColumn {
                        name: format!("c{i}"),
                        width: self.declared(100),
                    })
                    .collect();
                Expression::relation(self.id("rel"), columns)
            }
            3 | 4 => {
                let id = self.id("ctx");
                let entries = (0..self.rng.range(1, 3))
                    .map(|i| ContextEntry::new(format!("e{i}"), self.expression(depth - 1)))
                    .collect();
                let mut ctx = Expression::context(id, entries);
                if let ExpressionKind::Context(c) = &mut ctx.kind {
                    c.entry_info_width = self.declared(120);
                }
                ctx
            }
            5 => {
                let id = self.id("list");
                let items = (0..self.rng.range(0, 3))
                    .map(|_| self.expression(depth - 1))
                    .collect();
                Expression::list(id, items)
            }
            _ => {
                let id = self.id("if");
                Expression::new(
                    id,
                    ExpressionKind::Conditional(ConditionalExpression {
                        condition: Box::new(self.expression(depth - 1)),
                        then_branch: Box::new(self.expression(depth - 1)),
                        else_branch: Box::new(self.expression(depth - 1)),
                    }),
                )
            }
        }
    }

    /// A random tree whose root is always a container.
    fn tree(seed: u64) -> Expression {
        let mut generator = Self {
            rng: Lcg::new(seed),
            next_id: 0,
        };
        let entries = (0..generator.rng.range(1, 3))
            .map(|i| ContextEntry::new(format!("r{i}"), generator.expression(3)))
            .collect();
        let id = generator.id("root");
        Expression::context(id, entries)
    }
}

fn drag_targets(root: &Expression) -> Vec<ResizeTarget> {
    let mut targets = Vec::new();
    for expr in root.walk() {
        match &expr.kind {
            ExpressionKind::Literal(_) => targets.push(ResizeTarget::Expression(expr.id.clone())),
            ExpressionKind::Context(_) => {
                targets.push(ResizeTarget::Column(ColumnRef::new(expr.id.clone(), 0)));
            }
            ExpressionKind::Relation(relation) => {
                for index in 0..relation.columns.len() {
                    targets.push(ResizeTarget::Column(ColumnRef::new(expr.id.clone(), index)));
                }
            }
            _ => {}
        }
    }
    targets
}

#[derive(Debug, PartialEq)]
struct Snapshot {
    widths: BTreeMap<String, ResizingWidth>,
    columns: BTreeMap<String, ResizingWidth>,
    containers: Vec<Option<NestedExpressionContainer>>,
    expression: Expression,
}

fn snapshot(engine: &ResizingEngine) -> Snapshot {
    Snapshot {
        widths: engine
            .resizing_widths()
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
        columns: engine
            .column_resizing_widths()
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
        containers: engine.ids().map(|id| engine.container(id)).collect(),
        expression: engine.expression().clone(),
    }
}

fn engines(root: Expression) -> (ResizingEngine, ResizingEngine) {
    let cached = ResizingEngine::new(root.clone()).unwrap();
    let full = ResizingEngine::with_config(
        root,
        ResizingConfig {
            force_full: true,
            ..ResizingConfig::default()
        },
    )
    .unwrap();
    (cached, full)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn cached_passes_match_full_recomputation(seed in any::<u64>()) {
        let root = TreeGen::tree(seed);
        let targets = drag_targets(&root);
        let (mut cached, mut full) = engines(root);
        cached.settle().unwrap();
        full.settle().unwrap();
        prop_assert_eq!(snapshot(&cached), snapshot(&full));

        let mut rng = Lcg::new(seed.rotate_left(17));
        for _ in 0..4 {
            if targets.is_empty() {
                break;
            }
            let target = targets[rng.choose_index(targets.len())].clone();
            cached.begin_drag(target.clone(), 0).unwrap();
            full.begin_drag(target, 0).unwrap();
            prop_assert_eq!(snapshot(&cached), snapshot(&full));

            for _ in 0..rng.range(1, 3) {
                let x = rng.range(0, 600) as i32 - 300;
                cached.drag_to(x).unwrap();
                full.drag_to(x).unwrap();
                prop_assert_eq!(snapshot(&cached), snapshot(&full));
            }

            match rng.choose_index(3) {
                0 => {
                    cached.reset_drag().unwrap();
                    full.reset_drag().unwrap();
                }
                1 => {
                    cached.stop_drag(ResizerStopBehavior::SetWidthWhenSmaller).unwrap();
                    full.stop_drag(ResizerStopBehavior::SetWidthWhenSmaller).unwrap();
                }
                _ => {
                    cached.stop_drag(ResizerStopBehavior::SetWidthAlways).unwrap();
                    full.stop_drag(ResizerStopBehavior::SetWidthAlways).unwrap();
                }
            }
            prop_assert_eq!(snapshot(&cached), snapshot(&full));
            prop_assert_eq!(cached.resizing_widths().pivoting_keys().count(), 0);
        }
    }

    #[test]
    fn settled_tree_is_served_from_cache(seed in any::<u64>()) {
        let (mut cached, mut full) = engines(TreeGen::tree(seed));
        cached.settle().unwrap();
        full.settle().unwrap();

        let hit = cached.pass().unwrap();
        prop_assert_eq!(hit.recomputed, 0);
        prop_assert_eq!(hit.cached, hit.total);

        let miss = full.pass().unwrap();
        prop_assert_eq!(miss.recomputed, miss.total);
        prop_assert_eq!(miss.committed(), 0);
        prop_assert_eq!(hit.total, cached.node_count());
    }
}

#[test]
fn single_declared_edit_recomputes_only_its_path() {
    let wide = Expression::new(
        "a",
        ExpressionKind::Literal(LiteralExpression {
            width: Some(300),
            text: String::new(),
        }),
    );
    let root = Expression::context(
        "root",
        vec![
            ContextEntry::new("a", wide),
            ContextEntry::new(
                "b",
                Expression::list("b", vec![Expression::literal("b1"), Expression::literal("b2")]),
            ),
        ],
    );
    let mut engine = ResizingEngine::new(root).unwrap();
    engine.settle().unwrap();
    assert_eq!(engine.pass().unwrap().recomputed, 0);

    // `a` stays the widest entry, so no container changes and only the
    // path from `b1` to the root is recomputed.
    engine
        .set_declared_width(&ResizeTarget::Expression("b1".into()), 101)
        .unwrap();
    let stats = engine.pass().unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.recomputed, 3, "{stats:?}");
    assert_eq!(stats.cached, 2);
    assert_eq!(stats.committed(), 0);
}
