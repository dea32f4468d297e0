//! Incremental resizing engine.
//!
//! [`ResizingEngine`] owns an expression tree and keeps every nested table
//! consistently sized. It combines:
//!
//! - a [`DepGraph`] with one node per expression and its parent, for
//!   dirty tracking;
//! - the [`ResizingWidths`] registry and the [`ColumnResizingWidths`] store;
//! - a per-node cache of the last computation;
//! - a [`ResizeDragMachine`] for the active drag, if any.
//!
//! # Passes
//!
//! A pass walks the tree top-down in DFS pre-order. Each node receives the
//! container its parent handed down and computes, from the registry as
//! committed by the previous pass, the container for its own children and
//! the widths it reports. Writes are staged and committed only after the
//! walk (compute-then-commit), so no level ever reads a value written in
//! the same pass.
//!
//! A node is served from cache when it is clean and receives the same
//! container as last time. Committing a changed registry entry dirties the
//! owner's parent, a changed column dirties the owning table, and a
//! declared width dirties its expression; dirtiness then spreads to every
//! ancestor.
//!
//! [`settle`](ResizingEngine::settle) runs passes until one commits
//! nothing. Bottom-up effects travel one level per pass, so a tree of depth
//! `d` settles in about `d + 1` passes.
//!
//! # Force-Full Fallback
//!
//! With `force_full` (or `BEE_FULL_RESIZE=1`) every node is recomputed on
//! every pass. Results are identical; only the work differs.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bee_core::{Expression, ExpressionId, ExpressionKind, debug, debug_span, trace, warn};
use rustc_hash::{FxHashMap, FxHasher};

use crate::apportion::{ApportionColumn, try_apportion_column_widths};
use crate::config::ResizingConfig;
use crate::container::NestedExpressionContainer;
use crate::debug::{ResizeDebugger, ResizeRecord};
use crate::dep_graph::{DepGraph, InputKind, NodeId};
use crate::drag::{
    DragEffect, DragState, DragTransition, ResizeDragMachine, ResizeTarget, ResizerStopBehavior,
};
use crate::error::ResizeError;
use crate::nested::{NestedExpressionInputs, nested_expression_container};
use crate::resizing_width::{ColumnRef, ColumnResizingWidths, ResizingWidth, ResizingWidths};
use crate::shape::{
    ColumnSpec, ExpressionShape, declared_column_width_mut, expression_shape, width_sum,
};
use crate::width_constants::{LITERAL_EXPRESSION_EXTRA_WIDTH, LITERAL_EXPRESSION_MIN_WIDTH};
use crate::width_maths::{expression_min_width, expression_resizing_width};

// ============================================================================
// PassStats
// ============================================================================

/// Statistics for a single resize pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    /// 1-based pass number since the engine was created.
    pub pass: usize,
    /// Nodes dirty when the pass started.
    pub dirty: usize,
    /// Nodes recomputed in this pass.
    pub recomputed: usize,
    /// Nodes served from cache.
    pub cached: usize,
    /// Nodes visited.
    pub total: usize,
    /// Registry entries whose value changed on commit.
    pub committed_widths: usize,
    /// Column store entries whose value changed on commit.
    pub committed_columns: usize,
    /// Cache size after the pass.
    pub cache_entries: usize,
}

impl PassStats {
    /// Cache hit rate as a fraction (0.0 – 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.cached as f64 / self.total as f64
        }
    }

    /// Total entries changed by this pass.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.committed_widths + self.committed_columns
    }
}

// ============================================================================
// Per-node state
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedNode {
    inbound: NestedExpressionContainer,
    outbound: Option<NestedExpressionContainer>,
    write: Option<ResizingWidth>,
    column_writes: Vec<(usize, ResizingWidth)>,
}

#[derive(Debug, Clone)]
struct NodeEntry {
    id: ExpressionId,
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut h = FxHasher::default();
    value.hash(&mut h);
    h.finish()
}

struct TreeIndex {
    index: FxHashMap<ExpressionId, NodeId>,
    nodes: Vec<NodeEntry>,
    graph: DepGraph,
}

impl TreeIndex {
    fn build(root: &Expression) -> Result<Self, ResizeError> {
        let count = root.node_count();
        let mut tree = Self {
            index: FxHashMap::with_capacity_and_hasher(count, Default::default()),
            nodes: Vec::with_capacity(count),
            graph: DepGraph::with_capacity(count),
        };
        tree.add(root, None)?;
        Ok(tree)
    }

    fn add(&mut self, expr: &Expression, parent: Option<NodeId>) -> Result<(), ResizeError> {
        let node = self.graph.add_node();
        if self.index.insert(expr.id.clone(), node).is_some() {
            return Err(ResizeError::DuplicateExpressionId(expr.id.clone()));
        }
        self.nodes.push(NodeEntry {
            id: expr.id.clone(),
        });
        if let Some(parent) = parent {
            self.graph.set_parent(node, parent);
        }
        // No cached result yet.
        self.graph.mark_dirty(node);
        for child in expr.nested() {
            self.add(child, Some(node))?;
        }
        Ok(())
    }
}

// ============================================================================
// Pass walk
// ============================================================================

/// Borrowed view of the engine for the compute phase of one pass.
struct PassWalk<'a> {
    index: &'a FxHashMap<ExpressionId, NodeId>,
    graph: &'a mut DepGraph,
    cache: &'a mut FxHashMap<NodeId, CachedNode>,
    widths: &'a ResizingWidths,
    columns: &'a ColumnResizingWidths,
    config: &'a ResizingConfig,
    debugger: &'a ResizeDebugger,
    staged_widths: Vec<(ExpressionId, ResizingWidth)>,
    staged_columns: Vec<(ColumnRef, ResizingWidth)>,
    stats: PassStats,
}

impl PassWalk<'_> {
    fn visit(
        &mut self,
        expr: &Expression,
        parent: Option<&ExpressionId>,
        inbound: NestedExpressionContainer,
    ) -> Result<(), ResizeError> {
        let node = *self
            .index
            .get(&expr.id)
            .ok_or_else(|| ResizeError::UnknownExpression(expr.id.clone()))?;
        self.stats.total += 1;

        let hit = if self.config.force_full || self.graph.is_dirty(node) {
            None
        } else {
            self.cache
                .get(&node)
                .filter(|cached| cached.inbound == inbound)
                .cloned()
        };
        let cache_hit = hit.is_some();

        let result = match hit {
            Some(cached) => {
                self.stats.cached += 1;
                cached
            }
            None => {
                let computed = self.compute(expr, parent.is_some(), inbound)?;
                trace!(
                    id = %expr.id,
                    logic_type = %expr.logic_type(),
                    inbound = %inbound,
                    "node recomputed"
                );
                if let Some(write) = computed.write {
                    self.staged_widths.push((expr.id.clone(), write));
                }
                for &(index, width) in &computed.column_writes {
                    self.staged_columns
                        .push((ColumnRef::new(expr.id.clone(), index), width));
                }
                self.cache.insert(node, computed.clone());
                self.graph.clean(node);
                self.stats.recomputed += 1;
                computed
            }
        };

        self.debugger.record(ResizeRecord {
            pass: self.stats.pass,
            id: expr.id.clone(),
            logic_type: expr.logic_type(),
            parent: parent.cloned(),
            inbound,
            outbound: result.outbound,
            write: result.write,
            column_writes: result.column_writes.clone(),
            cache_hit,
        });

        if let Some(outbound) = result.outbound {
            for child in expr.nested() {
                self.visit(child, Some(&expr.id), outbound)?;
            }
        }
        Ok(())
    }

    fn live_column(&self, expr: &Expression, index: usize, spec: &ColumnSpec) -> ResizingWidth {
        self.columns
            .get(&ColumnRef::new(expr.id.clone(), index))
            .unwrap_or(ResizingWidth::settled(spec.width()))
    }

    fn compute(
        &self,
        expr: &Expression,
        is_nested: bool,
        inbound: NestedExpressionContainer,
    ) -> Result<CachedNode, ResizeError> {
        let mut node = CachedNode {
            inbound,
            outbound: None,
            write: None,
            column_writes: Vec::new(),
        };

        match expression_shape(expr)? {
            // Leaves are only written by drags.
            ExpressionShape::Leaf { .. } => {}
            ExpressionShape::Table(table) => {
                let live: Vec<ResizingWidth> = table
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, spec)| self.live_column(expr, i, spec))
                    .collect();
                let is_pivoting = live.iter().any(|w| w.is_pivoting);
                let mut widths: Vec<u32> = live.iter().map(|w| w.value).collect();

                if is_nested && table.apportion && !is_pivoting {
                    let next_total = inbound
                        .resizing_width
                        .value
                        .saturating_sub(table.extra_width);
                    let columns: Vec<ApportionColumn> = table
                        .columns
                        .iter()
                        .map(|c| ApportionColumn::new(c.apportion_weight(), c.min_width))
                        .collect();
                    match try_apportion_column_widths(
                        next_total,
                        &columns,
                        self.config.underflow_policy,
                    ) {
                        Ok(apportioned) => {
                            node.column_writes = apportioned
                                .iter()
                                .enumerate()
                                .map(|(i, &w)| (i, ResizingWidth::settled(w)))
                                .collect();
                            widths = apportioned;
                        }
                        Err(err) => {
                            warn!(id = %expr.id, error = %err, "column apportionment skipped");
                        }
                    }
                }

                let total = width_sum(widths.iter().copied().chain([table.extra_width]));
                node.write = Some(ResizingWidth::new(total, is_pivoting));
            }
            ExpressionShape::Container(container) => {
                let fixed = container.fixed_column;
                let fixed_actual = fixed.map_or(0, |c| c.width());
                let fixed_resizing = match fixed {
                    Some(spec) if spec.resizable => self.live_column(expr, 0, &spec),
                    _ => ResizingWidth::settled(fixed_actual),
                };
                let inputs = NestedExpressionInputs {
                    nested_expressions: &container.nested,
                    fixed_column_actual_width: fixed_actual,
                    fixed_column_resizing_width: fixed_resizing,
                    fixed_column_min_width: fixed.map_or(0, |c| c.min_width),
                    nested_expression_min_width: container.nested_min_width,
                    extra_width: container.extra_width,
                    expression: &expr.id,
                };
                let composition = nested_expression_container(&inputs, &inbound, self.widths)?;
                node.outbound = Some(composition.container);
                node.write = Some(composition.write.1);
            }
        }
        Ok(node)
    }
}

// ============================================================================
// ResizingEngine
// ============================================================================

/// Owns an expression tree and keeps its widths consistent.
pub struct ResizingEngine {
    root: Expression,
    index: FxHashMap<ExpressionId, NodeId>,
    nodes: Vec<NodeEntry>,
    graph: DepGraph,
    widths: ResizingWidths,
    columns: ColumnResizingWidths,
    cache: FxHashMap<NodeId, CachedNode>,
    config: ResizingConfig,
    stats: PassStats,
    passes: usize,
    drag: ResizeDragMachine,
    debugger: Arc<ResizeDebugger>,
}

impl ResizingEngine {
    /// Index `root` with the default configuration.
    pub fn new(root: Expression) -> Result<Self, ResizeError> {
        Self::with_config(root, ResizingConfig::default())
    }

    /// Index `root`. Fails on duplicate expression ids.
    pub fn with_config(root: Expression, config: ResizingConfig) -> Result<Self, ResizeError> {
        let TreeIndex {
            index,
            nodes,
            graph,
        } = TreeIndex::build(&root)?;
        let debugger = ResizeDebugger::new();
        debugger.set_enabled(config.record_debug);
        Ok(Self {
            root,
            index,
            nodes,
            graph,
            widths: ResizingWidths::new(),
            columns: ColumnResizingWidths::new(),
            cache: FxHashMap::default(),
            config,
            stats: PassStats::default(),
            passes: 0,
            drag: ResizeDragMachine::new(),
            debugger,
        })
    }

    /// Index `root` with [`ResizingConfig::from_env`].
    pub fn from_env(root: Expression) -> Result<Self, ResizeError> {
        Self::with_config(root, ResizingConfig::from_env())
    }

    // ── Passes ──────────────────────────────────────────────────────

    /// Run one compute-then-commit pass over the whole tree.
    pub fn pass(&mut self) -> Result<PassStats, ResizeError> {
        self.passes += 1;
        let pass = self.passes;
        let span = debug_span!("resize_pass", pass);
        let _guard = span.enter();

        let dirty = self.graph.propagate();
        trace!(dirty, "dirty nodes before pass");
        let inbound = NestedExpressionContainer::for_root(&self.root)?;

        let mut walk = PassWalk {
            index: &self.index,
            graph: &mut self.graph,
            cache: &mut self.cache,
            widths: &self.widths,
            columns: &self.columns,
            config: &self.config,
            debugger: &self.debugger,
            staged_widths: Vec::new(),
            staged_columns: Vec::new(),
            stats: PassStats {
                pass,
                dirty,
                ..PassStats::default()
            },
        };
        walk.visit(&self.root, None, inbound)?;
        let PassWalk {
            staged_widths,
            staged_columns,
            mut stats,
            ..
        } = walk;

        // Commit phase.
        for (id, width) in staged_widths {
            if self.widths.set(id, width) {
                stats.committed_widths += 1;
            }
        }
        for (col, width) in staged_columns {
            if self.columns.set(col, width) {
                stats.committed_columns += 1;
            }
        }
        self.dirty_changed();

        stats.cache_entries = self.cache.len();
        debug!(
            recomputed = stats.recomputed,
            cached = stats.cached,
            committed_widths = stats.committed_widths,
            committed_columns = stats.committed_columns,
            "resize pass committed"
        );
        self.stats = stats.clone();
        Ok(stats)
    }

    /// Run passes until one commits no change. Returns the number of
    /// passes run.
    pub fn settle(&mut self) -> Result<usize, ResizeError> {
        let max = self.config.max_settle_passes.max(1);
        for n in 1..=max {
            if self.pass()?.committed() == 0 {
                return Ok(n);
            }
        }
        warn!(passes = max, "resizing did not settle");
        Err(ResizeError::DidNotSettle { passes: max })
    }

    /// Dirty the readers of every registry and column entry changed since
    /// the last call.
    fn dirty_changed(&mut self) {
        for id in self.widths.take_changed() {
            let Some(&node) = self.index.get(&id) else {
                continue;
            };
            if let (Some(parent), Some(width)) = (self.graph.parent(node), self.widths.get(&id)) {
                self.graph
                    .mark_changed(parent, InputKind::Children, hash_of(&(&id, width)));
            }
        }
        for col in self.columns.take_changed() {
            let Some(&node) = self.index.get(&col.expression) else {
                continue;
            };
            if let Some(width) = self.columns.get(&col) {
                self.graph
                    .mark_changed(node, InputKind::Columns, hash_of(&(col.index, width)));
            }
        }
    }

    /// Recompute every node on the next pass.
    pub fn invalidate_all(&mut self) {
        self.graph.invalidate_all();
    }

    // ── External dispatch ───────────────────────────────────────────

    /// Read-modify-write one registry entry. Returns whether it changed.
    pub fn update_resizing_width<F>(&mut self, id: impl Into<ExpressionId>, updater: F) -> bool
    where
        F: FnOnce(Option<ResizingWidth>) -> ResizingWidth,
    {
        let changed = self.widths.update(id.into(), updater);
        self.dirty_changed();
        changed
    }

    /// Read-modify-write one column store entry. Returns whether it changed.
    pub fn update_column_resizing_width<F>(&mut self, col: ColumnRef, updater: F) -> bool
    where
        F: FnOnce(Option<ResizingWidth>) -> ResizingWidth,
    {
        let changed = self.columns.update(col, updater);
        self.dirty_changed();
        changed
    }

    /// Persist a width into the expression model.
    ///
    /// For [`ResizeTarget::Expression`] (literals) `width` is the cell width
    /// without borders; for columns it is the column width. Live entries
    /// for the target are replaced by the new rendered width. Returns
    /// whether the model changed.
    pub fn set_declared_width(
        &mut self,
        target: &ResizeTarget,
        width: u32,
    ) -> Result<bool, ResizeError> {
        let id = target.expression_id();
        let node = self.node(id)?;
        let expr = self
            .root
            .find_mut(id)
            .ok_or_else(|| ResizeError::UnknownExpression(id.clone()))?;

        let (slot, rendered) = match target {
            ResizeTarget::Expression(_) => match &mut expr.kind {
                ExpressionKind::Literal(literal) => (
                    &mut literal.width,
                    width
                        .max(LITERAL_EXPRESSION_MIN_WIDTH)
                        .saturating_add(LITERAL_EXPRESSION_EXTRA_WIDTH),
                ),
                _ => return Err(ResizeError::NotResizable(target.clone())),
            },
            ResizeTarget::Column(col) => {
                let spec = Self::column_spec(expr, col)?;
                let slot = declared_column_width_mut(expr, col.index)
                    .ok_or_else(|| ResizeError::NotResizable(target.clone()))?;
                (slot, width.max(spec.min_width))
            }
        };
        if *slot == Some(width) {
            return Ok(false);
        }
        *slot = Some(width);

        match target {
            ResizeTarget::Expression(id) => {
                if self.widths.get(id).is_some() {
                    self.widths.set(id.clone(), ResizingWidth::settled(rendered));
                }
            }
            ResizeTarget::Column(col) => {
                if self.columns.get(col).is_some() {
                    self.columns.set(col.clone(), ResizingWidth::settled(rendered));
                }
            }
        }
        self.dirty_changed();
        self.graph
            .mark_changed(node, InputKind::Declared, hash_of(&(target, width)));
        Ok(true)
    }

    /// Swap in a structurally edited tree.
    ///
    /// Ids are re-indexed and the cache is dropped. The registry and column
    /// store are kept; entries for removed expressions are never read.
    pub fn replace_expression(&mut self, root: Expression) -> Result<(), ResizeError> {
        if self.drag.is_active() {
            return Err(ResizeError::Drag(crate::drag::DragError::AlreadyDragging));
        }
        let TreeIndex {
            index,
            nodes,
            graph,
        } = TreeIndex::build(&root)?;
        self.root = root;
        self.index = index;
        self.nodes = nodes;
        self.graph = graph;
        self.cache.clear();
        Ok(())
    }

    // ── Drags ───────────────────────────────────────────────────────

    /// Grab a resize handle at `pointer_x` and settle.
    ///
    /// Literal cells start from the wider of their own width and the
    /// container they fill; columns start from their live width.
    pub fn begin_drag(
        &mut self,
        target: ResizeTarget,
        pointer_x: i32,
    ) -> Result<DragTransition, ResizeError> {
        if self.drag.is_active() {
            return Err(crate::drag::DragError::AlreadyDragging.into());
        }
        let (start_width, min_width) = self.drag_bounds(&target)?;
        let transition = self.drag.begin(target, pointer_x, start_width, min_width)?;
        self.apply_drag_effect(&transition.effect)?;
        Ok(transition)
    }

    /// Follow the pointer and settle.
    pub fn drag_to(&mut self, pointer_x: i32) -> Result<DragTransition, ResizeError> {
        let transition = self.drag.move_to(pointer_x);
        self.apply_drag_effect(&transition.effect)?;
        Ok(transition)
    }

    /// Release the handle, persist according to `behavior`, and settle.
    pub fn stop_drag(
        &mut self,
        behavior: ResizerStopBehavior,
    ) -> Result<DragTransition, ResizeError> {
        let transition = self.drag.stop(behavior)?;
        self.apply_drag_effect(&transition.effect)?;
        Ok(transition)
    }

    /// Abort the drag, restore the pre-drag width, and settle.
    pub fn reset_drag(&mut self) -> Result<DragTransition, ResizeError> {
        let transition = self.drag.reset();
        self.apply_drag_effect(&transition.effect)?;
        Ok(transition)
    }

    fn drag_bounds(&self, target: &ResizeTarget) -> Result<(u32, u32), ResizeError> {
        let id = target.expression_id();
        let node = self.node(id)?;
        let expr = self
            .root
            .find(id)
            .ok_or_else(|| ResizeError::UnknownExpression(id.clone()))?;
        match target {
            ResizeTarget::Expression(_) => {
                if !matches!(expr.kind, ExpressionKind::Literal(_)) {
                    return Err(ResizeError::NotResizable(target.clone()));
                }
                let own = expression_resizing_width(expr, &self.widths)?;
                let filled = self
                    .cache
                    .get(&node)
                    .map_or(0, |c| c.inbound.resizing_width.value);
                Ok((own.max(filled), expression_min_width(expr)?))
            }
            ResizeTarget::Column(col) => {
                let spec = Self::column_spec(expr, col)?;
                if !spec.resizable {
                    return Err(ResizeError::NotResizable(target.clone()));
                }
                let live = self
                    .columns
                    .get(col)
                    .map_or_else(|| spec.width(), |w| w.value);
                Ok((live, spec.min_width))
            }
        }
    }

    fn apply_drag_effect(&mut self, effect: &DragEffect) -> Result<(), ResizeError> {
        match effect {
            DragEffect::Started { target, width } | DragEffect::Updated { target, width, .. } => {
                self.write_live(target, ResizingWidth::pivoting(*width));
            }
            DragEffect::Committed {
                target,
                start_width,
                persisted,
                ..
            } => match persisted {
                Some(width) => {
                    self.write_live(target, ResizingWidth::settled(*width));
                    let declared = match target {
                        ResizeTarget::Expression(_) => {
                            width.saturating_sub(LITERAL_EXPRESSION_EXTRA_WIDTH)
                        }
                        ResizeTarget::Column(_) => *width,
                    };
                    self.set_declared_width(target, declared)?;
                }
                None => self.write_live(target, ResizingWidth::settled(*start_width)),
            },
            DragEffect::Reset {
                target,
                restored_width,
            } => {
                self.write_live(target, ResizingWidth::settled(*restored_width));
            }
            DragEffect::Noop { .. } => return Ok(()),
        }
        debug!(effect = ?effect, "drag effect applied");
        self.settle()?;
        Ok(())
    }

    fn write_live(&mut self, target: &ResizeTarget, width: ResizingWidth) {
        match target {
            ResizeTarget::Expression(id) => {
                self.widths.set(id.clone(), width);
            }
            ResizeTarget::Column(col) => {
                self.columns.set(col.clone(), width);
            }
        }
        self.dirty_changed();
    }

    // ── Introspection ───────────────────────────────────────────────

    fn node(&self, id: &ExpressionId) -> Result<NodeId, ResizeError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ResizeError::UnknownExpression(id.clone()))
    }

    fn column_spec(expr: &Expression, col: &ColumnRef) -> Result<ColumnSpec, ResizeError> {
        expression_shape(expr)?
            .columns()
            .get(col.index)
            .copied()
            .ok_or_else(|| ResizeError::UnknownColumn(col.clone()))
    }

    /// The expression tree, including persisted widths.
    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.root
    }

    #[must_use]
    pub fn into_expression(self) -> Expression {
        self.root
    }

    /// Container `id` handed to its nested children in the last pass.
    #[must_use]
    pub fn container(&self, id: &ExpressionId) -> Option<NestedExpressionContainer> {
        let node = self.index.get(id)?;
        self.cache.get(node)?.outbound
    }

    /// Container `id` received from its parent in the last pass.
    #[must_use]
    pub fn inbound_container(&self, id: &ExpressionId) -> Option<NestedExpressionContainer> {
        let node = self.index.get(id)?;
        Some(self.cache.get(node)?.inbound)
    }

    #[must_use]
    pub fn resizing_widths(&self) -> &ResizingWidths {
        &self.widths
    }

    #[must_use]
    pub fn column_resizing_widths(&self) -> &ColumnResizingWidths {
        &self.columns
    }

    /// Live width of a column, or its declared width when untracked.
    pub fn column_resizing_width(&self, col: &ColumnRef) -> Result<ResizingWidth, ResizeError> {
        let expr = self
            .root
            .find(&col.expression)
            .ok_or_else(|| ResizeError::UnknownExpression(col.expression.clone()))?;
        let spec = Self::column_spec(expr, col)?;
        Ok(self
            .columns
            .get(col)
            .unwrap_or(ResizingWidth::settled(spec.width())))
    }

    /// Statistics of the last pass.
    #[must_use]
    pub fn stats(&self) -> &PassStats {
        &self.stats
    }

    /// Passes run since creation.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }

    #[must_use]
    pub fn config(&self) -> &ResizingConfig {
        &self.config
    }

    pub fn set_force_full(&mut self, force: bool) {
        self.config.force_full = force;
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    #[must_use]
    pub fn debugger(&self) -> &Arc<ResizeDebugger> {
        &self.debugger
    }

    /// Number of indexed expressions.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Ids in DFS pre-order.
    pub fn ids(&self) -> impl Iterator<Item = &ExpressionId> {
        self.nodes.iter().map(|n| &n.id)
    }
}

impl std::fmt::Debug for ResizingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizingEngine")
            .field("root", &self.root.id)
            .field("nodes", &self.nodes.len())
            .field("registry_entries", &self.widths.len())
            .field("cache_entries", &self.cache.len())
            .field("passes", &self.passes)
            .field("force_full", &self.config.force_full)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
