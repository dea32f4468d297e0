//! Resizing-width registry.
//!
//! The registry is the one piece of mutable state shared between levels of
//! a nested table: an explicit owned map from key to [`ResizingWidth`] with
//! a single read-modify-write entry point, [`WidthLedger::update`].
//!
//! Two instances exist per engine:
//!
//! - [`ResizingWidths`], keyed by [`ExpressionId`], holding the aggregate
//!   width each table reports upwards;
//! - [`ColumnResizingWidths`], keyed by [`ColumnRef`], holding live widths
//!   of individual resizable columns.
//!
//! Entries are never removed. A stale entry for an expression that left the
//! tree is only ever read by id, so it is harmless.
//!
//! Every `update` that actually changes a value records the key in a change
//! list; the engine drains it with [`WidthLedger::take_changed`] after the
//! commit phase to decide which nodes to dirty.

use std::fmt;
use std::hash::Hash;

use bee_core::ExpressionId;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Width of one expression or column while a drag may be in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizingWidth {
    pub value: u32,
    /// Set on the dragged node and on every level the flag bubbled up to.
    pub is_pivoting: bool,
}

impl ResizingWidth {
    #[must_use]
    pub const fn new(value: u32, is_pivoting: bool) -> Self {
        Self { value, is_pivoting }
    }

    /// A width that is not part of an active drag.
    #[must_use]
    pub const fn settled(value: u32) -> Self {
        Self::new(value, false)
    }

    /// A width owned by an active drag.
    #[must_use]
    pub const fn pivoting(value: u32) -> Self {
        Self::new(value, true)
    }
}

impl fmt::Display for ResizingWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pivoting {
            write!(f, "{}px*", self.value)
        } else {
            write!(f, "{}px", self.value)
        }
    }
}

/// One resizable column of a table expression.
///
/// `index` points into [`TableShape::columns`](crate::shape::TableShape::columns):
/// a container's fixed entry-info column and a Java/PMML label column are
/// index 0. Row-index columns are not addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnRef {
    pub expression: ExpressionId,
    pub index: usize,
}

impl ColumnRef {
    #[must_use]
    pub fn new(expression: impl Into<ExpressionId>, index: usize) -> Self {
        Self {
            expression: expression.into(),
            index,
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.expression, self.index)
    }
}

/// Keyed store of [`ResizingWidth`] values with change tracking.
#[derive(Debug, Clone)]
pub struct WidthLedger<K> {
    entries: FxHashMap<K, ResizingWidth>,
    /// Keys in first-change order; `changed_set` holds the same keys.
    changed: Vec<K>,
    changed_set: FxHashSet<K>,
}

/// Aggregate width of every table, keyed by expression id.
pub type ResizingWidths = WidthLedger<ExpressionId>;

/// Live width of every resizable column.
pub type ColumnResizingWidths = WidthLedger<ColumnRef>;

impl<K: Hash + Eq + Clone> WidthLedger<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            changed: Vec::new(),
            changed_set: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<ResizingWidth> {
        self.entries.get(key).copied()
    }

    /// `false` for unknown keys.
    #[must_use]
    pub fn is_pivoting(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(|w| w.is_pivoting)
    }

    /// Read-modify-write one entry.
    ///
    /// Returns `true` when the stored value changed. Writing a value equal
    /// to the current one is not a change and is not recorded.
    pub fn update<F>(&mut self, key: K, updater: F) -> bool
    where
        F: FnOnce(Option<ResizingWidth>) -> ResizingWidth,
    {
        let prev = self.entries.get(&key).copied();
        let next = updater(prev);
        if prev == Some(next) {
            return false;
        }
        self.entries.insert(key.clone(), next);
        if self.changed_set.insert(key.clone()) {
            self.changed.push(key);
        }
        true
    }

    /// Shorthand for an `update` that ignores the previous value.
    pub fn set(&mut self, key: K, width: ResizingWidth) -> bool {
        self.update(key, |_| width)
    }

    /// Drain the keys changed since the last call, in first-change order.
    pub fn take_changed(&mut self) -> Vec<K> {
        self.changed_set.clear();
        std::mem::take(&mut self.changed)
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &ResizingWidth)> {
        self.entries.iter()
    }

    /// Keys currently flagged as pivoting, in unspecified order.
    pub fn pivoting_keys(&self) -> impl Iterator<Item = &K> {
        self.entries
            .iter()
            .filter(|(_, w)| w.is_pivoting)
            .map(|(k, _)| k)
    }
}

impl<K: Hash + Eq + Clone> Default for WidthLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ExpressionId {
        ExpressionId::new(s)
    }

    #[test]
    fn update_sees_previous_value() {
        let mut widths = ResizingWidths::new();
        assert!(widths.update(id("a"), |prev| {
            assert!(prev.is_none());
            ResizingWidth::settled(120)
        }));
        assert!(widths.update(id("a"), |prev| {
            let prev = prev.unwrap();
            ResizingWidth::pivoting(prev.value + 30)
        }));
        assert_eq!(widths.get(&id("a")), Some(ResizingWidth::pivoting(150)));
        assert!(widths.is_pivoting(&id("a")));
        assert!(!widths.is_pivoting(&id("missing")));
    }

    #[test]
    fn identical_write_is_not_a_change() {
        let mut widths = ResizingWidths::new();
        widths.set(id("a"), ResizingWidth::settled(100));
        assert_eq!(widths.take_changed(), vec![id("a")]);

        assert!(!widths.set(id("a"), ResizingWidth::settled(100)));
        assert!(!widths.has_changes());
        assert!(widths.take_changed().is_empty());
    }

    #[test]
    fn changed_list_is_deduplicated_and_ordered() {
        let mut widths = ResizingWidths::new();
        widths.set(id("b"), ResizingWidth::settled(1));
        widths.set(id("a"), ResizingWidth::settled(2));
        widths.set(id("b"), ResizingWidth::settled(3));
        assert_eq!(widths.take_changed(), vec![id("b"), id("a")]);
        assert_eq!(widths.len(), 2);
    }

    #[test]
    fn keys_are_recorded_again_after_a_drain() {
        let mut cols = ColumnResizingWidths::new();
        for round in 0..3u32 {
            for i in 0..200 {
                cols.set(ColumnRef::new("rel", i), ResizingWidth::settled(round * 10 + 1));
                cols.set(ColumnRef::new("rel", i), ResizingWidth::settled(round * 10 + 2));
            }
            let changed = cols.take_changed();
            assert_eq!(changed.len(), 200);
            assert_eq!(changed[0], ColumnRef::new("rel", 0));
            assert_eq!(changed[199], ColumnRef::new("rel", 199));
            assert!(!cols.has_changes());
        }
    }

    #[test]
    fn pivot_flag_alone_is_a_change() {
        let mut cols = ColumnResizingWidths::new();
        let col = ColumnRef::new("rel", 1);
        cols.set(col.clone(), ResizingWidth::settled(150));
        cols.take_changed();
        assert!(cols.set(col.clone(), ResizingWidth::pivoting(150)));
        assert_eq!(cols.pivoting_keys().collect::<Vec<_>>(), vec![&col]);
    }

    #[test]
    fn display_marks_pivoting() {
        assert_eq!(ResizingWidth::pivoting(42).to_string(), "42px*");
        assert_eq!(ResizingWidth::settled(42).to_string(), "42px");
        assert_eq!(ColumnRef::new("dt", 3).to_string(), "dt#3");
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&ResizingWidth::pivoting(7)).unwrap();
        assert_eq!(json, r#"{"value":7,"isPivoting":true}"#);
    }
}
