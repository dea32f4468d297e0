#![forbid(unsafe_code)]

//! Resize pass debugging utilities.
//!
//! [`ResizeDebugger`] records, per pass and per node, the container a node
//! received, the container it handed down, the registry and column writes
//! it staged and whether the result came from the cache.
//!
//! Recording is a no-op unless enabled at runtime, either with
//! [`ResizeDebugger::set_enabled`] or `record_debug = true` in
//! [`ResizingConfig`](crate::config::ResizingConfig).
//!
//! # Usage
//!
//! ```ignore
//! let mut engine = ResizingEngine::new(root)?;
//! engine.debugger().set_enabled(true);
//! engine.settle()?;
//!
//! for record in engine.debugger().snapshot() {
//!     println!("{}", record.summary());
//! }
//! std::fs::write("resize.dot", engine.debugger().export_dot())?;
//! ```

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use bee_core::{ExpressionId, LogicType};

use crate::container::NestedExpressionContainer;
use crate::resizing_width::ResizingWidth;

/// One node computation within one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRecord {
    /// 1-based pass number.
    pub pass: usize,
    pub id: ExpressionId,
    pub logic_type: LogicType,
    pub parent: Option<ExpressionId>,
    pub inbound: NestedExpressionContainer,
    /// Container handed to nested children; `None` for leaves and tables.
    pub outbound: Option<NestedExpressionContainer>,
    /// Registry write staged under `id`.
    pub write: Option<ResizingWidth>,
    /// Column store writes staged for this node, by column index.
    pub column_writes: Vec<(usize, ResizingWidth)>,
    pub cache_hit: bool,
}

impl ResizeRecord {
    /// Children were handed less than their minimum width.
    #[must_use]
    pub fn has_overflow(&self) -> bool {
        self.outbound
            .is_some_and(|c| c.min_width > c.resizing_width.value)
    }

    /// A nested node reports less width than its container offers.
    #[must_use]
    pub fn has_underflow(&self) -> bool {
        self.parent.is_some()
            && self
                .write
                .is_some_and(|w| w.value < self.inbound.resizing_width.value)
    }

    #[must_use]
    pub fn is_pivoting(&self) -> bool {
        self.write.is_some_and(|w| w.is_pivoting)
            || self.column_writes.iter().any(|(_, w)| w.is_pivoting)
    }

    /// Multi-line human readable description.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            "[pass {}] {} ({}){}",
            self.pass,
            self.id,
            self.logic_type,
            if self.cache_hit { " cached" } else { "" }
        );
        let _ = writeln!(s, "  inbound:  {}", self.inbound);
        if let Some(outbound) = &self.outbound {
            let _ = writeln!(s, "  outbound: {outbound}");
        }
        if let Some(write) = self.write {
            let _ = writeln!(s, "  write:    {write}");
        }
        for (index, width) in &self.column_writes {
            let _ = writeln!(s, "  column {index}: {width}");
        }
        if self.has_overflow() {
            let _ = writeln!(s, "  ⚠ OVERFLOW");
        }
        s
    }
}

/// Runtime-toggled recorder, shareable across threads.
#[derive(Debug)]
pub struct ResizeDebugger {
    enabled: AtomicBool,
    records: Mutex<Vec<ResizeRecord>>,
}

impl ResizeDebugger {
    /// Create a debugger wrapped in `Arc` (disabled by default).
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            enabled: AtomicBool::new(false),
            records: Mutex::new(Vec::new()),
        })
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Toggle recording, returning the new state.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    pub fn record(&self, record: ResizeRecord) {
        if !self.enabled() {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    pub fn snapshot(&self) -> Vec<ResizeRecord> {
        self.records
            .lock()
            .ok()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Records of the most recent pass only.
    pub fn last_pass(&self) -> Vec<ResizeRecord> {
        let records = self.snapshot();
        let Some(last) = records.iter().map(|r| r.pass).max() else {
            return Vec::new();
        };
        records.into_iter().filter(|r| r.pass == last).collect()
    }

    pub fn overflows(&self) -> Vec<ResizeRecord> {
        self.snapshot()
            .into_iter()
            .filter(ResizeRecord::has_overflow)
            .collect()
    }

    pub fn report(&self) -> String {
        let records = self.snapshot();
        let passes = records.iter().map(|r| r.pass).max().unwrap_or(0);
        let hits = records.iter().filter(|r| r.cache_hit).count();

        let mut s = String::new();
        let _ = writeln!(
            s,
            "=== Resize Debug Report ({} records, {passes} passes, {hits} cached) ===",
            records.len()
        );
        let overflows: Vec<_> = records.iter().filter(|r| r.has_overflow()).collect();
        if !overflows.is_empty() {
            let _ = writeln!(s, "\n⚠ {} nodes have OVERFLOW:", overflows.len());
            for r in &overflows {
                let _ = writeln!(s, "  - {} (pass {})", r.id, r.pass);
            }
        }
        for record in &records {
            let _ = write!(s, "\n{}", record.summary());
        }
        s
    }

    /// Graphviz DOT of the most recent pass: one node per expression,
    /// edges from parent to child, colored by state.
    pub fn export_dot(&self) -> String {
        let records = self.last_pass();

        let mut s = String::new();
        let _ = writeln!(s, "digraph ResizeDebug {{");
        let _ = writeln!(s, "  rankdir=TB;");
        let _ = writeln!(s, "  node [shape=record];");

        for r in &records {
            let color = if r.has_overflow() {
                "red"
            } else if r.is_pivoting() {
                "orange"
            } else if r.has_underflow() {
                "yellow"
            } else {
                "green"
            };
            let width = r
                .write
                .map_or_else(|| "-".to_string(), |w| w.to_string());
            let label = format!(
                "{}|{}|in: {}|out: {}",
                dot_escape(r.id.as_str()),
                r.logic_type,
                r.inbound.resizing_width,
                width
            );
            let _ = writeln!(
                s,
                "  \"{}\" [label=\"{{{}}}\", color=\"{}\"];",
                dot_escape(r.id.as_str()),
                label,
                color
            );
            if let Some(parent) = &r.parent {
                let _ = writeln!(
                    s,
                    "  \"{}\" -> \"{}\";",
                    dot_escape(parent.as_str()),
                    dot_escape(r.id.as_str())
                );
            }
        }

        let _ = writeln!(s, "}}");
        s
    }
}

fn dot_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '{' | '}' | '|' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
