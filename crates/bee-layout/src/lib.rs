#![forbid(unsafe_code)]

//! Width maths and the incremental resizing engine for nested expression
//! tables.
//!
//! # Role in the BEE resizing engine
//! `bee-layout` turns an [`Expression`](bee_core::Expression) tree into
//! consistent widths. Every container level hands its nested children a
//! [`NestedExpressionContainer`]; tables report their aggregate width back
//! through a shared registry; dragging one handle ripples through every
//! ancestor and sibling in the same settle.
//!
//! # Primary responsibilities
//! - **Width maths**: per logic type minimum and natural widths
//!   ([`width_maths`], [`shape`], [`width_constants`]).
//! - **Composition**: one container level's resizing, minimum and actual
//!   widths ([`nested`]).
//! - **Apportionment**: exact integer redistribution of a table's width
//!   across its columns ([`apportion`]).
//! - **Engine**: top-down compute-then-commit passes with dirty tracking,
//!   caching and a drag lifecycle ([`engine`], [`dep_graph`], [`drag`]).
//!
//! # Example
//!
//! ```
//! use bee_core::{ContextEntry, Expression};
//! use bee_layout::{ResizeTarget, ResizerStopBehavior, ResizingEngine};
//!
//! let root = Expression::context("ctx", vec![ContextEntry::new("a", Expression::literal("lit"))]);
//! let mut engine = ResizingEngine::new(root)?;
//! engine.settle()?;
//!
//! engine.begin_drag(ResizeTarget::Expression("lit".into()), 0)?;
//! engine.drag_to(100)?;
//! assert!(engine.resizing_widths().is_pivoting(&"ctx".into()));
//!
//! engine.stop_drag(ResizerStopBehavior::SetWidthAlways)?;
//! assert!(!engine.resizing_widths().is_pivoting(&"ctx".into()));
//! # Ok::<(), bee_layout::ResizeError>(())
//! ```

pub mod apportion;
pub mod config;
pub mod container;
pub mod debug;
pub mod dep_graph;
pub mod drag;
pub mod engine;
pub mod error;
pub mod nested;
pub mod resizing_width;
pub mod shape;
pub mod width_constants;
pub mod width_maths;

pub use apportion::{
    ApportionColumn, ApportionError, UnderflowPolicy, apportion_column_widths,
    try_apportion_column_widths,
};
pub use config::{ConfigError, ResizingConfig};
pub use container::NestedExpressionContainer;
pub use debug::{ResizeDebugger, ResizeRecord};
pub use drag::{
    DragEffect, DragError, DragState, DragTransition, ResizeDragMachine, ResizeTarget,
    ResizerStopBehavior,
};
pub use engine::{PassStats, ResizingEngine};
pub use error::{ResizeError, UnreachableLogicTypeError};
pub use nested::{NestedComposition, NestedExpressionInputs, nested_expression_container};
pub use resizing_width::{ColumnRef, ColumnResizingWidths, ResizingWidth, ResizingWidths};
pub use width_maths::{expression_min_width, expression_resizing_width};
