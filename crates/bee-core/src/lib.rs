#![forbid(unsafe_code)]

//! Core: the boxed expression tree and the logging facade.
//!
//! # Role in the BEE resizing engine
//! `bee-core` is the input layer. It owns the expression tree model that the
//! surrounding DMN editor produces and edits, and the logging macros the
//! layout crate uses.
//!
//! # Primary responsibilities
//! - **Expression**: recursive sum type over DMN logic types, with the
//!   declared column widths each table carries.
//! - **Serialization**: serde (de)serialization with an internal
//!   `logicType` tag, so hosts can hand trees over as JSON.
//! - **Logging**: `tracing` re-exports, or no-op macros when the `tracing`
//!   feature is disabled.
//!
//! # How it fits in the system
//! `bee-layout` consumes [`expression::Expression`] trees, computes widths
//! for every nested table, and writes user-resized widths back into the
//! tree. Nothing in this crate knows about widths beyond storing them.

pub mod expression;
pub mod logging;

pub use expression::{
    ConditionalExpression, ContextEntry, ContextExpression, DecisionTableExpression, Expression,
    ExpressionId, ExpressionKind, FilterExpression, FunctionExpression, FunctionKind,
    InvocationExpression, IteratorExpression, ListExpression, LiteralExpression, LogicType,
    RelationExpression, TableColumn,
};

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
