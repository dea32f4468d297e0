//! Error types shared across the resizing engine.

use std::fmt;

use bee_core::ExpressionId;

use crate::drag::{DragError, ResizeTarget};
use crate::resizing_width::ColumnRef;

/// Width maths met a logic type it has no rules for.
///
/// This is a programming error (a new logic type was added without
/// teaching the width maths about it). Returning 0 instead would corrupt
/// every sum above the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreachableLogicTypeError {
    pub id: ExpressionId,
    /// The `logicType` tag as received.
    pub logic_type: String,
}

impl fmt::Display for UnreachableLogicTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unreachable logic type '{}' on expression '{}'",
            self.logic_type, self.id
        )
    }
}

impl std::error::Error for UnreachableLogicTypeError {}

/// Errors returned by [`ResizingEngine`](crate::engine::ResizingEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeError {
    UnreachableLogicType(UnreachableLogicTypeError),
    /// Two nodes of the tree share an id.
    DuplicateExpressionId(ExpressionId),
    UnknownExpression(ExpressionId),
    UnknownColumn(ColumnRef),
    /// The target exists but has no drag handle.
    NotResizable(ResizeTarget),
    /// Passes kept committing changes past the configured limit.
    DidNotSettle { passes: usize },
    Drag(DragError),
}

impl fmt::Display for ResizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreachableLogicType(e) => write!(f, "{e}"),
            Self::DuplicateExpressionId(id) => write!(f, "duplicate expression id '{id}'"),
            Self::UnknownExpression(id) => write!(f, "unknown expression '{id}'"),
            Self::UnknownColumn(col) => write!(f, "unknown column {col}"),
            Self::NotResizable(target) => write!(f, "{target} is not resizable"),
            Self::DidNotSettle { passes } => {
                write!(f, "resizing did not settle after {passes} passes")
            }
            Self::Drag(e) => write!(f, "drag error: {e}"),
        }
    }
}

impl std::error::Error for ResizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnreachableLogicType(e) => Some(e),
            Self::Drag(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnreachableLogicTypeError> for ResizeError {
    fn from(err: UnreachableLogicTypeError) -> Self {
        Self::UnreachableLogicType(err)
    }
}

impl From<DragError> for ResizeError {
    fn from(err: DragError) -> Self {
        Self::Drag(err)
    }
}
