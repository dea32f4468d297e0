//! Drag/resize lifecycle for table resize handles.
//!
//! ```text
//! Idle -> Dragging -> Idle
//!            \-- stop (commit) or reset (restore)
//! ```
//!
//! The machine only turns pointer positions into widths. Registry writes
//! and persistence into the expression model are done by
//! [`ResizingEngine`](crate::engine::ResizingEngine) from the emitted
//! [`DragEffect`]s.

use std::fmt;

use bee_core::ExpressionId;
use serde::{Deserialize, Serialize};

use crate::resizing_width::ColumnRef;

/// What a resize handle resizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeTarget {
    /// A literal expression cell.
    Expression(ExpressionId),
    /// A resizable column of a table.
    Column(ColumnRef),
}

impl ResizeTarget {
    /// Id of the expression that owns the handle.
    #[must_use]
    pub fn expression_id(&self) -> &ExpressionId {
        match self {
            Self::Expression(id) => id,
            Self::Column(col) => &col.expression,
        }
    }
}

impl fmt::Display for ResizeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(id) => write!(f, "expression '{id}'"),
            Self::Column(col) => write!(f, "column {col}"),
        }
    }
}

/// Whether a committed drag is persisted into the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizerStopBehavior {
    #[default]
    SetWidthAlways,
    /// Persist only when the final width is narrower than at drag start.
    /// Growing drags are transient and snap back.
    SetWidthWhenSmaller,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    Idle,
    Dragging {
        target: ResizeTarget,
        origin_x: i32,
        start_width: u32,
        min_width: u32,
        current_width: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    WidthUnchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        target: ResizeTarget,
        width: u32,
    },
    Updated {
        target: ResizeTarget,
        previous_width: u32,
        width: u32,
    },
    Committed {
        target: ResizeTarget,
        width: u32,
        start_width: u32,
        /// Width to write into the model, if any.
        persisted: Option<u32>,
    },
    Reset {
        target: ResizeTarget,
        restored_width: u32,
    },
    Noop {
        reason: DragNoopReason,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    AlreadyDragging,
    NotDragging,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDragging => write!(f, "a drag is already in progress"),
            Self::NotDragging => write!(f, "no drag in progress"),
        }
    }
}

impl std::error::Error for DragError {}

/// Lifecycle machine for one resize handle at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeDragMachine {
    state: DragState,
    transition_counter: u64,
}

impl Default for ResizeDragMachine {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
            transition_counter: 0,
        }
    }
}

impl ResizeDragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    #[must_use]
    pub fn target(&self) -> Option<&ResizeTarget> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { target, .. } => Some(target),
        }
    }

    #[must_use]
    pub fn current_width(&self) -> Option<u32> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { current_width, .. } => Some(current_width),
        }
    }

    fn transition(&mut self, from: DragState, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state.clone(),
            effect,
        }
    }

    /// Grab a handle at `pointer_x`. `start_width` is clamped up to
    /// `min_width`.
    pub fn begin(
        &mut self,
        target: ResizeTarget,
        pointer_x: i32,
        start_width: u32,
        min_width: u32,
    ) -> Result<DragTransition, DragError> {
        if self.is_active() {
            return Err(DragError::AlreadyDragging);
        }
        let from = self.state.clone();
        let start_width = start_width.max(min_width);
        self.state = DragState::Dragging {
            target: target.clone(),
            origin_x: pointer_x,
            start_width,
            min_width,
            current_width: start_width,
        };
        Ok(self.transition(
            from,
            DragEffect::Started {
                target,
                width: start_width,
            },
        ))
    }

    /// Follow the pointer. Widths never go below the target minimum.
    pub fn move_to(&mut self, pointer_x: i32) -> DragTransition {
        let from = self.state.clone();
        let DragState::Dragging {
            target,
            origin_x,
            start_width,
            min_width,
            current_width,
        } = &mut self.state
        else {
            return self.transition(
                from,
                DragEffect::Noop {
                    reason: DragNoopReason::IdleWithoutActiveDrag,
                },
            );
        };

        let delta = i64::from(pointer_x) - i64::from(*origin_x);
        let width = (i64::from(*start_width) + delta).clamp(i64::from(*min_width), i64::from(u32::MAX));
        let width = u32::try_from(width).unwrap_or(u32::MAX);
        if width == *current_width {
            return self.transition(
                from,
                DragEffect::Noop {
                    reason: DragNoopReason::WidthUnchanged,
                },
            );
        }
        let previous_width = std::mem::replace(current_width, width);
        let target = target.clone();
        self.transition(
            from,
            DragEffect::Updated {
                target,
                previous_width,
                width,
            },
        )
    }

    /// Release the handle and commit the current width.
    pub fn stop(&mut self, behavior: ResizerStopBehavior) -> Result<DragTransition, DragError> {
        let from = self.state.clone();
        let DragState::Dragging {
            target,
            start_width,
            current_width,
            ..
        } = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return Err(DragError::NotDragging);
        };
        let persisted = match behavior {
            ResizerStopBehavior::SetWidthAlways => Some(current_width),
            ResizerStopBehavior::SetWidthWhenSmaller => {
                (current_width < start_width).then_some(current_width)
            }
        };
        Ok(self.transition(
            from,
            DragEffect::Committed {
                target,
                width: current_width,
                start_width,
                persisted,
            },
        ))
    }

    /// Abort the drag, restoring the width it started from.
    pub fn reset(&mut self) -> DragTransition {
        let from = self.state.clone();
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => self.transition(
                from,
                DragEffect::Noop {
                    reason: DragNoopReason::IdleWithoutActiveDrag,
                },
            ),
            DragState::Dragging {
                target,
                start_width,
                ..
            } => self.transition(
                from,
                DragEffect::Reset {
                    target,
                    restored_width: start_width,
                },
            ),
        }
    }
}
