//! Width budget handed from a parent table to its nested expressions.

use std::fmt;

use bee_core::Expression;
use serde::{Deserialize, Serialize};

use crate::error::UnreachableLogicTypeError;
use crate::resizing_width::{ResizingWidth, ResizingWidths};
use crate::width_maths::{expression_min_width, expression_resizing_width};

/// Footprint of the nested area of one table, as seen by its children.
///
/// Passed explicitly down the tree walk; there is no ambient "current
/// container".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedExpressionContainer {
    pub min_width: u32,
    /// Natural (undragged) width.
    pub actual_width: u32,
    pub resizing_width: ResizingWidth,
}

impl NestedExpressionContainer {
    #[must_use]
    pub const fn new(min_width: u32, actual_width: u32, resizing_width: ResizingWidth) -> Self {
        Self {
            min_width,
            actual_width,
            resizing_width,
        }
    }

    /// Container of the root expression: the area it currently occupies,
    /// computed from declared widths only and never pivoting.
    pub fn for_root(root: &Expression) -> Result<Self, UnreachableLogicTypeError> {
        let min_width = expression_min_width(root)?;
        let actual_width = expression_resizing_width(root, &ResizingWidths::new())?;
        Ok(Self::new(
            min_width,
            actual_width,
            ResizingWidth::settled(actual_width),
        ))
    }

    /// The container as seen by a level that is itself pivoting.
    ///
    /// A pivoting level must not be driven by its ancestor's transient
    /// value, so the resizing width falls back to the actual width.
    #[must_use]
    pub fn pivot_aware(self, is_pivoting: bool) -> Self {
        if is_pivoting {
            Self {
                resizing_width: ResizingWidth::settled(self.actual_width),
                ..self
            }
        } else {
            self
        }
    }

    /// `min <= actual <= resizing`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.min_width <= self.actual_width && self.actual_width <= self.resizing_width.value
    }
}

impl fmt::Display for NestedExpressionContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min={} actual={} resizing={}",
            self.min_width, self.actual_width, self.resizing_width
        )
    }
}
