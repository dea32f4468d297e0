//! Minimum and resizing widths of whole expressions.
//!
//! Both functions are pure and recurse through nested expressions:
//!
//! - [`expression_min_width`] is the structural floor a table can never
//!   shrink below without clipping content;
//! - [`expression_resizing_width`] is the width "as rendered right now":
//!   the registry value when the expression is tracked, its declared
//!   widths (falling back to defaults) otherwise.
//!
//! Children stacked in one nested column contribute their maximum, table
//! columns contribute their sum. For every tree,
//! `expression_resizing_width(e, &ResizingWidths::new()) >= expression_min_width(e)`.

pub use crate::shape::{ExpressionShape, expression_shape};

use bee_core::Expression;

use crate::error::UnreachableLogicTypeError;
use crate::resizing_width::ResizingWidths;
use crate::shape::width_sum;

/// Structural minimum width of `expr`.
pub fn expression_min_width(expr: &Expression) -> Result<u32, UnreachableLogicTypeError> {
    match expression_shape(expr)? {
        ExpressionShape::Leaf { min_width, .. } => Ok(min_width),
        ExpressionShape::Table(table) => Ok(table.min_width()),
        ExpressionShape::Container(container) => {
            let mut nested = container.nested_min_width;
            for child in &container.nested {
                nested = nested.max(expression_min_width(child)?);
            }
            let fixed = container.fixed_column.map_or(0, |c| c.min_width);
            Ok(width_sum([fixed, nested, container.extra_width]))
        }
    }
}

/// Current width of `expr`, preferring live values from `registry`.
pub fn expression_resizing_width(
    expr: &Expression,
    registry: &ResizingWidths,
) -> Result<u32, UnreachableLogicTypeError> {
    // Shape first so an unknown logic type fails even when tracked.
    let shape = expression_shape(expr)?;
    if let Some(live) = registry.get(&expr.id) {
        return Ok(live.value);
    }
    match shape {
        ExpressionShape::Leaf { width, .. } => Ok(width),
        ExpressionShape::Table(table) => Ok(table.width()),
        ExpressionShape::Container(container) => {
            let mut nested = container.nested_min_width;
            for child in &container.nested {
                nested = nested.max(expression_resizing_width(child, registry)?);
            }
            let fixed = container.fixed_column.map_or(0, |c| c.width());
            Ok(width_sum([fixed, nested, container.extra_width]))
        }
    }
}
