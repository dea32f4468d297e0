//! Nested-container composition.
//!
//! A container table (context, list, invocation, ...) renders an optional
//! fixed column beside a nested area in which its child expressions are
//! stacked. Given the container its own parent handed down, this module
//! computes the container it hands to its children and the aggregate width
//! it reports upwards through the registry.
//!
//! Resize intent can come from three places and the nested area follows
//! whichever is active:
//!
//! 1. an **ancestor** is being dragged and this level is not: top-down,
//!    the nested area is what the ancestor leaves after the fixed column;
//! 2. a **nested child** is being dragged: bottom-up, the nested area is
//!    that child's live width;
//! 3. **nobody** is dragging: the natural layout, never narrower than any
//!    child's declared width or the structural floor.
//!
//! All inputs are read from the committed registry. The registry write is
//! returned, not applied, so no level ever updates its own input within a
//! pass.

use bee_core::{Expression, ExpressionId};

use crate::container::NestedExpressionContainer;
use crate::error::UnreachableLogicTypeError;
use crate::resizing_width::{ResizingWidth, ResizingWidths};
use crate::shape::width_sum;
use crate::width_maths::{expression_min_width, expression_resizing_width};

/// Everything one container level knows about itself.
#[derive(Debug, Clone, Copy)]
pub struct NestedExpressionInputs<'a> {
    /// Children stacked in the nested area, in display order.
    pub nested_expressions: &'a [&'a Expression],
    pub fixed_column_actual_width: u32,
    pub fixed_column_resizing_width: ResizingWidth,
    pub fixed_column_min_width: u32,
    pub nested_expression_min_width: u32,
    pub extra_width: u32,
    /// Registry key of the container itself.
    pub expression: &'a ExpressionId,
}

/// Output of one level: the container for its children and its own
/// registry write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedComposition {
    pub container: NestedExpressionContainer,
    pub is_pivoting: bool,
    pub write: (ExpressionId, ResizingWidth),
}

/// This level is pivoting when its fixed column or any nested child is.
#[must_use]
pub fn is_pivoting(inputs: &NestedExpressionInputs<'_>, registry: &ResizingWidths) -> bool {
    inputs.fixed_column_resizing_width.is_pivoting
        || inputs
            .nested_expressions
            .iter()
            .any(|e| registry.is_pivoting(&e.id))
}

/// Width of the nested area while a resize may be in progress.
pub fn nested_expression_resizing_width(
    inputs: &NestedExpressionInputs<'_>,
    is_pivoting: bool,
    ancestor: &NestedExpressionContainer,
    registry: &ResizingWidths,
) -> Result<u32, UnreachableLogicTypeError> {
    let fixed = inputs.fixed_column_resizing_width.value;

    if ancestor.resizing_width.is_pivoting && !is_pivoting {
        return Ok(ancestor
            .resizing_width
            .value
            .saturating_sub(fixed)
            .saturating_sub(inputs.extra_width));
    }

    if let Some(pivoting_child) = inputs
        .nested_expressions
        .iter()
        .find(|e| registry.is_pivoting(&e.id))
    {
        let width = expression_resizing_width(pivoting_child, registry)?;
        return Ok(width.max(inputs.fixed_column_min_width));
    }

    let base = if fixed >= inputs.fixed_column_actual_width {
        ancestor.pivot_aware(is_pivoting).resizing_width.value
    } else {
        ancestor.actual_width
    };

    let declared_only = ResizingWidths::new();
    let mut width = base
        .saturating_sub(fixed)
        .saturating_sub(inputs.extra_width)
        .max(inputs.nested_expression_min_width);
    for child in inputs.nested_expressions {
        width = width.max(expression_resizing_width(child, &declared_only)?);
    }
    Ok(width)
}

/// Narrowest the nested area may become.
pub fn nested_expression_min_width(
    inputs: &NestedExpressionInputs<'_>,
    ancestor: &NestedExpressionContainer,
) -> Result<u32, UnreachableLogicTypeError> {
    let mut width = ancestor
        .min_width
        .saturating_sub(inputs.fixed_column_resizing_width.value)
        .saturating_sub(inputs.extra_width)
        .max(inputs.nested_expression_min_width);
    for child in inputs.nested_expressions {
        width = width.max(expression_min_width(child)?);
    }
    Ok(width)
}

/// Natural width of the nested area, ignoring children that are being
/// dragged.
pub fn nested_expression_actual_width(
    inputs: &NestedExpressionInputs<'_>,
    ancestor: &NestedExpressionContainer,
    registry: &ResizingWidths,
) -> Result<u32, UnreachableLogicTypeError> {
    let declared_only = ResizingWidths::new();
    let mut width = ancestor
        .actual_width
        .saturating_sub(inputs.fixed_column_actual_width)
        .saturating_sub(inputs.extra_width);
    for child in inputs
        .nested_expressions
        .iter()
        .filter(|e| !registry.is_pivoting(&e.id))
    {
        width = width.max(expression_resizing_width(child, &declared_only)?);
    }
    Ok(width)
}

/// Compose one container level.
pub fn nested_expression_container(
    inputs: &NestedExpressionInputs<'_>,
    ancestor: &NestedExpressionContainer,
    registry: &ResizingWidths,
) -> Result<NestedComposition, UnreachableLogicTypeError> {
    let is_pivoting = is_pivoting(inputs, registry);
    let resizing = nested_expression_resizing_width(inputs, is_pivoting, ancestor, registry)?;
    let min_width = nested_expression_min_width(inputs, ancestor)?;
    let actual_width = nested_expression_actual_width(inputs, ancestor, registry)?;

    let container = NestedExpressionContainer::new(
        min_width,
        actual_width,
        ResizingWidth::new(resizing, is_pivoting || ancestor.resizing_width.is_pivoting),
    );
    let total = width_sum([
        inputs.fixed_column_resizing_width.value,
        resizing,
        inputs.extra_width,
    ]);

    Ok(NestedComposition {
        container,
        is_pivoting,
        write: (
            inputs.expression.clone(),
            ResizingWidth::new(total, is_pivoting),
        ),
    })
}
