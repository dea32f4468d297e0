//! Per-logic-type table structure.
//!
//! Every boxed expression renders as one of three shapes:
//!
//! - **Leaf**: a single cell with a constant floor (literal, undefined).
//! - **Table**: plain-text columns only (relation, decision table, Java and
//!   PMML functions). Its width is the sum of its columns plus borders.
//! - **Container**: an optional fixed column beside a nested area in which
//!   child expressions are stacked (context, invocation, list, FEEL
//!   function, iterators, conditional, filter).
//!
//! [`expression_shape`] is the single dispatch on logic type; the width
//! maths and the engine never match on [`ExpressionKind`] themselves.

use bee_core::{Expression, ExpressionKind, FunctionKind};

use crate::error::UnreachableLogicTypeError;
use crate::width_constants::*;

/// A non-expression column and its width contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnSpec {
    pub min_width: u32,
    /// `None` until the user resizes the column.
    pub declared_width: Option<u32>,
    pub default_width: u32,
    /// Whether the column has a drag handle.
    pub resizable: bool,
}

impl ColumnSpec {
    #[must_use]
    pub const fn resizable(min_width: u32, declared_width: Option<u32>, default_width: u32) -> Self {
        Self {
            min_width,
            declared_width,
            default_width,
            resizable: true,
        }
    }

    /// A column with a constant width and no handle.
    #[must_use]
    pub const fn fixed(width: u32) -> Self {
        Self {
            min_width: width,
            declared_width: None,
            default_width: width,
            resizable: false,
        }
    }

    /// Declared width, falling back to the default, never below the minimum.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.declared_width
            .unwrap_or(self.default_width)
            .max(self.min_width)
    }

    /// Weight used when apportioning a table's columns.
    #[must_use]
    pub fn apportion_weight(&self) -> u32 {
        self.declared_width.unwrap_or(self.min_width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    pub columns: Vec<ColumnSpec>,
    pub extra_width: u32,
    /// Nested instances redistribute the container width across columns.
    pub apportion: bool,
}

impl TableShape {
    #[must_use]
    pub fn min_width(&self) -> u32 {
        width_sum(self.columns.iter().map(|c| c.min_width).chain([self.extra_width]))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        width_sum(self.columns.iter().map(ColumnSpec::width).chain([self.extra_width]))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerShape<'a> {
    /// Column beside the nested area; `None` renders as zero width.
    pub fixed_column: Option<ColumnSpec>,
    pub nested: Vec<&'a Expression>,
    /// Floor for the nested area regardless of its children.
    pub nested_min_width: u32,
    pub extra_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionShape<'a> {
    Leaf { min_width: u32, width: u32 },
    Table(TableShape),
    Container(ContainerShape<'a>),
}

impl ExpressionShape<'_> {
    /// Addressable columns, in [`ColumnRef`](crate::resizing_width::ColumnRef)
    /// index order. A container exposes its fixed column as index 0.
    #[must_use]
    pub fn columns(&self) -> Vec<ColumnSpec> {
        match self {
            Self::Leaf { .. } => Vec::new(),
            Self::Table(table) => table.columns.clone(),
            Self::Container(container) => container.fixed_column.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn nested(&self) -> &[&Expression] {
        match self {
            Self::Container(container) => &container.nested,
            _ => &[],
        }
    }
}

/// Sum of widths, pinned at `u32::MAX` instead of wrapping.
#[must_use]
pub fn width_sum(widths: impl IntoIterator<Item = u32>) -> u32 {
    widths.into_iter().fold(0, u32::saturating_add)
}

fn literal_width(declared: Option<u32>) -> u32 {
    declared
        .unwrap_or(LITERAL_EXPRESSION_MIN_WIDTH)
        .max(LITERAL_EXPRESSION_MIN_WIDTH)
        .saturating_add(LITERAL_EXPRESSION_EXTRA_WIDTH)
}

fn leaf_table(columns: Vec<ColumnSpec>) -> TableShape {
    TableShape {
        extra_width: leaf_table_extra_width(columns.len()),
        columns,
        apportion: true,
    }
}

/// Classify `expr` by its logic type.
pub fn expression_shape(expr: &Expression) -> Result<ExpressionShape<'_>, UnreachableLogicTypeError> {
    let shape = match &expr.kind {
        ExpressionKind::Literal(literal) => ExpressionShape::Leaf {
            min_width: LITERAL_EXPRESSION_MIN_WIDTH + LITERAL_EXPRESSION_EXTRA_WIDTH,
            width: literal_width(literal.width),
        },
        ExpressionKind::Undefined => ExpressionShape::Leaf {
            min_width: DEFAULT_MIN_WIDTH,
            width: DEFAULT_MIN_WIDTH,
        },
        ExpressionKind::Context(ctx) => ExpressionShape::Container(ContainerShape {
            fixed_column: Some(ColumnSpec::resizable(
                CONTEXT_ENTRY_INFO_MIN_WIDTH,
                ctx.entry_info_width,
                CONTEXT_ENTRY_INFO_MIN_WIDTH,
            )),
            nested: expr.nested(),
            nested_min_width: CONTEXT_ENTRY_EXPRESSION_MIN_WIDTH,
            extra_width: CONTEXT_EXPRESSION_EXTRA_WIDTH,
        }),
        ExpressionKind::Invocation(inv) => ExpressionShape::Container(ContainerShape {
            fixed_column: Some(ColumnSpec::resizable(
                INVOCATION_PARAMETER_MIN_WIDTH,
                inv.entry_info_width,
                INVOCATION_PARAMETER_MIN_WIDTH,
            )),
            nested: expr.nested(),
            nested_min_width: INVOCATION_ARGUMENT_EXPRESSION_MIN_WIDTH,
            extra_width: INVOCATION_EXTRA_WIDTH,
        }),
        ExpressionKind::List(_) => ExpressionShape::Container(ContainerShape {
            fixed_column: Some(ColumnSpec::fixed(BEE_TABLE_ROW_INDEX_COLUMN_WIDTH)),
            nested: expr.nested(),
            nested_min_width: LIST_EXPRESSION_ITEM_MIN_WIDTH,
            extra_width: LIST_EXPRESSION_EXTRA_WIDTH,
        }),
        ExpressionKind::Function(function) => match function.function_kind {
            FunctionKind::Feel => ExpressionShape::Container(ContainerShape {
                fixed_column: None,
                nested: expr.nested(),
                nested_min_width: FUNCTION_EXPRESSION_MIN_WIDTH,
                extra_width: FUNCTION_EXPRESSION_EXTRA_WIDTH,
            }),
            FunctionKind::Java => ExpressionShape::Table(TableShape {
                columns: vec![
                    ColumnSpec::fixed(JAVA_FUNCTION_EXPRESSION_LABEL_MIN_WIDTH),
                    ColumnSpec::resizable(
                        JAVA_FUNCTION_EXPRESSION_VALUES_COLUMN_MIN_WIDTH,
                        function.values_width,
                        JAVA_FUNCTION_EXPRESSION_VALUES_COLUMN_DEFAULT_WIDTH,
                    ),
                ],
                extra_width: FUNCTION_EXPRESSION_EXTRA_WIDTH,
                apportion: false,
            }),
            FunctionKind::Pmml => ExpressionShape::Table(TableShape {
                columns: vec![
                    ColumnSpec::fixed(PMML_FUNCTION_EXPRESSION_LABEL_MIN_WIDTH),
                    ColumnSpec::resizable(
                        PMML_FUNCTION_EXPRESSION_VALUES_COLUMN_MIN_WIDTH,
                        function.values_width,
                        PMML_FUNCTION_EXPRESSION_VALUES_COLUMN_DEFAULT_WIDTH,
                    ),
                ],
                extra_width: FUNCTION_EXPRESSION_EXTRA_WIDTH,
                apportion: false,
            }),
        },
        ExpressionKind::Relation(relation) => ExpressionShape::Table(leaf_table(
            relation
                .columns
                .iter()
                .map(|c| {
                    ColumnSpec::resizable(
                        RELATION_EXPRESSION_COLUMN_MIN_WIDTH,
                        c.width,
                        RELATION_EXPRESSION_COLUMN_DEFAULT_WIDTH,
                    )
                })
                .collect(),
        )),
        ExpressionKind::DecisionTable(dt) => {
            let clause = |min, default| {
                move |c: &bee_core::TableColumn| ColumnSpec::resizable(min, c.width, default)
            };
            let columns = dt
                .input
                .iter()
                .map(clause(
                    DECISION_TABLE_INPUT_MIN_WIDTH,
                    DECISION_TABLE_INPUT_DEFAULT_WIDTH,
                ))
                .chain(dt.output.iter().map(clause(
                    DECISION_TABLE_OUTPUT_MIN_WIDTH,
                    DECISION_TABLE_OUTPUT_DEFAULT_WIDTH,
                )))
                .chain(dt.annotations.iter().map(clause(
                    DECISION_TABLE_ANNOTATION_MIN_WIDTH,
                    DECISION_TABLE_ANNOTATION_DEFAULT_WIDTH,
                )))
                .collect();
            ExpressionShape::Table(leaf_table(columns))
        }
        ExpressionKind::For(_) | ExpressionKind::Every(_) | ExpressionKind::Some(_) => {
            ExpressionShape::Container(ContainerShape {
                fixed_column: Some(ColumnSpec::fixed(ITERATOR_EXPRESSION_LABEL_COLUMN_WIDTH)),
                nested: expr.nested(),
                nested_min_width: ITERATOR_EXPRESSION_CLAUSE_COLUMN_MIN_WIDTH,
                extra_width: ITERATOR_EXPRESSION_EXTRA_WIDTH,
            })
        }
        ExpressionKind::Conditional(_) => ExpressionShape::Container(ContainerShape {
            fixed_column: Some(ColumnSpec::fixed(CONDITIONAL_EXPRESSION_LABEL_COLUMN_WIDTH)),
            nested: expr.nested(),
            nested_min_width: CONDITIONAL_EXPRESSION_CLAUSE_COLUMN_MIN_WIDTH,
            extra_width: CONDITIONAL_EXPRESSION_EXTRA_WIDTH,
        }),
        ExpressionKind::Filter(_) => ExpressionShape::Container(ContainerShape {
            fixed_column: None,
            nested: expr.nested(),
            nested_min_width: FILTER_EXPRESSION_MIN_WIDTH,
            extra_width: FILTER_EXPRESSION_EXTRA_WIDTH,
        }),
        ExpressionKind::Unknown(tag) => {
            return Err(UnreachableLogicTypeError {
                id: expr.id.clone(),
                logic_type: tag.clone(),
            });
        }
    };
    Ok(shape)
}

/// Mutable access to the declared width of column `index` of `expr`.
///
/// Indices follow [`ExpressionShape::columns`]. Returns `None` for columns
/// that have no stored width (fixed label and row-index columns) or that do
/// not exist.
pub fn declared_column_width_mut(expr: &mut Expression, index: usize) -> Option<&mut Option<u32>> {
    match &mut expr.kind {
        ExpressionKind::Context(ctx) if index == 0 => Some(&mut ctx.entry_info_width),
        ExpressionKind::Invocation(inv) if index == 0 => Some(&mut inv.entry_info_width),
        ExpressionKind::Relation(relation) => relation.columns.get_mut(index).map(|c| &mut c.width),
        ExpressionKind::DecisionTable(dt) => dt.column_mut(index).map(|c| &mut c.width),
        ExpressionKind::Function(function)
            if index == 1 && function.function_kind != FunctionKind::Feel =>
        {
            Some(&mut function.values_width)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bee_core::{ContextEntry, DecisionTableExpression, FunctionExpression, TableColumn};

    #[test]
    fn literal_is_leaf_with_extra() {
        let expr = Expression::literal("l");
        let shape = expression_shape(&expr).unwrap();
        assert_eq!(
            shape,
            ExpressionShape::Leaf {
                min_width: 102,
                width: 102,
            }
        );
    }

    #[test]
    fn relation_columns_default_and_clamp() {
        let rel = Expression::relation(
            "r",
            vec![
                TableColumn::new("a"),
                TableColumn::with_width("b", 40),
                TableColumn::with_width("c", 200),
            ],
        );
        let ExpressionShape::Table(table) = expression_shape(&rel).unwrap() else {
            panic!("relation is a table");
        };
        let widths: Vec<u32> = table.columns.iter().map(ColumnSpec::width).collect();
        assert_eq!(widths, [150, 100, 200]);
        assert_eq!(table.extra_width, 60 + 3 + 1);
        assert_eq!(table.min_width(), 300 + 64);
        assert!(table.apportion);
    }

    #[test]
    fn context_fixed_column_is_index_zero() {
        let ctx = Expression::context("c", vec![ContextEntry::new("a", Expression::literal("l"))]);
        let shape = expression_shape(&ctx).unwrap();
        let columns = shape.columns();
        assert_eq!(columns.len(), 1);
        assert!(columns[0].resizable);
        assert_eq!(shape.nested().len(), 1);
    }

    #[test]
    fn list_row_index_is_not_resizable() {
        let list = Expression::list("l", vec![Expression::undefined("u")]);
        let columns = expression_shape(&list).unwrap().columns();
        assert_eq!(columns, vec![ColumnSpec::fixed(BEE_TABLE_ROW_INDEX_COLUMN_WIDTH)]);
    }

    #[test]
    fn unknown_is_unreachable() {
        let expr = Expression::new("x", ExpressionKind::Unknown("sparkline".into()));
        let err = expression_shape(&expr).unwrap_err();
        assert_eq!(err.id.as_str(), "x");
        assert_eq!(err.logic_type, "sparkline");
    }

    #[test]
    fn declared_width_targets() {
        let mut dt = Expression::new(
            "dt",
            ExpressionKind::DecisionTable(DecisionTableExpression {
                input: vec![TableColumn::new("in")],
                output: vec![TableColumn::new("out")],
                annotations: vec![],
            }),
        );
        *declared_column_width_mut(&mut dt, 1).unwrap() = Some(180);
        let ExpressionKind::DecisionTable(inner) = &dt.kind else {
            unreachable!()
        };
        assert_eq!(inner.output[0].width, Some(180));
        assert!(declared_column_width_mut(&mut dt, 2).is_none());

        let mut java = Expression::new(
            "j",
            ExpressionKind::Function(FunctionExpression {
                function_kind: FunctionKind::Java,
                ..FunctionExpression::default()
            }),
        );
        assert!(declared_column_width_mut(&mut java, 0).is_none());
        assert!(declared_column_width_mut(&mut java, 1).is_some());

        let mut list = Expression::list("l", vec![]);
        assert!(declared_column_width_mut(&mut list, 0).is_none());
    }
}
