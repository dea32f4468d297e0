//! Pixel constants for every boxed expression table.
//!
//! `*_MIN_WIDTH` values are structural floors a column never shrinks below.
//! `*_DEFAULT_WIDTH` values are used when a column has no declared width.
//! `*_EXTRA_WIDTH` values account for borders and padding around the nested
//! area of a container table.

/// Floor for leaves with no better knowledge (undefined cells).
pub const DEFAULT_MIN_WIDTH: u32 = 100;

/// Row-index column rendered on the left of lists, relations and decision tables.
pub const BEE_TABLE_ROW_INDEX_COLUMN_WIDTH: u32 = 60;

// Literal
pub const LITERAL_EXPRESSION_MIN_WIDTH: u32 = 100;
pub const LITERAL_EXPRESSION_EXTRA_WIDTH: u32 = 2;

// Context
pub const CONTEXT_ENTRY_INFO_MIN_WIDTH: u32 = 120;
pub const CONTEXT_ENTRY_EXPRESSION_MIN_WIDTH: u32 = 120;
pub const CONTEXT_EXPRESSION_EXTRA_WIDTH: u32 = 2;

// Invocation
pub const INVOCATION_PARAMETER_MIN_WIDTH: u32 = 120;
pub const INVOCATION_ARGUMENT_EXPRESSION_MIN_WIDTH: u32 = 120;
pub const INVOCATION_EXTRA_WIDTH: u32 = 2;

// List
pub const LIST_EXPRESSION_ITEM_MIN_WIDTH: u32 = 100;
pub const LIST_EXPRESSION_EXTRA_WIDTH: u32 = 2;

// Relation
pub const RELATION_EXPRESSION_COLUMN_MIN_WIDTH: u32 = 100;
pub const RELATION_EXPRESSION_COLUMN_DEFAULT_WIDTH: u32 = 150;

// Decision table
pub const DECISION_TABLE_INPUT_MIN_WIDTH: u32 = 100;
pub const DECISION_TABLE_INPUT_DEFAULT_WIDTH: u32 = 150;
pub const DECISION_TABLE_OUTPUT_MIN_WIDTH: u32 = 100;
pub const DECISION_TABLE_OUTPUT_DEFAULT_WIDTH: u32 = 150;
pub const DECISION_TABLE_ANNOTATION_MIN_WIDTH: u32 = 100;
pub const DECISION_TABLE_ANNOTATION_DEFAULT_WIDTH: u32 = 240;

// Function
pub const FUNCTION_EXPRESSION_MIN_WIDTH: u32 = 200;
pub const FUNCTION_EXPRESSION_EXTRA_WIDTH: u32 = 2;
pub const JAVA_FUNCTION_EXPRESSION_LABEL_MIN_WIDTH: u32 = 130;
pub const JAVA_FUNCTION_EXPRESSION_VALUES_COLUMN_MIN_WIDTH: u32 = 120;
pub const JAVA_FUNCTION_EXPRESSION_VALUES_COLUMN_DEFAULT_WIDTH: u32 = 200;
pub const PMML_FUNCTION_EXPRESSION_LABEL_MIN_WIDTH: u32 = 130;
pub const PMML_FUNCTION_EXPRESSION_VALUES_COLUMN_MIN_WIDTH: u32 = 120;
pub const PMML_FUNCTION_EXPRESSION_VALUES_COLUMN_DEFAULT_WIDTH: u32 = 200;

// For / Every / Some
pub const ITERATOR_EXPRESSION_LABEL_COLUMN_WIDTH: u32 = 100;
pub const ITERATOR_EXPRESSION_CLAUSE_COLUMN_MIN_WIDTH: u32 = 120;
pub const ITERATOR_EXPRESSION_EXTRA_WIDTH: u32 = 2;

// Conditional
pub const CONDITIONAL_EXPRESSION_LABEL_COLUMN_WIDTH: u32 = 80;
pub const CONDITIONAL_EXPRESSION_CLAUSE_COLUMN_MIN_WIDTH: u32 = 120;
pub const CONDITIONAL_EXPRESSION_EXTRA_WIDTH: u32 = 2;

// Filter
pub const FILTER_EXPRESSION_MIN_WIDTH: u32 = 120;
pub const FILTER_EXPRESSION_EXTRA_WIDTH: u32 = 2;

/// Border allowance of a leaf table with `columns` data columns: the
/// row-index column plus one border per column and a closing border.
#[must_use]
pub const fn leaf_table_extra_width(columns: usize) -> u32 {
    BEE_TABLE_ROW_INDEX_COLUMN_WIDTH + columns as u32 + 1
}
