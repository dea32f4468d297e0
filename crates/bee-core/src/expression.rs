#![forbid(unsafe_code)]

//! Boxed expression tree.
//!
//! An [`Expression`] is one node of a DMN boxed expression: a stable
//! [`ExpressionId`] plus an [`ExpressionKind`] carrying the node's nested
//! child expressions and the declared widths of its non-expression columns.
//!
//! Declared widths are `Option<u32>`: `None` means the column was never
//! resized by the user and the per-logic-type default applies.
//!
//! # Serialization
//!
//! Nodes serialize with an internal `logicType` tag and camelCase fields:
//!
//! ```json
//! {
//!   "id": "ctx",
//!   "logicType": "context",
//!   "entryInfoWidth": 150,
//!   "entries": [
//!     { "name": "a", "expression": { "id": "lit", "logicType": "literal" } }
//!   ]
//! }
//! ```
//!
//! A `logicType` this crate does not know deserializes to
//! [`ExpressionKind::Unknown`] carrying the raw tag, so width computations
//! can reject it loudly (naming the tag) instead of the parser dropping the
//! node. Such nodes serialize back with their original tag. A known tag with
//! a malformed payload is a deserialization error.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// ExpressionId
// ============================================================================

/// Identifier of an expression, unique within one editor instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpressionId(String);

impl ExpressionId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpressionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ExpressionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// LogicType
// ============================================================================

/// Fieldless discriminant of [`ExpressionKind`], handy for logging and keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicType {
    Literal,
    Context,
    DecisionTable,
    Relation,
    Invocation,
    List,
    Function,
    For,
    Every,
    Some,
    Conditional,
    Filter,
    Undefined,
    Unknown,
}

impl LogicType {
    /// Stable lowercase name, identical to the serialized `logicType` tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Context => "context",
            Self::DecisionTable => "decisionTable",
            Self::Relation => "relation",
            Self::Invocation => "invocation",
            Self::List => "list",
            Self::Function => "function",
            Self::For => "for",
            Self::Every => "every",
            Self::Some => "some",
            Self::Conditional => "conditional",
            Self::Filter => "filter",
            Self::Undefined => "undefined",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a serialized `logicType` tag. `None` for tags this crate does
    /// not know, including `"unknown"` itself.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        const KNOWN: [LogicType; 13] = [
            LogicType::Literal,
            LogicType::Context,
            LogicType::DecisionTable,
            LogicType::Relation,
            LogicType::Invocation,
            LogicType::List,
            LogicType::Function,
            LogicType::For,
            LogicType::Every,
            LogicType::Some,
            LogicType::Conditional,
            LogicType::Filter,
            LogicType::Undefined,
        ];
        KNOWN.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for LogicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Columns and entries
// ============================================================================

/// A non-expression table column (relation column, decision table clause,
/// annotation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl TableColumn {
    /// A column that was never resized.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: None,
        }
    }

    /// A column with a declared width.
    #[must_use]
    pub fn with_width(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width: Some(width),
        }
    }
}

/// A named binding: a context entry or an invocation parameter binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntry {
    #[serde(default)]
    pub name: String,
    pub expression: Expression,
}

impl ContextEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, expression: Expression) -> Self {
        Self {
            name: name.into(),
            expression,
        }
    }
}

// ============================================================================
// Logic type payloads
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextExpression {
    /// Width of the entry-info (name/type) column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_info_width: Option<u32>,
    #[serde(default)]
    pub entries: Vec<ContextEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Box<Expression>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTableExpression {
    #[serde(default)]
    pub input: Vec<TableColumn>,
    #[serde(default)]
    pub output: Vec<TableColumn>,
    #[serde(default)]
    pub annotations: Vec<TableColumn>,
}

impl DecisionTableExpression {
    /// All columns in display order: inputs, outputs, annotations.
    pub fn columns(&self) -> impl Iterator<Item = &TableColumn> {
        self.input
            .iter()
            .chain(self.output.iter())
            .chain(self.annotations.iter())
    }

    /// Mutable access to the column at display index `index`.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut TableColumn> {
        self.input
            .iter_mut()
            .chain(self.output.iter_mut())
            .chain(self.annotations.iter_mut())
            .nth(index)
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.input.len() + self.output.len() + self.annotations.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationExpression {
    #[serde(default)]
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationExpression {
    #[serde(default)]
    pub invoked_function: String,
    /// Width of the parameter-name column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_info_width: Option<u32>,
    #[serde(default)]
    pub bindings: Vec<ContextEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExpression {
    #[serde(default)]
    pub items: Vec<Expression>,
}

/// Implementation kind of a function definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionKind {
    /// Body is a nested boxed expression.
    #[default]
    Feel,
    /// Class name and method signature table.
    Java,
    /// Document and model name table.
    Pmml,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionExpression {
    #[serde(default)]
    pub function_kind: FunctionKind,
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Nested body, FEEL functions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Box<Expression>>,
    /// Width of the value column, Java and PMML functions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_width: Option<u32>,
}

/// Payload shared by `for`, `every` and `some`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IteratorExpression {
    #[serde(default)]
    pub variable: String,
    #[serde(rename = "in")]
    pub in_expression: Box<Expression>,
    /// `return` for `for`, `satisfies` for the quantifiers.
    #[serde(rename = "return", alias = "satisfies")]
    pub body: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalExpression {
    #[serde(rename = "if")]
    pub condition: Box<Expression>,
    #[serde(rename = "then")]
    pub then_branch: Box<Expression>,
    #[serde(rename = "else")]
    pub else_branch: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterExpression {
    #[serde(rename = "in")]
    pub in_expression: Box<Expression>,
    #[serde(rename = "match")]
    pub match_expression: Box<Expression>,
}

// ============================================================================
// ExpressionKind
// ============================================================================

/// Logic-type specific payload of an [`Expression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "logicType", rename_all = "camelCase")]
pub enum ExpressionKind {
    Literal(LiteralExpression),
    Context(ContextExpression),
    DecisionTable(DecisionTableExpression),
    Relation(RelationExpression),
    Invocation(InvocationExpression),
    List(ListExpression),
    Function(FunctionExpression),
    For(IteratorExpression),
    Every(IteratorExpression),
    Some(IteratorExpression),
    Conditional(ConditionalExpression),
    Filter(FilterExpression),
    Undefined,
    /// A logic type this crate has no rules for, with its raw tag.
    #[serde(skip)]
    Unknown(String),
}

impl ExpressionKind {
    #[must_use]
    pub const fn logic_type(&self) -> LogicType {
        match self {
            Self::Literal(_) => LogicType::Literal,
            Self::Context(_) => LogicType::Context,
            Self::DecisionTable(_) => LogicType::DecisionTable,
            Self::Relation(_) => LogicType::Relation,
            Self::Invocation(_) => LogicType::Invocation,
            Self::List(_) => LogicType::List,
            Self::Function(_) => LogicType::Function,
            Self::For(_) => LogicType::For,
            Self::Every(_) => LogicType::Every,
            Self::Some(_) => LogicType::Some,
            Self::Conditional(_) => LogicType::Conditional,
            Self::Filter(_) => LogicType::Filter,
            Self::Undefined => LogicType::Undefined,
            Self::Unknown(_) => LogicType::Unknown,
        }
    }
}

// ============================================================================
// Expression
// ============================================================================

/// One node of a boxed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub id: ExpressionId,
    pub kind: ExpressionKind,
}

#[derive(Serialize)]
struct KnownRef<'a> {
    id: &'a ExpressionId,
    #[serde(flatten)]
    kind: &'a ExpressionKind,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KindWire {
    Known(ExpressionKind),
    Other {
        #[serde(rename = "logicType")]
        logic_type: String,
    },
}

#[derive(Deserialize)]
struct ExpressionWire {
    id: ExpressionId,
    #[serde(flatten)]
    kind: KindWire,
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.kind {
            ExpressionKind::Unknown(tag) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("id", &self.id)?;
                map.serialize_entry("logicType", tag)?;
                map.end()
            }
            kind => KnownRef { id: &self.id, kind }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ExpressionWire { id, kind } = ExpressionWire::deserialize(deserializer)?;
        let kind = match kind {
            KindWire::Known(kind) => kind,
            KindWire::Other { logic_type } => {
                if LogicType::from_tag(&logic_type).is_some() {
                    return Err(serde::de::Error::custom(format!(
                        "malformed '{logic_type}' expression '{id}'"
                    )));
                }
                ExpressionKind::Unknown(logic_type)
            }
        };
        Ok(Self { id, kind })
    }
}

impl Expression {
    #[must_use]
    pub fn new(id: impl Into<ExpressionId>, kind: ExpressionKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// An empty cell waiting for a logic type to be picked.
    #[must_use]
    pub fn undefined(id: impl Into<ExpressionId>) -> Self {
        Self::new(id, ExpressionKind::Undefined)
    }

    /// A literal expression with no declared width.
    #[must_use]
    pub fn literal(id: impl Into<ExpressionId>) -> Self {
        Self::new(id, ExpressionKind::Literal(LiteralExpression::default()))
    }

    /// A context with the given entries and no result row.
    #[must_use]
    pub fn context(id: impl Into<ExpressionId>, entries: Vec<ContextEntry>) -> Self {
        Self::new(
            id,
            ExpressionKind::Context(ContextExpression {
                entries,
                ..ContextExpression::default()
            }),
        )
    }

    #[must_use]
    pub fn relation(id: impl Into<ExpressionId>, columns: Vec<TableColumn>) -> Self {
        Self::new(id, ExpressionKind::Relation(RelationExpression { columns }))
    }

    #[must_use]
    pub fn list(id: impl Into<ExpressionId>, items: Vec<Expression>) -> Self {
        Self::new(id, ExpressionKind::List(ListExpression { items }))
    }

    #[must_use]
    pub fn id(&self) -> &ExpressionId {
        &self.id
    }

    #[must_use]
    pub const fn logic_type(&self) -> LogicType {
        self.kind.logic_type()
    }

    /// Direct nested child expressions, in display order.
    ///
    /// Tables whose cells are plain text (relations, decision tables) and
    /// leaves have none.
    #[must_use]
    pub fn nested(&self) -> Vec<&Expression> {
        match &self.kind {
            ExpressionKind::Context(ctx) => ctx
                .entries
                .iter()
                .map(|entry| &entry.expression)
                .chain(ctx.result.as_deref())
                .collect(),
            ExpressionKind::Invocation(inv) => {
                inv.bindings.iter().map(|entry| &entry.expression).collect()
            }
            ExpressionKind::List(list) => list.items.iter().collect(),
            ExpressionKind::Function(function) => function.body.as_deref().into_iter().collect(),
            ExpressionKind::For(it) | ExpressionKind::Every(it) | ExpressionKind::Some(it) => {
                vec![&*it.in_expression, &*it.body]
            }
            ExpressionKind::Conditional(cond) => {
                vec![&*cond.condition, &*cond.then_branch, &*cond.else_branch]
            }
            ExpressionKind::Filter(filter) => {
                vec![&*filter.in_expression, &*filter.match_expression]
            }
            ExpressionKind::Literal(_)
            | ExpressionKind::DecisionTable(_)
            | ExpressionKind::Relation(_)
            | ExpressionKind::Undefined
            | ExpressionKind::Unknown(_) => Vec::new(),
        }
    }

    /// Mutable counterpart of [`nested`](Self::nested).
    pub fn nested_mut(&mut self) -> Vec<&mut Expression> {
        match &mut self.kind {
            ExpressionKind::Context(ctx) => ctx
                .entries
                .iter_mut()
                .map(|entry| &mut entry.expression)
                .chain(ctx.result.as_deref_mut())
                .collect(),
            ExpressionKind::Invocation(inv) => inv
                .bindings
                .iter_mut()
                .map(|entry| &mut entry.expression)
                .collect(),
            ExpressionKind::List(list) => list.items.iter_mut().collect(),
            ExpressionKind::Function(function) => {
                function.body.as_deref_mut().into_iter().collect()
            }
            ExpressionKind::For(it) | ExpressionKind::Every(it) | ExpressionKind::Some(it) => {
                vec![&mut *it.in_expression, &mut *it.body]
            }
            ExpressionKind::Conditional(cond) => vec![
                &mut *cond.condition,
                &mut *cond.then_branch,
                &mut *cond.else_branch,
            ],
            ExpressionKind::Filter(filter) => {
                vec![&mut *filter.in_expression, &mut *filter.match_expression]
            }
            ExpressionKind::Literal(_)
            | ExpressionKind::DecisionTable(_)
            | ExpressionKind::Relation(_)
            | ExpressionKind::Undefined
            | ExpressionKind::Unknown(_) => Vec::new(),
        }
    }

    /// All nodes of the tree in DFS pre-order, starting with `self`.
    #[must_use]
    pub fn walk(&self) -> Vec<&Expression> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            // Reverse so the first child is visited first.
            stack.extend(node.nested().into_iter().rev());
        }
        out
    }

    /// Find a node by id anywhere in the tree.
    #[must_use]
    pub fn find(&self, id: &ExpressionId) -> Option<&Expression> {
        self.walk().into_iter().find(|node| &node.id == id)
    }

    /// Find a node by id anywhere in the tree, mutably.
    pub fn find_mut(&mut self, id: &ExpressionId) -> Option<&mut Expression> {
        if &self.id == id {
            return Some(self);
        }
        self.nested_mut()
            .into_iter()
            .find_map(|child| child.find_mut(id))
    }

    /// Number of nodes in the tree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .nested()
            .into_iter()
            .map(Expression::node_count)
            .sum::<usize>()
    }
}

// ============================================================================
// Tests
// ============================================================================
