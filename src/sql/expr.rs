//! Expression AST - the core of SQL expression building.
//!
//! This module provides a strongly-typed AST for SQL expressions
//! with exhaustive pattern matching enforced by the compiler.
//! Rendering lives in the translator; these types only describe the tree.

use serde::{Deserialize, Serialize};

use super::query::{QueryPart, QuerySpec};
use super::token::Token;

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
///
/// Every variant must be handled by the translator - the compiler enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Column reference: optional_qualifier.name
    Column {
        #[serde(default)]
        qualifier: Option<String>,
        name: String,
    },

    /// Literal values
    Literal(Literal),

    /// JDBC-style parameter marker, rendered as `?`.
    Parameter { label: String },

    /// Row-value constructor: (a, b, ...)
    Tuple(Vec<Expr>),

    /// Binary comparison: lhs op rhs
    Comparison {
        lhs: Box<Expr>,
        op: ComparisonOperator,
        rhs: Box<Expr>,
    },

    /// Quantified subquery operand: ALL (SELECT ...) / ANY (SELECT ...)
    Quantified {
        quantifier: Quantifier,
        subquery: Box<QueryPart>,
    },

    /// AND / OR over any number of predicates
    Junction {
        kind: JunctionKind,
        items: Vec<Expr>,
    },

    /// NOT (expr)
    Not(Box<Expr>),

    /// Arithmetic: lhs op rhs
    Arithmetic {
        lhs: Box<Expr>,
        op: ArithmeticOperator,
        rhs: Box<Expr>,
    },

    /// String concatenation of all parts
    Concat(Vec<Expr>),

    /// Function call: name(args...)
    Function {
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        distinct: bool,
    },

    /// CASE WHEN... THEN... ELSE... END
    Case {
        #[serde(default)]
        operand: Option<Box<Expr>>,
        when_clauses: Vec<(Expr, Expr)>,
        #[serde(default)]
        else_clause: Option<Box<Expr>>,
    },

    /// IN: expr IN (values...)
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        #[serde(default)]
        negated: bool,
    },

    /// IN subquery: expr IN (SELECT ...)
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<QueryPart>,
        #[serde(default)]
        negated: bool,
    },

    /// EXISTS (SELECT ...)
    Exists {
        subquery: Box<QueryPart>,
        #[serde(default)]
        negated: bool,
    },

    /// BETWEEN: expr BETWEEN low AND high
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        #[serde(default)]
        negated: bool,
    },

    /// IS NULL / IS NOT NULL
    IsNull {
        expr: Box<Expr>,
        #[serde(default)]
        negated: bool,
    },

    /// LIKE with optional ESCAPE character
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        #[serde(default)]
        escape: Option<char>,
        #[serde(default)]
        negated: bool,
    },

    /// CAST(expr AS target)
    Cast { expr: Box<Expr>, target: String },

    /// Position of `needle` inside `haystack` (1-based, 0 when absent)
    Position {
        needle: Box<Expr>,
        haystack: Box<Expr>,
    },

    /// Scalar subquery: (SELECT ...)
    Subquery(Box<QueryPart>),

    /// ROLLUP(...) / CUBE(...) grouping summarization
    Summarization {
        kind: SummarizationKind,
        groupings: Vec<Expr>,
    },

    /// Window function expression.
    ///
    /// Example: `SUM(amount) OVER (PARTITION BY region ORDER BY date ROWS UNBOUNDED PRECEDING)`
    Window {
        /// The function being windowed (usually Expr::Function)
        function: Box<Expr>,
        /// PARTITION BY expressions
        #[serde(default)]
        partition_by: Vec<Expr>,
        /// ORDER BY within window
        #[serde(default)]
        order_by: Vec<SortSpecification>,
        /// Optional frame specification
        #[serde(default)]
        frame: Option<WindowFrame>,
    },

    /// Wildcard: * or qualifier.*
    Star {
        #[serde(default)]
        qualifier: Option<String>,
    },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
}

/// Comparison operators, including the null-safe distinct predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// IS DISTINCT FROM
    DistinctFrom,
    /// IS NOT DISTINCT FROM
    NotDistinctFrom,
}

impl ComparisonOperator {
    /// The operator that holds exactly when this one does not.
    pub fn negated(self) -> Self {
        use ComparisonOperator::*;
        match self {
            Equal => NotEqual,
            NotEqual => Equal,
            LessThan => GreaterThanOrEqual,
            LessThanOrEqual => GreaterThan,
            GreaterThan => LessThanOrEqual,
            GreaterThanOrEqual => LessThan,
            DistinctFrom => NotDistinctFrom,
            NotDistinctFrom => DistinctFrom,
        }
    }

    /// The operator to use when the operands swap sides.
    pub fn invert(self) -> Self {
        use ComparisonOperator::*;
        match self {
            LessThan => GreaterThan,
            LessThanOrEqual => GreaterThanOrEqual,
            GreaterThan => LessThan,
            GreaterThanOrEqual => LessThanOrEqual,
            other => other,
        }
    }

    /// Strict form of an ordering operator (`<=` becomes `<`).
    pub fn sharper(self) -> Self {
        use ComparisonOperator::*;
        match self {
            LessThanOrEqual => LessThan,
            GreaterThanOrEqual => GreaterThan,
            other => other,
        }
    }

    /// Inclusive form of an ordering operator (`<` becomes `<=`).
    pub fn broader(self) -> Self {
        use ComparisonOperator::*;
        match self {
            LessThan => LessThanOrEqual,
            GreaterThan => GreaterThanOrEqual,
            other => other,
        }
    }

    pub fn is_ordering(self) -> bool {
        use ComparisonOperator::*;
        matches!(
            self,
            LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual
        )
    }

    pub fn is_distinct_predicate(self) -> bool {
        matches!(
            self,
            ComparisonOperator::DistinctFrom | ComparisonOperator::NotDistinctFrom
        )
    }

    /// Tokens for the operator, without surrounding spaces.
    pub fn tokens(self) -> Vec<Token> {
        use ComparisonOperator::*;
        match self {
            Equal => vec![Token::Eq],
            NotEqual => vec![Token::Ne],
            LessThan => vec![Token::Lt],
            LessThanOrEqual => vec![Token::Lte],
            GreaterThan => vec![Token::Gt],
            GreaterThanOrEqual => vec![Token::Gte],
            DistinctFrom => vec![Token::Is, Token::Space, Token::DistinctFrom],
            NotDistinctFrom => vec![
                Token::Is,
                Token::Space,
                Token::Not,
                Token::Space,
                Token::DistinctFrom,
            ],
        }
    }
}

/// ALL / ANY quantifier for subquery comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantifier {
    All,
    Any,
}

/// Junction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JunctionKind {
    And,
    Or,
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOperator {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
}

impl ArithmeticOperator {
    pub fn token(self) -> Token {
        match self {
            ArithmeticOperator::Plus => Token::Plus,
            ArithmeticOperator::Minus => Token::Minus,
            ArithmeticOperator::Mul => Token::Mul,
            ArithmeticOperator::Div => Token::Div,
            ArithmeticOperator::Mod => Token::Mod,
        }
    }
}

/// Grouping summarization kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarizationKind {
    Rollup,
    Cube,
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort direction (shared by query ORDER BY and window ORDER BY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// NULLS FIRST / NULLS LAST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPrecedence {
    First,
    Last,
}

/// ORDER BY item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpecification {
    pub expr: Expr,
    #[serde(default)]
    pub direction: Option<SortDirection>,
    #[serde(default)]
    pub nulls: Option<NullPrecedence>,
}

impl SortSpecification {
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            direction: None,
            nulls: None,
        }
    }

    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: Some(SortDirection::Asc),
            nulls: None,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: Some(SortDirection::Desc),
            nulls: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullPrecedence::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullPrecedence::Last);
        self
    }
}

// =============================================================================
// Window Function Types
// =============================================================================

/// Window frame specification.
///
/// Examples:
/// - `ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW`
/// - `RANGE BETWEEN 1 PRECEDING AND 1 FOLLOWING`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFrame {
    pub kind: WindowFrameKind,
    pub start: WindowFrameBound,
    #[serde(default)]
    pub end: Option<WindowFrameBound>,
}

impl WindowFrame {
    /// Create a frame with just a start bound.
    pub fn new(kind: WindowFrameKind, start: WindowFrameBound) -> Self {
        Self {
            kind,
            start,
            end: None,
        }
    }

    /// Create a frame with BETWEEN start AND end.
    pub fn between(kind: WindowFrameKind, start: WindowFrameBound, end: WindowFrameBound) -> Self {
        Self {
            kind,
            start,
            end: Some(end),
        }
    }

    /// ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
    pub fn rows_to_current() -> Self {
        Self::between(
            WindowFrameKind::Rows,
            WindowFrameBound::UnboundedPreceding,
            WindowFrameBound::CurrentRow,
        )
    }
}

/// Frame type: ROWS, RANGE, or GROUPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFrameKind {
    /// ROWS - physical row offsets
    Rows,
    /// RANGE - logical value ranges
    Range,
    /// GROUPS - peer groups
    Groups,
}

/// Frame boundary specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFrameBound {
    UnboundedPreceding,
    Preceding(u64),
    CurrentRow,
    Following(u64),
    UnboundedFollowing,
}

// =============================================================================
// Inspection
// =============================================================================

impl Expr {
    /// Elements of a row-value constructor, if this is one.
    pub fn as_tuple(&self) -> Option<&[Expr]> {
        match self {
            Expr::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }
}

// =============================================================================
// Builder Functions
// =============================================================================

/// Create a column reference.
pub fn col(name: &str) -> Expr {
    Expr::Column {
        qualifier: None,
        name: name.into(),
    }
}

/// Create a qualified column reference.
pub fn table_col(qualifier: &str, name: &str) -> Expr {
    Expr::Column {
        qualifier: Some(qualifier.into()),
        name: name.into(),
    }
}

pub fn lit_int(n: i64) -> Expr {
    Expr::Literal(Literal::Integer(n))
}

pub fn lit_float(f: f64) -> Expr {
    Expr::Literal(Literal::Float(f))
}

pub fn lit_str(s: &str) -> Expr {
    Expr::Literal(Literal::String(s.into()))
}

pub fn lit_bool(b: bool) -> Expr {
    Expr::Literal(Literal::Boolean(b))
}

pub fn lit_null() -> Expr {
    Expr::Literal(Literal::Null)
}

/// Create a parameter marker.
pub fn param(label: &str) -> Expr {
    Expr::Parameter {
        label: label.into(),
    }
}

/// Create a row-value constructor.
pub fn tuple(items: Vec<Expr>) -> Expr {
    Expr::Tuple(items)
}

pub fn star() -> Expr {
    Expr::Star { qualifier: None }
}

pub fn table_star(qualifier: &str) -> Expr {
    Expr::Star {
        qualifier: Some(qualifier.into()),
    }
}

/// Generic function call.
pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Function {
        name: name.into(),
        args,
        distinct: false,
    }
}

pub fn count_star() -> Expr {
    func("COUNT", vec![star()])
}

pub fn sum(expr: Expr) -> Expr {
    func("SUM", vec![expr])
}

pub fn max(expr: Expr) -> Expr {
    func("MAX", vec![expr])
}

pub fn row_number() -> Expr {
    func("ROW_NUMBER", vec![])
}

/// AND over all predicates.
pub fn and_all(items: Vec<Expr>) -> Expr {
    Expr::Junction {
        kind: JunctionKind::And,
        items,
    }
}

/// OR over all predicates.
pub fn or_all(items: Vec<Expr>) -> Expr {
    Expr::Junction {
        kind: JunctionKind::Or,
        items,
    }
}

pub fn rollup(groupings: Vec<Expr>) -> Expr {
    Expr::Summarization {
        kind: SummarizationKind::Rollup,
        groupings,
    }
}

pub fn cube(groupings: Vec<Expr>) -> Expr {
    Expr::Summarization {
        kind: SummarizationKind::Cube,
        groupings,
    }
}

pub fn exists(subquery: impl Into<QueryPart>) -> Expr {
    Expr::Exists {
        subquery: Box::new(subquery.into()),
        negated: false,
    }
}

pub fn all(subquery: impl Into<QueryPart>) -> Expr {
    Expr::Quantified {
        quantifier: Quantifier::All,
        subquery: Box::new(subquery.into()),
    }
}

pub fn any(subquery: impl Into<QueryPart>) -> Expr {
    Expr::Quantified {
        quantifier: Quantifier::Any,
        subquery: Box::new(subquery.into()),
    }
}

pub fn case_when(when_clauses: Vec<(Expr, Expr)>, else_clause: Option<Expr>) -> Expr {
    Expr::Case {
        operand: None,
        when_clauses,
        else_clause: else_clause.map(Box::new),
    }
}

pub fn position(needle: Expr, haystack: Expr) -> Expr {
    Expr::Position {
        needle: Box::new(needle),
        haystack: Box::new(haystack),
    }
}

// =============================================================================
// Window Builder
// =============================================================================

/// Builder for creating window function expressions.
#[derive(Debug, Clone)]
#[must_use = "WindowBuilder has no effect until build() is called"]
pub struct WindowBuilder {
    function: Expr,
    partition_by: Vec<Expr>,
    order_by: Vec<SortSpecification>,
    frame: Option<WindowFrame>,
}

impl WindowBuilder {
    /// Create a new window builder for the given function.
    pub fn new(function: Expr) -> Self {
        Self {
            function,
            partition_by: vec![],
            order_by: vec![],
            frame: None,
        }
    }

    /// Add PARTITION BY expressions.
    pub fn partition_by(mut self, exprs: Vec<Expr>) -> Self {
        self.partition_by = exprs;
        self
    }

    /// Add ORDER BY expressions.
    pub fn order_by(mut self, exprs: Vec<SortSpecification>) -> Self {
        self.order_by = exprs;
        self
    }

    /// Set the window frame.
    pub fn frame(mut self, frame: WindowFrame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Build the window function expression.
    ///
    /// A frame without ORDER BY is rejected at translation time.
    pub fn build(self) -> Expr {
        Expr::Window {
            function: Box::new(self.function),
            partition_by: self.partition_by,
            order_by: self.order_by,
            frame: self.frame,
        }
    }
}

/// Extension trait for adding OVER clause to expressions.
pub trait WindowExt: Sized {
    /// Start building a window function with OVER clause.
    fn over(self) -> WindowBuilder;
}

impl WindowExt for Expr {
    fn over(self) -> WindowBuilder {
        WindowBuilder::new(self)
    }
}

// =============================================================================
// Expression Builder Trait
// =============================================================================

/// Extension trait for building expressions fluently.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn compare(self, op: ComparisonOperator, other: impl Into<Expr>) -> Expr {
        Expr::Comparison {
            lhs: Box::new(self.into_expr()),
            op,
            rhs: Box::new(other.into()),
        }
    }

    // Comparison operators
    fn eq(self, other: impl Into<Expr>) -> Expr {
        self.compare(ComparisonOperator::Equal, other)
    }

    fn ne(self, other: impl Into<Expr>) -> Expr {
        self.compare(ComparisonOperator::NotEqual, other)
    }

    fn gt(self, other: impl Into<Expr>) -> Expr {
        self.compare(ComparisonOperator::GreaterThan, other)
    }

    fn gte(self, other: impl Into<Expr>) -> Expr {
        self.compare(ComparisonOperator::GreaterThanOrEqual, other)
    }

    fn lt(self, other: impl Into<Expr>) -> Expr {
        self.compare(ComparisonOperator::LessThan, other)
    }

    fn lte(self, other: impl Into<Expr>) -> Expr {
        self.compare(ComparisonOperator::LessThanOrEqual, other)
    }

    fn distinct_from(self, other: impl Into<Expr>) -> Expr {
        self.compare(ComparisonOperator::DistinctFrom, other)
    }

    fn not_distinct_from(self, other: impl Into<Expr>) -> Expr {
        self.compare(ComparisonOperator::NotDistinctFrom, other)
    }

    // Logical operators
    fn and(self, other: impl Into<Expr>) -> Expr {
        and_all(vec![self.into_expr(), other.into()])
    }

    fn or(self, other: impl Into<Expr>) -> Expr {
        or_all(vec![self.into_expr(), other.into()])
    }

    fn not(self) -> Expr {
        Expr::Not(Box::new(self.into_expr()))
    }

    // Arithmetic operators
    fn add(self, other: impl Into<Expr>) -> Expr {
        Expr::Arithmetic {
            lhs: Box::new(self.into_expr()),
            op: ArithmeticOperator::Plus,
            rhs: Box::new(other.into()),
        }
    }

    fn sub(self, other: impl Into<Expr>) -> Expr {
        Expr::Arithmetic {
            lhs: Box::new(self.into_expr()),
            op: ArithmeticOperator::Minus,
            rhs: Box::new(other.into()),
        }
    }

    fn mul(self, other: impl Into<Expr>) -> Expr {
        Expr::Arithmetic {
            lhs: Box::new(self.into_expr()),
            op: ArithmeticOperator::Mul,
            rhs: Box::new(other.into()),
        }
    }

    // String operators
    fn like(self, pattern: impl Into<Expr>) -> Expr {
        Expr::Like {
            expr: Box::new(self.into_expr()),
            pattern: Box::new(pattern.into()),
            escape: None,
            negated: false,
        }
    }

    /// LIKE with ESCAPE clause for matching literal `%` and `_` characters.
    fn like_escape(self, pattern: impl Into<Expr>, escape_char: char) -> Expr {
        Expr::Like {
            expr: Box::new(self.into_expr()),
            pattern: Box::new(pattern.into()),
            escape: Some(escape_char),
            negated: false,
        }
    }

    fn concat(self, other: impl Into<Expr>) -> Expr {
        match self.into_expr() {
            Expr::Concat(mut parts) => {
                parts.push(other.into());
                Expr::Concat(parts)
            }
            first => Expr::Concat(vec![first, other.into()]),
        }
    }

    fn cast(self, target: &str) -> Expr {
        Expr::Cast {
            expr: Box::new(self.into_expr()),
            target: target.into(),
        }
    }

    // NULL checks
    #[allow(clippy::wrong_self_convention)]
    fn is_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self.into_expr()),
            negated: false,
        }
    }

    #[allow(clippy::wrong_self_convention)]
    fn is_not_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self.into_expr()),
            negated: true,
        }
    }

    // IN operator
    fn in_list(self, list: Vec<Expr>) -> Expr {
        Expr::InList {
            expr: Box::new(self.into_expr()),
            list,
            negated: false,
        }
    }

    fn not_in_list(self, list: Vec<Expr>) -> Expr {
        Expr::InList {
            expr: Box::new(self.into_expr()),
            list,
            negated: true,
        }
    }

    fn in_subquery(self, subquery: impl Into<QueryPart>) -> Expr {
        Expr::InSubquery {
            expr: Box::new(self.into_expr()),
            subquery: Box::new(subquery.into()),
            negated: false,
        }
    }

    fn not_in_subquery(self, subquery: impl Into<QueryPart>) -> Expr {
        Expr::InSubquery {
            expr: Box::new(self.into_expr()),
            subquery: Box::new(subquery.into()),
            negated: true,
        }
    }

    // BETWEEN operator
    fn between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
        Expr::Between {
            expr: Box::new(self.into_expr()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: false,
        }
    }

    /// Alias this expression (for SELECT list).
    fn alias(self, name: &str) -> super::query::SqlSelection {
        super::query::SqlSelection::new(self.into_expr()).with_alias(name)
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        lit_int(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        lit_int(n as i64)
    }
}

impl From<f64> for Expr {
    fn from(f: f64) -> Self {
        lit_float(f)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        lit_str(s)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        lit_bool(b)
    }
}

impl From<QuerySpec> for Expr {
    /// Convert a query specification into a scalar subquery expression.
    fn from(spec: QuerySpec) -> Self {
        Expr::Subquery(Box::new(QueryPart::Spec(spec)))
    }
}
