//! Query AST - query specifications, set-operation groups and CTEs,
//! with a fluent builder API.

use serde::{Deserialize, Serialize};

use super::expr::{Expr, Literal, SortSpecification};

// =============================================================================
// Select List
// =============================================================================

/// A SELECT list item: expression with its 1-based position and optional alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "builders have no effect until used"]
pub struct SqlSelection {
    #[serde(default)]
    pub position: usize,
    pub expression: Expr,
    #[serde(default)]
    pub alias: Option<String>,
}

impl SqlSelection {
    pub fn new(expression: Expr) -> Self {
        Self {
            position: 0,
            expression,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl From<Expr> for SqlSelection {
    fn from(expr: Expr) -> Self {
        SqlSelection::new(expr)
    }
}

/// SELECT [DISTINCT] selections...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectClause {
    #[serde(default)]
    pub distinct: bool,
    pub selections: Vec<SqlSelection>,
}

// =============================================================================
// Table References
// =============================================================================

/// A table reference in the FROM clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableReference {
    /// A named table, optionally schema-qualified with dots.
    Named {
        table: String,
        #[serde(default)]
        alias: Option<String>,
    },
    /// A derived table: (SELECT ...) alias [(columns)]
    Derived {
        query: Box<QueryPart>,
        alias: String,
        #[serde(default)]
        columns: Vec<String>,
    },
}

impl TableReference {
    pub fn named(table: &str) -> Self {
        TableReference::Named {
            table: table.into(),
            alias: None,
        }
    }

    pub fn derived(query: impl Into<QueryPart>, alias: &str) -> Self {
        TableReference::Derived {
            query: Box::new(query.into()),
            alias: alias.into(),
            columns: vec![],
        }
    }

    #[must_use = "builders have no effect until used"]
    pub fn with_alias(self, alias: &str) -> Self {
        match self {
            TableReference::Named { table, .. } => TableReference::Named {
                table,
                alias: Some(alias.into()),
            },
            TableReference::Derived { query, columns, .. } => TableReference::Derived {
                query,
                alias: alias.into(),
                columns,
            },
        }
    }

    /// The name lock modes are looked up under: the alias, else the table name.
    pub fn identification_variable(&self) -> &str {
        match self {
            TableReference::Named { table, alias } => alias.as_deref().unwrap_or(table),
            TableReference::Derived { alias, .. } => alias,
        }
    }
}

/// JOIN types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// A joined table reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGroupJoin {
    pub join_type: JoinType,
    pub table: TableReference,
    #[serde(default)]
    pub predicate: Option<Expr>,
}

/// A FROM-clause root with its joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGroup {
    pub primary: TableReference,
    #[serde(default)]
    pub joins: Vec<TableGroupJoin>,
}

impl From<TableReference> for TableGroup {
    fn from(primary: TableReference) -> Self {
        TableGroup {
            primary,
            joins: vec![],
        }
    }
}

// =============================================================================
// Row Limiting
// =============================================================================

/// How the FETCH clause counts rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchClauseType {
    #[default]
    RowsOnly,
    RowsWithTies,
    PercentOnly,
    PercentWithTies,
}

impl FetchClauseType {
    pub fn is_percent(self) -> bool {
        matches!(
            self,
            FetchClauseType::PercentOnly | FetchClauseType::PercentWithTies
        )
    }

    pub fn with_ties(self) -> bool {
        matches!(
            self,
            FetchClauseType::RowsWithTies | FetchClauseType::PercentWithTies
        )
    }
}

// =============================================================================
// Query Specification
// =============================================================================

/// A single SELECT ... FROM ... WHERE ... block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use = "builders have no effect until used"]
pub struct QuerySpec {
    pub select: SelectClause,
    #[serde(default)]
    pub from: Vec<TableGroup>,
    #[serde(default)]
    pub where_clause: Option<Expr>,
    #[serde(default)]
    pub group_by: Vec<Expr>,
    #[serde(default)]
    pub having: Option<Expr>,
    #[serde(default)]
    pub order_by: Vec<SortSpecification>,
    #[serde(default)]
    pub offset: Option<Expr>,
    #[serde(default)]
    pub fetch: Option<Expr>,
    #[serde(default)]
    pub fetch_type: FetchClauseType,
}

impl QuerySpec {
    /// Create a new empty query specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the select list; positions are numbered from 1.
    pub fn select(mut self, items: Vec<impl Into<SqlSelection>>) -> Self {
        self.select.selections = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let mut selection = item.into();
                selection.position = i + 1;
                selection
            })
            .collect();
        self
    }

    pub fn distinct(mut self) -> Self {
        self.select.distinct = true;
        self
    }

    pub fn from(mut self, table: TableReference) -> Self {
        self.from.push(table.into());
        self
    }

    pub fn join(mut self, join_type: JoinType, table: TableReference, on: Expr) -> Self {
        if let Some(group) = self.from.last_mut() {
            group.joins.push(TableGroupJoin {
                join_type,
                table,
                predicate: Some(on),
            });
        }
        self
    }

    pub fn inner_join(self, table: TableReference, on: Expr) -> Self {
        self.join(JoinType::Inner, table, on)
    }

    pub fn left_join(self, table: TableReference, on: Expr) -> Self {
        self.join(JoinType::Left, table, on)
    }

    /// Add a WHERE predicate; repeated calls are ANDed.
    pub fn filter(mut self, condition: Expr) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => super::expr::and_all(vec![existing, condition]),
            None => condition,
        });
        self
    }

    pub fn group_by(mut self, exprs: Vec<Expr>) -> Self {
        self.group_by = exprs;
        self
    }

    pub fn having(mut self, condition: Expr) -> Self {
        self.having = Some(condition);
        self
    }

    pub fn order_by(mut self, items: Vec<SortSpecification>) -> Self {
        self.order_by = items;
        self
    }

    pub fn offset(mut self, offset: Expr) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn fetch(mut self, fetch: Expr) -> Self {
        self.fetch = Some(fetch);
        self
    }

    pub fn fetch_type(mut self, fetch_type: FetchClauseType) -> Self {
        self.fetch_type = fetch_type;
        self
    }

    pub fn has_row_limit(&self) -> bool {
        self.offset.is_some() || self.fetch.is_some()
    }
}

// =============================================================================
// Set Operations
// =============================================================================

/// Set operators joining the parts of a query group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

impl SetOperator {
    /// INTERSECT or EXCEPT, with or without ALL.
    pub fn is_intersect_or_except(self) -> bool {
        !matches!(self, SetOperator::Union | SetOperator::UnionAll)
    }

    pub fn is_all(self) -> bool {
        matches!(
            self,
            SetOperator::UnionAll | SetOperator::IntersectAll | SetOperator::ExceptAll
        )
    }
}

/// Several query parts combined with one set operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "builders have no effect until used"]
pub struct QueryGroup {
    pub set_operator: SetOperator,
    pub parts: Vec<QueryPart>,
    #[serde(default)]
    pub order_by: Vec<SortSpecification>,
    #[serde(default)]
    pub offset: Option<Expr>,
    #[serde(default)]
    pub fetch: Option<Expr>,
    #[serde(default)]
    pub fetch_type: FetchClauseType,
}

impl QueryGroup {
    pub fn new(set_operator: SetOperator, parts: Vec<QueryPart>) -> Self {
        Self {
            set_operator,
            parts,
            order_by: vec![],
            offset: None,
            fetch: None,
            fetch_type: FetchClauseType::RowsOnly,
        }
    }

    pub fn union_all(left: impl Into<QueryPart>, right: impl Into<QueryPart>) -> Self {
        Self::new(SetOperator::UnionAll, vec![left.into(), right.into()])
    }

    pub fn order_by(mut self, items: Vec<SortSpecification>) -> Self {
        self.order_by = items;
        self
    }

    pub fn offset(mut self, offset: Expr) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn fetch(mut self, fetch: Expr) -> Self {
        self.fetch = Some(fetch);
        self
    }
}

/// Either a query specification or a set-operation group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPart {
    Spec(QuerySpec),
    Group(QueryGroup),
}

impl QueryPart {
    pub fn order_by(&self) -> &[SortSpecification] {
        match self {
            QueryPart::Spec(spec) => &spec.order_by,
            QueryPart::Group(group) => &group.order_by,
        }
    }

    pub fn offset(&self) -> Option<&Expr> {
        match self {
            QueryPart::Spec(spec) => spec.offset.as_ref(),
            QueryPart::Group(group) => group.offset.as_ref(),
        }
    }

    pub fn fetch(&self) -> Option<&Expr> {
        match self {
            QueryPart::Spec(spec) => spec.fetch.as_ref(),
            QueryPart::Group(group) => group.fetch.as_ref(),
        }
    }

    pub fn fetch_type(&self) -> FetchClauseType {
        match self {
            QueryPart::Spec(spec) => spec.fetch_type,
            QueryPart::Group(group) => group.fetch_type,
        }
    }

    pub fn has_row_limit(&self) -> bool {
        self.offset().is_some() || self.fetch().is_some()
    }
}

impl From<QuerySpec> for QueryPart {
    fn from(spec: QuerySpec) -> Self {
        QueryPart::Spec(spec)
    }
}

impl From<QueryGroup> for QueryPart {
    fn from(group: QueryGroup) -> Self {
        QueryPart::Group(group)
    }
}

// =============================================================================
// Common Table Expressions
// =============================================================================

/// SEARCH BREADTH/DEPTH FIRST ordering kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    BreadthFirst,
    DepthFirst,
}

/// `SEARCH {BREADTH|DEPTH} FIRST BY columns SET sequence_column`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchClause {
    pub kind: SearchKind,
    pub by: Vec<String>,
    pub sequence_column: String,
}

/// `CYCLE columns SET mark TO value DEFAULT default [USING path]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleClause {
    pub columns: Vec<String>,
    pub mark_column: String,
    pub mark_value: Literal,
    pub default_value: Literal,
    #[serde(default)]
    pub path_column: Option<String>,
}

impl CycleClause {
    /// Cycle detection with the conventional `'Y'` / `'N'` marker values.
    pub fn new(columns: Vec<&str>, mark_column: &str) -> Self {
        Self {
            columns: columns.into_iter().map(String::from).collect(),
            mark_column: mark_column.into(),
            mark_value: Literal::String("Y".into()),
            default_value: Literal::String("N".into()),
            path_column: None,
        }
    }

    pub fn using_path(mut self, path_column: &str) -> Self {
        self.path_column = Some(path_column.into());
        self
    }
}

/// Common Table Expression definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "builders have no effect until used"]
pub struct CteStatement {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    pub query: QueryPart,
    #[serde(default)]
    pub search: Option<SearchClause>,
    #[serde(default)]
    pub cycle: Option<CycleClause>,
}

impl CteStatement {
    pub fn new(name: &str, query: impl Into<QueryPart>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            query: query.into(),
            search: None,
            cycle: None,
        }
    }

    pub fn with_columns(mut self, columns: Vec<&str>) -> Self {
        self.columns = columns.into_iter().map(String::from).collect();
        self
    }

    pub fn search(mut self, search: SearchClause) -> Self {
        self.search = Some(search);
        self
    }

    pub fn cycle(mut self, cycle: CycleClause) -> Self {
        self.cycle = Some(cycle);
        self
    }
}

/// WITH [RECURSIVE] cte, cte...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithClause {
    #[serde(default)]
    pub recursive: bool,
    pub ctes: Vec<CteStatement>,
}
