//! Statements: SELECT with CTEs and locking, plus INSERT, UPDATE, DELETE.
//!
//! # Examples
//!
//! ```ignore
//! use sqlast::sql::dml::{Insert, Update, Delete};
//! use sqlast::sql::expr::{col, lit_str, lit_int, ExprExt};
//!
//! // INSERT
//! let insert = Insert::into("users")
//!     .columns(["name", "email"])
//!     .values([lit_str("Alice"), lit_str("alice@example.com")]);
//!
//! // UPDATE
//! let update = Update::table("users")
//!     .set("status", lit_str("active"))
//!     .filter(col("id").eq(lit_int(1)));
//!
//! // DELETE
//! let delete = Delete::from("users")
//!     .filter(col("status").eq(lit_str("inactive")));
//! ```

use serde::{Deserialize, Serialize};

use super::expr::{and_all, Expr};
use super::lock::LockOptions;
use super::query::{CteStatement, QueryPart, WithClause};

// ============================================================================
// SELECT
// ============================================================================

/// A SELECT statement: optional WITH clause, root query part and lock request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "statements have no effect until translated"]
pub struct Select {
    #[serde(default)]
    pub with: Option<WithClause>,
    pub query: QueryPart,
    #[serde(default)]
    pub lock_options: LockOptions,
}

impl Select {
    pub fn new(query: impl Into<QueryPart>) -> Self {
        Self {
            with: None,
            query: query.into(),
            lock_options: LockOptions::default(),
        }
    }

    /// Add a CTE; `recursive` marks the whole WITH clause recursive.
    pub fn with_cte(mut self, cte: CteStatement, recursive: bool) -> Self {
        let with = self.with.get_or_insert_with(|| WithClause {
            recursive: false,
            ctes: vec![],
        });
        with.recursive |= recursive;
        with.ctes.push(cte);
        self
    }

    pub fn lock(mut self, lock_options: LockOptions) -> Self {
        self.lock_options = lock_options;
        self
    }
}

// ============================================================================
// INSERT
// ============================================================================

/// Rows inserted by an INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Query(Box<QueryPart>),
}

/// INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "statements have no effect until translated"]
pub struct Insert {
    pub table: String,
    #[serde(default)]
    pub columns: Vec<String>,
    pub source: InsertSource,
}

impl Insert {
    /// Create a new INSERT statement.
    pub fn into(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            source: InsertSource::Values(Vec::new()),
        }
    }

    pub fn columns(mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = cols.into_iter().map(Into::into).collect();
        self
    }

    /// Append one row of values.
    pub fn values(mut self, vals: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        let row: Vec<Expr> = vals.into_iter().map(Into::into).collect();
        match &mut self.source {
            InsertSource::Values(rows) => rows.push(row),
            InsertSource::Query(_) => self.source = InsertSource::Values(vec![row]),
        }
        self
    }

    pub fn from_select(mut self, query: impl Into<QueryPart>) -> Self {
        self.source = InsertSource::Query(Box::new(query.into()));
        self
    }
}

// ============================================================================
// UPDATE
// ============================================================================

/// SET column = value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub value: Expr,
}

/// UPDATE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "statements have no effect until translated"]
pub struct Update {
    pub table: String,
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub where_clause: Option<Expr>,
}

impl Update {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            where_clause: None,
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.assignments.push(Assignment {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn filter(mut self, expr: Expr) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => and_all(vec![existing, expr]),
            None => expr,
        });
        self
    }
}

// ============================================================================
// DELETE
// ============================================================================

/// DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "statements have no effect until translated"]
pub struct Delete {
    pub table: String,
    #[serde(default)]
    pub where_clause: Option<Expr>,
}

impl Delete {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            where_clause: None,
        }
    }

    pub fn filter(mut self, expr: Expr) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => and_all(vec![existing, expr]),
            None => expr,
        });
        self
    }
}

// ============================================================================
// Statement
// ============================================================================

/// Any translatable statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl From<Select> for Statement {
    fn from(select: Select) -> Self {
        Statement::Select(select)
    }
}

impl From<Insert> for Statement {
    fn from(insert: Insert) -> Self {
        Statement::Insert(insert)
    }
}

impl From<Update> for Statement {
    fn from(update: Update) -> Self {
        Statement::Update(update)
    }
}

impl From<Delete> for Statement {
    fn from(delete: Delete) -> Self {
        Statement::Delete(delete)
    }
}
