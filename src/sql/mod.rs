//! SQL AST and dialect translation.
//!
//! - [`expr`] - Expression AST and builder DSL
//! - [`query`] - Query specifications, set operations and CTEs
//! - [`dml`] - SELECT, INSERT, UPDATE and DELETE statements
//! - [`lock`] - Lock modes and lock options
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations
//! - [`translator`] - The AST walker and its dialect hooks
//! - [`emulation`] - Rewrites for constructs a dialect lacks

pub mod dialect;
pub mod dml;
pub mod emulation;
pub mod error;
pub mod expr;
pub mod lock;
pub mod query;
pub mod token;
pub mod translator;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, DialectTranslator, IdentifierQuoting, SqlDialect};
pub use dml::{Delete, Insert, Select, Statement, Update};
pub use emulation::cycle::CycleStrategy;
pub use emulation::row_limit::{RowLimit, RowLimitValue};
pub use error::{TranslateResult, TranslationError};
pub use expr::{
    col, count_star, func, lit_bool, lit_float, lit_int, lit_null, lit_str, max, param, star, sum,
    table_col, table_star, tuple, ComparisonOperator, Expr, ExprExt, Literal, SortSpecification,
    WindowExt, WindowFrame,
};
pub use lock::{LockMode, LockOptions, LockTimeout};
pub use query::{
    CteStatement, CycleClause, FetchClauseType, QueryGroup, QueryPart, QuerySpec, SearchClause,
    SetOperator, TableReference,
};
pub use token::{Token, TokenStream};
pub use translator::{Translation, Translator};
