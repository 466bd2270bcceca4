//! # sqlast
//!
//! Translates a database-agnostic SQL AST into SQL for a specific engine,
//! emulating the constructs the engine does not support.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Statement AST (expr / query / dml / lock)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [translator]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Standard traversal ──hooks──▶ DialectTranslator       │
//! │                                  (Ansi, Sybase, TSql)    │
//! │                                        │                 │
//! │                                        ▼ [emulation]     │
//! │         tuple / intersect / row_limit / nulls / cycle    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [token stream]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Translation { sql, row_limit, parameters }        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use sqlast::prelude::*;
//!
//! let query = QuerySpec::new()
//!     .select(vec![col("name")])
//!     .from(TableReference::named("users"))
//!     .filter(tuple(vec![col("a"), col("b")]).eq(tuple(vec![lit_int(1), lit_int(2)])));
//!
//! let out = translate(&Select::new(query).into(), &TranslateOptions::new(Dialect::Sybase)).unwrap();
//! assert_eq!(out.sql, "SELECT name FROM users WHERE a = 1 AND b = 2");
//! ```

pub mod config;
pub mod sql;
pub mod translation;

// Re-export SQL submodules at crate level
pub use sql::dialect;
pub use sql::dml;
pub use sql::expr;
pub use sql::query;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::dialect::{Dialect, IdentifierQuoting, SqlDialect};
    pub use crate::dml::{Delete, Insert, Select, Statement, Update};
    pub use crate::expr::{
        // Constructors
        col,
        count_star,
        func,
        lit_bool,
        lit_float,
        lit_int,
        lit_null,
        lit_str,
        param,
        star,
        table_col,
        tuple,
        // Types
        ComparisonOperator,
        Expr,
        ExprExt,
        Literal,
        SortSpecification,
    };
    pub use crate::query::{
        CteStatement, CycleClause, FetchClauseType, QueryGroup, QueryPart, QuerySpec,
        TableReference,
    };
    pub use crate::sql::emulation::cycle::CycleStrategy;
    pub use crate::sql::error::{TranslateResult, TranslationError};
    pub use crate::sql::lock::{LockMode, LockOptions, LockTimeout};
    pub use crate::sql::translator::Translation;
    pub use crate::translation::{translate, TranslateOptions};
}

// Also export at crate root for convenience
pub use dialect::Dialect;
pub use dml::Statement;
pub use expr::{col, lit_int, lit_str, table_col, Expr, ExprExt};
pub use translation::{translate, TranslateOptions};
