//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! Each dialect implements `SqlDialect` for its lexical rules and capability
//! flags, and [`DialectTranslator`] for the translator hooks it overrides:
//!
//! - Identifier quoting: `"` (ANSI), `[]` (Sybase, T-SQL)
//! - Pagination: OFFSET/FETCH vs TOP vs out-of-band row limits
//! - Boolean literals: TRUE/FALSE vs 1/0
//! - String concatenation: `||` vs `+`
//! - Row-value constructors, INTERSECT, NULLS FIRST/LAST and friends
//!
//! # Usage
//!
//! ```ignore
//! use sqlast::sql::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Sybase;
//! let quoted = dialect.quote_identifier("user");  // [user]
//! ```
//!
//! # Capabilities
//!
//! | Feature | ANSI | Sybase ASE | T-SQL |
//! |---------|------|------------|-------|
//! | Row-value constructors | ✓ | ❌ | ❌ |
//! | INTERSECT / EXCEPT | ✓ | ❌ | ✓ |
//! | IS [NOT] DISTINCT FROM | ✓ | ❌ | ❌ |
//! | NULLS FIRST/LAST | ✓ | ❌ | ❌ |
//! | Multi-row VALUES | ✓ | ❌ | ✓ |
//! | OFFSET / FETCH | ✓ | ❌ | ✓ |
//! | TOP | ❌ | ✓ | ✓ |
//! | FOR UPDATE | ✓ | ❌ (holdlock) | ❌ (WITH hints) |
//! | SEARCH / CYCLE | ✓ | ❌ | ❌ |
//! | ROLLUP / CUBE | ✓ | ❌ | WITH ROLLUP |
//! | GROUPS frame | ✓ | ❌ | ❌ |

mod ansi;
pub mod helpers;
mod sybase;
mod tsql;

pub use ansi::Ansi;
pub use sybase::Sybase;
pub use tsql::TSql;

pub use crate::sql::translator::DialectTranslator;

use serde::{Deserialize, Serialize};

/// When identifiers are wrapped in the dialect's quote characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierQuoting {
    /// Quote every identifier.
    Always,
    /// Quote only identifiers that are not plain words or collide with reserved words.
    #[default]
    WhenNeeded,
}

/// How a dialect locates a substring inside another string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFunction {
    /// `POSITION(needle IN haystack)`
    PositionIn,
    /// `CHARINDEX(needle, haystack)`
    Charindex,
}

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias) unconditionally.
    ///
    /// - ANSI: `"identifier"`
    /// - Sybase / T-SQL: `[identifier]`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Whether `ident` collides with a word this dialect reserves.
    fn is_reserved_word(&self, ident: &str) -> bool {
        helpers::is_reserved_ansi(ident)
    }

    /// Render an identifier according to the quoting policy.
    fn format_identifier(&self, ident: &str, quoting: IdentifierQuoting) -> String {
        match quoting {
            IdentifierQuoting::Always => self.quote_identifier(ident),
            IdentifierQuoting::WhenNeeded => {
                if helpers::is_plain_identifier(ident) && !self.is_reserved_word(ident) {
                    ident.to_string()
                } else {
                    self.quote_identifier(ident)
                }
            }
        }
    }

    /// Quote a string literal.
    ///
    /// All dialects use single quotes with `''` for escaping.
    /// Override for Unicode prefix (T-SQL N'...').
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    ///
    /// - ANSI: `TRUE`/`FALSE`
    /// - Sybase / T-SQL: `1`/`0`
    fn format_bool(&self, b: bool) -> &'static str;

    // =========================================================================
    // Operators and Functions
    // =========================================================================

    /// String concatenation operator.
    ///
    /// - ANSI: `||`
    /// - Sybase / T-SQL: `+`
    fn concat_operator(&self) -> &'static str {
        "||"
    }

    /// Substring position function used by emulations.
    fn position_function(&self) -> PositionFunction {
        PositionFunction::PositionIn
    }

    /// Character type that emulations cast values to before concatenating.
    fn string_cast_type(&self) -> &'static str {
        "VARCHAR(4000)"
    }

    /// Character type of the path column in CYCLE emulation. Its length
    /// bounds the recursion depth at which cycles are still detected.
    fn cycle_path_type(&self) -> &'static str {
        self.string_cast_type()
    }

    // =========================================================================
    // Row-value Constructors
    // =========================================================================

    /// Whether `(a, b) = (x, y)` style comparisons are accepted.
    fn supports_row_value_constructor_syntax(&self) -> bool {
        true
    }

    /// Whether `(a, b) IN ((1, 2), (3, 4))` is accepted.
    fn supports_row_value_constructor_syntax_in_in_list(&self) -> bool {
        true
    }

    /// Whether `(a, b) = ANY (SELECT x, y ...)` and `(a, b) IN (SELECT ...)` are accepted.
    fn supports_row_value_constructor_syntax_in_quantified_predicates(&self) -> bool {
        true
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Whether the root offset must be applied by the caller (skipping rows of the result).
    fn needs_rows_to_skip(&self) -> bool {
        false
    }

    /// Whether the root fetch must be applied by the caller (statement max rows).
    fn needs_max_rows(&self) -> bool {
        false
    }

    /// Whether `OFFSET n ROWS` / `FETCH ... ROWS` clauses can be rendered inline.
    fn supports_offset_fetch(&self) -> bool {
        true
    }

    /// Whether `SELECT TOP n` is available.
    fn supports_top_clause(&self) -> bool {
        false
    }

    /// Whether this dialect requires ORDER BY for OFFSET/FETCH.
    ///
    /// T-SQL requires ORDER BY when using OFFSET FETCH.
    fn requires_order_by_for_offset(&self) -> bool {
        false
    }

    // =========================================================================
    // Set Operations and Predicates
    // =========================================================================

    /// Whether INTERSECT and EXCEPT set operators are available.
    fn supports_intersect(&self) -> bool {
        true
    }

    /// Whether `IS [NOT] DISTINCT FROM` is available.
    fn supports_distinct_from_predicate(&self) -> bool {
        true
    }

    // =========================================================================
    // Ordering and Grouping
    // =========================================================================

    /// Whether this dialect supports NULLS FIRST/LAST in ORDER BY.
    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    /// Whether ROLLUP / CUBE grouping summarizations are available.
    fn supports_summarization(&self) -> bool {
        true
    }

    /// Whether GROUPS frame mode is supported in window functions.
    fn supports_groups_frame(&self) -> bool {
        true
    }

    // =========================================================================
    // CTE (Common Table Expressions)
    // =========================================================================

    /// Whether to emit RECURSIVE keyword for recursive CTEs.
    ///
    /// T-SQL omits the RECURSIVE keyword.
    fn emit_recursive_keyword(&self) -> bool {
        true
    }

    /// Whether the SQL:1999 `SEARCH` clause can be rendered.
    fn supports_search_clause(&self) -> bool {
        true
    }

    /// Whether the SQL:1999 `CYCLE` clause can be rendered.
    fn supports_cycle_clause(&self) -> bool {
        true
    }

    // =========================================================================
    // DML and Locking
    // =========================================================================

    /// Whether `INSERT ... VALUES (..), (..)` accepts more than one row.
    fn supports_multi_row_values(&self) -> bool {
        true
    }

    /// Whether row locks are requested with a trailing `FOR UPDATE` clause.
    fn supports_for_update(&self) -> bool {
        true
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Ansi,
    Sybase,
    TSql,
}

impl Dialect {
    /// All dialects, in display order.
    pub const ALL: [Dialect; 3] = [Dialect::Ansi, Dialect::Sybase, Dialect::TSql];

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn DialectTranslator {
        match self {
            Dialect::Ansi => &Ansi,
            Dialect::Sybase => &Sybase,
            Dialect::TSql => &TSql,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn is_reserved_word(&self, ident: &str) -> bool {
        self.dialect().is_reserved_word(ident)
    }

    fn format_identifier(&self, ident: &str, quoting: IdentifierQuoting) -> String {
        self.dialect().format_identifier(ident, quoting)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn concat_operator(&self) -> &'static str {
        self.dialect().concat_operator()
    }

    fn position_function(&self) -> PositionFunction {
        self.dialect().position_function()
    }

    fn string_cast_type(&self) -> &'static str {
        self.dialect().string_cast_type()
    }

    fn cycle_path_type(&self) -> &'static str {
        self.dialect().cycle_path_type()
    }

    fn supports_row_value_constructor_syntax(&self) -> bool {
        self.dialect().supports_row_value_constructor_syntax()
    }

    fn supports_row_value_constructor_syntax_in_in_list(&self) -> bool {
        self.dialect().supports_row_value_constructor_syntax_in_in_list()
    }

    fn supports_row_value_constructor_syntax_in_quantified_predicates(&self) -> bool {
        self.dialect()
            .supports_row_value_constructor_syntax_in_quantified_predicates()
    }

    fn needs_rows_to_skip(&self) -> bool {
        self.dialect().needs_rows_to_skip()
    }

    fn needs_max_rows(&self) -> bool {
        self.dialect().needs_max_rows()
    }

    fn supports_offset_fetch(&self) -> bool {
        self.dialect().supports_offset_fetch()
    }

    fn supports_top_clause(&self) -> bool {
        self.dialect().supports_top_clause()
    }

    fn requires_order_by_for_offset(&self) -> bool {
        self.dialect().requires_order_by_for_offset()
    }

    fn supports_intersect(&self) -> bool {
        self.dialect().supports_intersect()
    }

    fn supports_distinct_from_predicate(&self) -> bool {
        self.dialect().supports_distinct_from_predicate()
    }

    fn supports_nulls_ordering(&self) -> bool {
        self.dialect().supports_nulls_ordering()
    }

    fn supports_summarization(&self) -> bool {
        self.dialect().supports_summarization()
    }

    fn supports_groups_frame(&self) -> bool {
        self.dialect().supports_groups_frame()
    }

    fn emit_recursive_keyword(&self) -> bool {
        self.dialect().emit_recursive_keyword()
    }

    fn supports_search_clause(&self) -> bool {
        self.dialect().supports_search_clause()
    }

    fn supports_cycle_clause(&self) -> bool {
        self.dialect().supports_cycle_clause()
    }

    fn supports_multi_row_values(&self) -> bool {
        self.dialect().supports_multi_row_values()
    }

    fn supports_for_update(&self) -> bool {
        self.dialect().supports_for_update()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::Ansi.to_string(), "ansi");
        assert_eq!(Dialect::Sybase.to_string(), "sybase");
        assert_eq!(Dialect::TSql.to_string(), "tsql");
    }

    #[test]
    fn test_dialect_serde_names() {
        let parsed: Dialect = serde_json::from_str("\"sybase\"").unwrap();
        assert_eq!(parsed, Dialect::Sybase);
        assert_eq!(serde_json::to_string(&Dialect::TSql).unwrap(), "\"tsql\"");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Dialect::Ansi.quote_identifier("users"), "\"users\"");
        assert_eq!(Dialect::Sybase.quote_identifier("users"), "[users]");
        assert_eq!(Dialect::TSql.quote_identifier("users"), "[users]");
    }

    #[test]
    fn test_format_identifier_reserved() {
        let q = IdentifierQuoting::WhenNeeded;
        assert_eq!(Dialect::Sybase.format_identifier("holdlock", q), "[holdlock]");
        assert_eq!(Dialect::Ansi.format_identifier("holdlock", q), "holdlock");
        assert_eq!(Dialect::Ansi.format_identifier("select", q), "\"select\"");
    }

    #[test]
    fn test_format_bool() {
        assert_eq!(Dialect::Ansi.format_bool(true), "TRUE");
        assert_eq!(Dialect::Sybase.format_bool(false), "0");
        assert_eq!(Dialect::TSql.format_bool(true), "1");
    }

    #[test]
    fn test_concat_operator() {
        assert_eq!(Dialect::Ansi.concat_operator(), "||");
        assert_eq!(Dialect::Sybase.concat_operator(), "+");
        assert_eq!(Dialect::TSql.concat_operator(), "+");
    }

    #[test]
    fn test_sybase_capabilities() {
        let d = Dialect::Sybase;
        assert!(!d.supports_row_value_constructor_syntax());
        assert!(!d.supports_row_value_constructor_syntax_in_in_list());
        assert!(!d.supports_row_value_constructor_syntax_in_quantified_predicates());
        assert!(d.needs_rows_to_skip());
        assert!(d.needs_max_rows());
        assert!(!d.supports_intersect());
        assert!(!d.supports_search_clause());
        assert!(!d.supports_cycle_clause());
        assert!(d.emit_recursive_keyword());
        assert_eq!(d.cycle_path_type(), "VARCHAR(16384)");
        assert_eq!(d.position_function(), PositionFunction::Charindex);
        assert!(!Dialect::TSql.emit_recursive_keyword());
    }

    #[test]
    fn test_ansi_capabilities() {
        let d = Dialect::Ansi;
        assert!(d.supports_row_value_constructor_syntax());
        assert!(!d.needs_rows_to_skip());
        assert!(!d.needs_max_rows());
        assert!(d.supports_offset_fetch());
        assert!(!d.supports_top_clause());
        assert!(d.supports_for_update());
    }

    #[test]
    fn test_tsql_capabilities() {
        let d = Dialect::TSql;
        assert!(d.requires_order_by_for_offset());
        assert!(d.supports_top_clause());
        assert!(d.supports_intersect());
        assert!(!d.supports_distinct_from_predicate());
        assert!(!d.emit_recursive_keyword());
    }
}
