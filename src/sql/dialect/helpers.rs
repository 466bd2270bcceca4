//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with square brackets.
/// Used by: Sybase ASE, T-SQL
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

static PLAIN_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Whether `ident` can be emitted without quotes (ignoring reserved words).
pub fn is_plain_identifier(ident: &str) -> bool {
    PLAIN_IDENTIFIER.is_match(ident)
}

// =============================================================================
// Reserved Words
// =============================================================================

/// Keywords reserved by SQL:2016 that commonly collide with column names.
const ANSI_RESERVED: &[&str] = &[
    "all", "and", "any", "as", "asc", "between", "by", "case", "cast", "check", "column",
    "constraint", "create", "cross", "current", "default", "delete", "desc", "distinct", "drop",
    "else", "end", "escape", "except", "exists", "false", "fetch", "for", "foreign", "from",
    "full", "group", "having", "in", "inner", "insert", "intersect", "into", "is", "join", "key",
    "left", "like", "not", "null", "of", "offset", "on", "or", "order", "outer", "over",
    "partition", "primary", "range", "references", "right", "rows", "select", "set", "table",
    "then", "to", "true", "union", "unique", "update", "user", "using", "values", "when",
    "where", "window", "with",
];

/// Additional words reserved by Sybase ASE and SQL Server.
const TRANSACT_RESERVED: &[&str] = &[
    "browse", "checkpoint", "compute", "dump", "file", "holdlock", "identity", "index", "kill",
    "load", "nocheck", "percent", "plan", "print", "proc", "procedure", "readpast", "rowcount",
    "rule", "save", "shared", "top", "tran", "transaction", "trigger", "truncate", "updlock",
];

/// ANSI reserved word check (case-insensitive).
pub fn is_reserved_ansi(ident: &str) -> bool {
    let lower = ident.to_ascii_lowercase();
    ANSI_RESERVED.contains(&lower.as_str())
}

/// Sybase / T-SQL reserved word check (case-insensitive).
pub fn is_reserved_transact(ident: &str) -> bool {
    let lower = ident.to_ascii_lowercase();
    ANSI_RESERVED.contains(&lower.as_str()) || TRANSACT_RESERVED.contains(&lower.as_str())
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: All dialects
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote string with N prefix for Unicode (T-SQL).
/// Used by: T-SQL for non-ASCII strings
pub fn quote_string_unicode(s: &str) -> String {
    format!("N'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Boolean Formatting
// =============================================================================

/// Format boolean as keyword TRUE/FALSE.
pub fn format_bool_keyword(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Format boolean as numeric 1/0.
/// Used by: Sybase ASE, T-SQL
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}
