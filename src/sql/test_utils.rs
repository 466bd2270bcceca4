//! Test utilities for SQL output validation.
//!
//! Provides helpers for checking that translated SQL is syntactically
//! correct using sqlparser-rs.

use sqlparser::dialect::{GenericDialect, MsSqlDialect};
use sqlparser::parser::Parser;

use super::dialect::Dialect;

/// Validates that a SQL string parses for the given dialect.
///
/// Sybase ASE and SQL Server share the Transact-SQL grammar, so both are
/// checked with the MS SQL parser.
///
/// # Example
///
/// ```ignore
/// use crate::sql::test_utils::validate_sql;
/// use crate::sql::dialect::Dialect;
///
/// validate_sql("SELECT TOP 5 a FROM t", Dialect::Sybase).unwrap();
/// ```
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Ansi => Box::new(GenericDialect {}),
        Dialect::Sybase | Dialect::TSql => Box::new(MsSqlDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM users", Dialect::Ansi).unwrap();
        validate_sql("SELECT TOP 5 name FROM users", Dialect::Sybase).unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM users", Dialect::Ansi);
        assert!(result.is_err());
    }
}
