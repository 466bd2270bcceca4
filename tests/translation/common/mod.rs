//! Shared helpers for the translation integration tests.

#![allow(dead_code)]

use sqlast::prelude::*;
use sqlparser::dialect::{GenericDialect, MsSqlDialect};
use sqlparser::parser::Parser;

/// Translate with default options for `dialect`, panicking on failure.
pub fn translate_for(dialect: Dialect, statement: impl Into<Statement>) -> Translation {
    translate(&statement.into(), &TranslateOptions::new(dialect))
        .unwrap_or_else(|e| panic!("translation for {dialect} failed: {e}"))
}

/// Translate with default options for `dialect`, expecting a failure.
pub fn translate_err(dialect: Dialect, statement: impl Into<Statement>) -> TranslationError {
    match translate(&statement.into(), &TranslateOptions::new(dialect)) {
        Ok(out) => panic!("expected {dialect} translation to fail, got: {}", out.sql),
        Err(e) => e,
    }
}

/// Assert that `sql` parses with sqlparser for `dialect`.
pub fn assert_parses(sql: &str, dialect: Dialect) {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Ansi => Box::new(GenericDialect {}),
        Dialect::Sybase | Dialect::TSql => Box::new(MsSqlDialect {}),
    };
    if let Err(e) = Parser::parse_sql(&*parser_dialect, sql) {
        panic!("invalid SQL for {dialect}: {e}\nSQL: {sql}");
    }
}

/// `SELECT <items> FROM <table>`
pub fn select_from(table: &str, items: Vec<Expr>) -> QuerySpec {
    QuerySpec::new()
        .select(items)
        .from(TableReference::named(table))
}

/// `SELECT id FROM t WHERE <predicate>`
pub fn select_where(predicate: Expr) -> Select {
    Select::new(select_from("t", vec![col("id")]).filter(predicate))
}

pub fn ab() -> Expr {
    tuple(vec![col("a"), col("b")])
}

/// `SELECT x, y FROM u`
pub fn xy_subquery() -> QuerySpec {
    select_from("u", vec![col("x"), col("y")])
}

/// `tree (id, parent)`: nodes without a parent, then their children.
pub fn tree_cte() -> CteStatement {
    let anchor = select_from("nodes", vec![col("id"), col("parent")]).filter(col("parent").is_null());
    let recursive = QuerySpec::new()
        .select(vec![table_col("n", "id"), table_col("n", "parent")])
        .from(TableReference::named("nodes").with_alias("n"))
        .inner_join(
            TableReference::named("tree"),
            table_col("n", "parent").eq(table_col("tree", "id")),
        );
    CteStatement::new("tree", QueryGroup::union_all(anchor, recursive)).with_columns(vec!["id", "parent"])
}

/// `WITH RECURSIVE tree ... SELECT id FROM tree`
pub fn select_from_tree(cte: CteStatement) -> Select {
    Select::new(select_from("tree", vec![col("id")])).with_cte(cte, true)
}
