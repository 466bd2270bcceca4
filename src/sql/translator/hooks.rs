//! Dialect override points of the translator.

use super::standard;
use super::Translator;
use crate::sql::dialect::SqlDialect;
use crate::sql::error::TranslateResult;
use crate::sql::expr::{ComparisonOperator, Expr};
use crate::sql::lock::{ForUpdateClause, LockMode};
use crate::sql::query::{CteStatement, QueryPart, QuerySpec, SqlSelection, TableReference};

/// Hooks a dialect may override to change how parts of the tree render.
///
/// Every default delegates to the function of the same name in
/// [`standard`], which renders standard SQL. Overrides receive the
/// translator so they can append tokens and inspect the traversal state.
pub trait DialectTranslator: SqlDialect {
    /// Render a table reference carrying `lock_mode`.
    ///
    /// Returns `true` when the lock was expressed inline (as a table hint);
    /// `false` makes the translator collect the alias for a trailing
    /// FOR UPDATE clause.
    fn render_table_reference(
        &self,
        tr: &mut Translator<'_>,
        table: &TableReference,
        lock_mode: LockMode,
    ) -> TranslateResult<bool> {
        standard::render_table_reference(tr, table, lock_mode)
    }

    /// Render the trailing row-lock clause of the root query specification.
    fn render_for_update_clause(
        &self,
        tr: &mut Translator<'_>,
        spec: &QuerySpec,
        clause: &ForUpdateClause,
    ) -> TranslateResult<()> {
        standard::render_for_update_clause(tr, spec, clause)
    }

    /// Render the CTE SEARCH clause after the CTE body.
    fn render_search_clause(&self, tr: &mut Translator<'_>, cte: &CteStatement) -> TranslateResult<()> {
        standard::render_search_clause(tr, cte)
    }

    /// Render the CTE CYCLE clause after the CTE body.
    fn render_cycle_clause(&self, tr: &mut Translator<'_>, cte: &CteStatement) -> TranslateResult<()> {
        standard::render_cycle_clause(tr, cte)
    }

    /// Render (or capture) the offset/fetch of a query part, after its ORDER BY.
    fn visit_offset_fetch_clause(&self, tr: &mut Translator<'_>, part: &QueryPart) -> TranslateResult<()> {
        standard::visit_offset_fetch_clause(tr, part)
    }

    /// Render anything that belongs between `SELECT [DISTINCT]` and the select list.
    fn render_row_limit_prefix(&self, tr: &mut Translator<'_>, part: &QueryPart) -> TranslateResult<()> {
        standard::render_row_limit_prefix(tr, part)
    }

    /// Render `lhs op rhs`.
    fn render_comparison(
        &self,
        tr: &mut Translator<'_>,
        lhs: &Expr,
        op: ComparisonOperator,
        rhs: &Expr,
    ) -> TranslateResult<()> {
        standard::render_comparison(tr, lhs, op, rhs)
    }

    /// Render `(select items) op (tuple)` inside an emulated quantified predicate.
    fn render_select_tuple_comparison(
        &self,
        tr: &mut Translator<'_>,
        selections: &[SqlSelection],
        tuple: &[Expr],
        op: ComparisonOperator,
    ) -> TranslateResult<()> {
        standard::render_select_tuple_comparison(tr, selections, tuple, op)
    }

    /// Render one GROUP BY or PARTITION BY item.
    fn render_partition_item(&self, tr: &mut Translator<'_>, expr: &Expr) -> TranslateResult<()> {
        standard::render_partition_item(tr, expr)
    }
}
