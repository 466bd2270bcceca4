//! Sybase ASE dialect.
//!
//! ASE is missing a good part of modern SQL, so most of this dialect is
//! about routing constructs to emulations:
//! - Square bracket identifier quoting (`[name]`)
//! - No row-value constructors: tuple predicates expand per column
//! - No OFFSET/FETCH: the root limit goes to the caller, subqueries use `TOP n`
//! - No FOR UPDATE: row locks are `holdlock` table hints
//! - No INTERSECT and no `IS DISTINCT FROM`: CASE-based null-safe equality
//! - No SEARCH / CYCLE clauses, no ROLLUP / CUBE
//! - String concatenation with `+`, `CHARINDEX` for substring search

use tracing::debug;

use super::helpers;
use super::{DialectTranslator, PositionFunction, SqlDialect};
use crate::sql::emulation::{intersect, row_limit, tuple};
use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::expr::{ComparisonOperator, Expr};
use crate::sql::lock::{ForUpdateClause, LockMode};
use crate::sql::query::{CteStatement, QueryPart, QuerySpec, SqlSelection, TableReference};
use crate::sql::token::Token;
use crate::sql::translator::{standard, Translator};

/// Sybase Adaptive Server Enterprise dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sybase;

impl SqlDialect for Sybase {
    fn name(&self) -> &'static str {
        "sybase"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn is_reserved_word(&self, ident: &str) -> bool {
        helpers::is_reserved_transact(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn concat_operator(&self) -> &'static str {
        "+"
    }

    fn position_function(&self) -> PositionFunction {
        PositionFunction::Charindex
    }

    fn string_cast_type(&self) -> &'static str {
        // ASE caps VARCHAR at the page size; 255 is safe on every server
        "VARCHAR(255)"
    }

    fn cycle_path_type(&self) -> &'static str {
        // widest character value ASE allows in expressions and variables
        "VARCHAR(16384)"
    }

    fn supports_row_value_constructor_syntax(&self) -> bool {
        false
    }

    fn supports_row_value_constructor_syntax_in_in_list(&self) -> bool {
        false
    }

    fn supports_row_value_constructor_syntax_in_quantified_predicates(&self) -> bool {
        false
    }

    fn needs_rows_to_skip(&self) -> bool {
        true
    }

    fn needs_max_rows(&self) -> bool {
        true
    }

    fn supports_offset_fetch(&self) -> bool {
        false
    }

    fn supports_top_clause(&self) -> bool {
        true
    }

    fn supports_intersect(&self) -> bool {
        false
    }

    fn supports_distinct_from_predicate(&self) -> bool {
        false
    }

    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    fn supports_summarization(&self) -> bool {
        false
    }

    fn supports_groups_frame(&self) -> bool {
        false
    }

    fn supports_search_clause(&self) -> bool {
        false
    }

    fn emit_recursive_keyword(&self) -> bool {
        // recursive CTEs come from SQL Anywhere, which requires WITH RECURSIVE
        true
    }

    fn supports_cycle_clause(&self) -> bool {
        false
    }

    fn supports_multi_row_values(&self) -> bool {
        false
    }

    fn supports_for_update(&self) -> bool {
        false
    }
}

impl DialectTranslator for Sybase {
    /// Appends ` holdlock` to named tables locked above READ.
    fn render_table_reference(
        &self,
        tr: &mut Translator<'_>,
        table: &TableReference,
        lock_mode: LockMode,
    ) -> TranslateResult<bool> {
        standard::render_table_reference(tr, table, lock_mode)?;
        if lock_mode.requires_row_lock() {
            match table {
                TableReference::Named { .. } => {
                    tr.space().push(Token::TableHint("holdlock".into()));
                }
                TableReference::Derived { alias, .. } => {
                    debug!(%alias, ?lock_mode, "no holdlock hint on a derived table");
                }
            }
        }
        Ok(true)
    }

    // Locks are table hints, so there is never a trailing clause.
    fn render_for_update_clause(
        &self,
        _tr: &mut Translator<'_>,
        _spec: &QuerySpec,
        _clause: &ForUpdateClause,
    ) -> TranslateResult<()> {
        Ok(())
    }

    fn render_search_clause(&self, _tr: &mut Translator<'_>, _cte: &CteStatement) -> TranslateResult<()> {
        Ok(())
    }

    fn render_cycle_clause(&self, _tr: &mut Translator<'_>, _cte: &CteStatement) -> TranslateResult<()> {
        Ok(())
    }

    fn visit_offset_fetch_clause(&self, tr: &mut Translator<'_>, part: &QueryPart) -> TranslateResult<()> {
        row_limit::assert_rows_only_fetch_clause_type(tr, part)?;
        if tr.is_root_query_part() {
            return row_limit::capture_root_row_limit(tr, part);
        }
        if part.offset().is_some() {
            return Err(TranslationError::unsupported(
                self.name(),
                "Can't emulate offset clause in subquery",
            ));
        }
        if part.fetch().is_some() && matches!(part, QueryPart::Group(_)) {
            return Err(TranslationError::unsupported(
                self.name(),
                "Can't emulate fetch clause on a set operation in subquery",
            ));
        }
        Ok(())
    }

    /// `TOP n` for a fetch-limited query specification below the root.
    fn render_row_limit_prefix(&self, tr: &mut Translator<'_>, part: &QueryPart) -> TranslateResult<()> {
        if tr.is_root_query_part() || part.offset().is_some() {
            return Ok(());
        }
        if let Some(fetch) = part.fetch() {
            row_limit::assert_rows_only_fetch_clause_type(tr, part)?;
            row_limit::render_top_clause(tr, fetch, part.fetch_type(), false)?;
        }
        Ok(())
    }

    fn render_comparison(
        &self,
        tr: &mut Translator<'_>,
        lhs: &Expr,
        op: ComparisonOperator,
        rhs: &Expr,
    ) -> TranslateResult<()> {
        intersect::render_comparison_emulate_intersect(tr, lhs, op, rhs)
    }

    fn render_select_tuple_comparison(
        &self,
        tr: &mut Translator<'_>,
        selections: &[SqlSelection],
        tuple: &[Expr],
        op: ComparisonOperator,
    ) -> TranslateResult<()> {
        let lhs: Vec<Expr> = selections.iter().map(|s| s.expression.clone()).collect();
        tuple::emulate_tuple_comparison(tr, &lhs, tuple, op, true)
    }

    fn render_partition_item(&self, tr: &mut Translator<'_>, expr: &Expr) -> TranslateResult<()> {
        match expr {
            Expr::Literal(_) => Err(TranslationError::not_yet_implemented(
                self.name(),
                "Column reference strategy is not yet implemented!",
            )),
            Expr::Summarization { .. } => Err(TranslationError::unsupported(
                self.name(),
                "Summarization is not supported by DBMS!",
            )),
            _ => tr.visit_expr(expr),
        }
    }
}
