//! T-SQL (SQL Server / Azure SQL) dialect.
//!
//! T-SQL has significant differences from ANSI:
//! - Square bracket identifier quoting (`[name]`)
//! - No native boolean in SELECT, 1/0 instead
//! - OFFSET FETCH for pagination (requires ORDER BY)
//! - TOP for simple limiting, including PERCENT and WITH TIES
//! - N'...' prefix for Unicode strings
//! - Row locks through `WITH (...)` table hints instead of FOR UPDATE
//! - `WITH ROLLUP` / `WITH CUBE` instead of `ROLLUP(...)` / `CUBE(...)`
//! - No RECURSIVE keyword for recursive CTEs
//! - String concatenation with `+`

use super::helpers;
use super::{DialectTranslator, PositionFunction, SqlDialect};
use crate::sql::emulation::{intersect, row_limit};
use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::expr::{ComparisonOperator, Expr, SummarizationKind};
use crate::sql::lock::{ForUpdateClause, LockMode, LockTimeout};
use crate::sql::query::{CteStatement, FetchClauseType, QueryPart, QuerySpec, TableReference};
use crate::sql::token::Token;
use crate::sql::translator::{standard, Translator};

/// T-SQL (SQL Server) dialect.
#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl TSql {
    /// A fetch without offset on a query specification renders as `TOP (n)`.
    fn uses_top(part: &QueryPart) -> bool {
        matches!(part, QueryPart::Spec(_)) && part.offset().is_none() && part.fetch().is_some()
    }

    fn lock_hints(lock_mode: LockMode, timeout: LockTimeout) -> Vec<&'static str> {
        let mut hints = match lock_mode {
            LockMode::PessimisticRead => vec!["holdlock", "rowlock"],
            LockMode::Optimistic | LockMode::OptimisticForceIncrement => vec!["holdlock"],
            _ => vec!["updlock", "holdlock", "rowlock"],
        };
        match timeout {
            LockTimeout::NoWait => hints.push("nowait"),
            LockTimeout::SkipLocked => {
                hints.retain(|hint| *hint != "holdlock");
                hints.push("readpast");
            }
            LockTimeout::Wait | LockTimeout::Seconds(_) => {}
        }
        hints
    }
}

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "tsql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn is_reserved_word(&self, ident: &str) -> bool {
        helpers::is_reserved_transact(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        // N'...' only where the literal needs it
        if !s.is_ascii() {
            helpers::quote_string_unicode(s)
        } else {
            helpers::quote_string_single(s)
        }
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
        "NVARCHAR(MAX)"
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

    fn supports_top_clause(&self) -> bool {
        true
    }

    fn requires_order_by_for_offset(&self) -> bool {
        true
    }

    fn supports_distinct_from_predicate(&self) -> bool {
        // IS DISTINCT FROM arrived in SQL Server 2022
        false
    }

    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    fn supports_groups_frame(&self) -> bool {
        false
    }

    fn emit_recursive_keyword(&self) -> bool {
        false
    }

    fn supports_search_clause(&self) -> bool {
        false
    }

    fn supports_cycle_clause(&self) -> bool {
        false
    }

    fn supports_for_update(&self) -> bool {
        false
    }
}

impl DialectTranslator for TSql {
    fn render_table_reference(
        &self,
        tr: &mut Translator<'_>,
        table: &TableReference,
        lock_mode: LockMode,
    ) -> TranslateResult<bool> {
        standard::render_table_reference(tr, table, lock_mode)?;
        if lock_mode.requires_row_lock() && matches!(table, TableReference::Named { .. }) {
            let timeout = tr.lock_options().effective_timeout(lock_mode);
            let hints = Self::lock_hints(lock_mode, timeout).join(", ");
            tr.space()
                .push(Token::With)
                .space()
                .lparen()
                .push(Token::TableHint(hints))
                .rparen();
        }
        Ok(true)
    }

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

    /// `[ORDER BY (SELECT NULL)] OFFSET n ROWS [FETCH NEXT m ROWS ONLY]`
    fn visit_offset_fetch_clause(&self, tr: &mut Translator<'_>, part: &QueryPart) -> TranslateResult<()> {
        if !part.has_row_limit() || Self::uses_top(part) {
            return Ok(());
        }
        if part.fetch().is_some() && part.fetch_type() != FetchClauseType::RowsOnly {
            return Err(TranslationError::unsupported(
                self.name(),
                format!("OFFSET combined with a {:?} fetch", part.fetch_type()),
            ));
        }
        if part.order_by().is_empty() {
            tr.space()
                .push(Token::OrderBy)
                .space()
                .lparen()
                .push(Token::Select)
                .space()
                .push(Token::Null)
                .rparen();
        }
        tr.space().push(Token::Offset).space();
        match part.offset() {
            Some(offset) => tr.visit_expr(offset)?,
            None => {
                tr.push(Token::LitInt(0));
            }
        }
        tr.space().push(Token::Rows);
        if let Some(fetch) = part.fetch() {
            tr.space().push(Token::Fetch).space().push(Token::Next).space();
            tr.visit_expr(fetch)?;
            tr.space().push(Token::Rows).space().push(Token::Only);
        }
        Ok(())
    }

    fn render_row_limit_prefix(&self, tr: &mut Translator<'_>, part: &QueryPart) -> TranslateResult<()> {
        if !Self::uses_top(part) {
            return Ok(());
        }
        if part.fetch_type().with_ties() && part.order_by().is_empty() {
            return Err(TranslationError::invalid("TOP WITH TIES requires an ORDER BY"));
        }
        match part.fetch() {
            Some(fetch) => row_limit::render_top_clause(tr, fetch, part.fetch_type(), true),
            None => Ok(()),
        }
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

    /// `GROUP BY a, b WITH ROLLUP` in place of `ROLLUP(a, b)`.
    ///
    /// The suffix applies to the whole GROUP BY list, so the summarization
    /// must be its only item.
    fn render_partition_item(&self, tr: &mut Translator<'_>, expr: &Expr) -> TranslateResult<()> {
        match expr {
            Expr::Summarization { kind, groupings } => {
                if groupings.is_empty() {
                    return Err(TranslationError::invalid("summarization without groupings"));
                }
                if tr.group_by_len() != Some(1) {
                    let keyword = match kind {
                        SummarizationKind::Rollup => "ROLLUP",
                        SummarizationKind::Cube => "CUBE",
                    };
                    return Err(TranslationError::unsupported(
                        self.name(),
                        format!("{keyword} mixed with other GROUP BY items"),
                    ));
                }
                tr.render_comma_separated(groupings)?;
                tr.space().push(Token::With).space().push(match kind {
                    SummarizationKind::Rollup => Token::Rollup,
                    SummarizationKind::Cube => Token::Cube,
                });
                Ok(())
            }
            _ => standard::render_partition_item(tr, expr),
        }
    }
}
