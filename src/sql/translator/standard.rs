//! Standard SQL renderings behind every [`DialectTranslator`](super::DialectTranslator) hook.
//!
//! Dialect overrides call back into these when they only decorate the
//! standard output (for example appending a table hint).

use super::Translator;
use crate::sql::emulation::{intersect, tuple};
use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::expr::{ComparisonOperator, Expr, SummarizationKind};
use crate::sql::lock::{ForUpdateClause, LockMode, LockTimeout};
use crate::sql::query::{CteStatement, QueryPart, QuerySpec, SearchKind, SqlSelection, TableReference};
use crate::sql::token::Token;

pub fn render_table_reference(
    tr: &mut Translator<'_>,
    table: &TableReference,
    _lock_mode: LockMode,
) -> TranslateResult<bool> {
    match table {
        TableReference::Named { table, alias } => {
            tr.render_qualified_name(table);
            if let Some(alias) = alias {
                tr.space().push(Token::Ident(alias.clone()));
            }
        }
        TableReference::Derived {
            query,
            alias,
            columns,
        } => {
            tr.push(Token::LParen);
            tr.visit_nested_query_part(query)?;
            tr.push(Token::RParen)
                .space()
                .push(Token::Ident(alias.clone()));
            if !columns.is_empty() {
                tr.space().lparen();
                tr.render_identifier_list(columns);
                tr.push(Token::RParen);
            }
        }
    }
    Ok(false)
}

pub fn render_for_update_clause(
    tr: &mut Translator<'_>,
    _spec: &QuerySpec,
    clause: &ForUpdateClause,
) -> TranslateResult<()> {
    if !tr.dialect().supports_for_update() {
        return Err(TranslationError::unsupported(
            tr.dialect().name(),
            "FOR UPDATE clause",
        ));
    }
    let qualify = !tr.lock_options().alias_specific.is_empty() && !clause.aliases.is_empty();
    let timeout = tr.lock_options().effective_timeout(clause.lock_mode);

    tr.space().push(Token::ForUpdate);
    if qualify {
        tr.space().push(Token::Of).space();
        tr.render_identifier_list(&clause.aliases);
    }
    match timeout {
        LockTimeout::Wait => {}
        LockTimeout::NoWait => {
            tr.space().push(Token::NoWait);
        }
        LockTimeout::SkipLocked => {
            tr.space().push(Token::SkipLocked);
        }
        LockTimeout::Seconds(seconds) => {
            tr.space()
                .push(Token::Wait)
                .space()
                .push(Token::LitInt(i64::from(seconds)));
        }
    }
    Ok(())
}

pub fn render_search_clause(tr: &mut Translator<'_>, cte: &CteStatement) -> TranslateResult<()> {
    let Some(search) = &cte.search else {
        return Ok(());
    };
    if !tr.dialect().supports_search_clause() {
        return Err(TranslationError::unsupported(
            tr.dialect().name(),
            "SEARCH clause",
        ));
    }
    let kind = match search.kind {
        SearchKind::BreadthFirst => Token::BreadthFirstBy,
        SearchKind::DepthFirst => Token::DepthFirstBy,
    };
    tr.space().push(Token::Search).space().push(kind).space();
    tr.render_identifier_list(&search.by);
    tr.space()
        .push(Token::Set)
        .space()
        .push(Token::Ident(search.sequence_column.clone()));
    Ok(())
}

pub fn render_cycle_clause(tr: &mut Translator<'_>, cte: &CteStatement) -> TranslateResult<()> {
    let Some(cycle) = &cte.cycle else {
        return Ok(());
    };
    if !tr.dialect().supports_cycle_clause() {
        return Err(TranslationError::unsupported(
            tr.dialect().name(),
            "CYCLE clause",
        ));
    }
    tr.space().push(Token::Cycle).space();
    tr.render_identifier_list(&cycle.columns);
    tr.space()
        .push(Token::Set)
        .space()
        .push(Token::Ident(cycle.mark_column.clone()))
        .space()
        .push(Token::To)
        .space();
    tr.visit_expr(&Expr::Literal(cycle.mark_value.clone()))?;
    tr.space().push(Token::Default).space();
    tr.visit_expr(&Expr::Literal(cycle.default_value.clone()))?;
    if let Some(path) = &cycle.path_column {
        tr.space()
            .push(Token::Using)
            .space()
            .push(Token::Ident(path.clone()));
    }
    Ok(())
}

/// `OFFSET n ROWS FETCH FIRST m [PERCENT] ROWS {ONLY | WITH TIES}`
pub fn visit_offset_fetch_clause(tr: &mut Translator<'_>, part: &QueryPart) -> TranslateResult<()> {
    if !part.has_row_limit() {
        return Ok(());
    }
    if !tr.dialect().supports_offset_fetch() {
        return Err(TranslationError::unsupported(
            tr.dialect().name(),
            "OFFSET/FETCH clause",
        ));
    }
    if let Some(offset) = part.offset() {
        tr.space().push(Token::Offset).space();
        tr.visit_expr(offset)?;
        tr.space().push(Token::Rows);
    }
    if let Some(fetch) = part.fetch() {
        let fetch_type = part.fetch_type();
        tr.space().push(Token::Fetch).space().push(Token::First).space();
        tr.visit_expr(fetch)?;
        if fetch_type.is_percent() {
            tr.space().push(Token::Percent);
        }
        tr.space().push(Token::Rows).space().push(if fetch_type.with_ties() {
            Token::WithTies
        } else {
            Token::Only
        });
    }
    Ok(())
}

pub fn render_row_limit_prefix(_tr: &mut Translator<'_>, _part: &QueryPart) -> TranslateResult<()> {
    Ok(())
}

/// `lhs op rhs`, emulating row values and the distinct predicates where the
/// dialect lacks them.
pub fn render_comparison(
    tr: &mut Translator<'_>,
    lhs: &Expr,
    op: ComparisonOperator,
    rhs: &Expr,
) -> TranslateResult<()> {
    let dialect = tr.dialect();
    if op.is_distinct_predicate() && !dialect.supports_distinct_from_predicate() {
        return intersect::emulate_distinct_from(tr, lhs, op, rhs);
    }

    let has_tuple = lhs.as_tuple().is_some() || rhs.as_tuple().is_some();
    if has_tuple && !dialect.supports_row_value_constructor_syntax() {
        let (Some(lhs_items), Some(rhs_items)) = (lhs.as_tuple(), rhs.as_tuple()) else {
            return Err(TranslationError::invalid(
                "row value compared with a non-row operand",
            ));
        };
        if op.is_distinct_predicate() {
            return intersect::emulate_distinct_from(tr, lhs, op, rhs);
        }
        return tuple::emulate_tuple_comparison(tr, lhs_items, rhs_items, op, false);
    }

    tr.visit_operand(lhs)?;
    tr.space().extend(op.tokens()).space();
    tr.visit_operand(rhs)
}

pub fn render_select_tuple_comparison(
    tr: &mut Translator<'_>,
    selections: &[SqlSelection],
    tuple: &[Expr],
    op: ComparisonOperator,
) -> TranslateResult<()> {
    let lhs: Vec<Expr> = selections.iter().map(|s| s.expression.clone()).collect();
    if tr.dialect().supports_row_value_constructor_syntax() {
        tr.push(Token::LParen);
        tr.render_comma_separated(&lhs)?;
        tr.push(Token::RParen).space().extend(op.tokens()).space().lparen();
        tr.render_comma_separated(tuple)?;
        tr.push(Token::RParen);
        Ok(())
    } else {
        tuple::emulate_tuple_comparison(tr, &lhs, tuple, op, false)
    }
}

/// Literal items become the empty grouping set `()`; summarizations
/// render as `ROLLUP(...)` / `CUBE(...)`.
pub fn render_partition_item(tr: &mut Translator<'_>, expr: &Expr) -> TranslateResult<()> {
    match expr {
        Expr::Literal(_) => {
            tr.push(Token::LParen).rparen();
            Ok(())
        }
        Expr::Summarization { kind, groupings } => {
            if !tr.dialect().supports_summarization() {
                return Err(TranslationError::unsupported(
                    tr.dialect().name(),
                    "GROUP BY summarization",
                ));
            }
            tr.push(match kind {
                SummarizationKind::Rollup => Token::Rollup,
                SummarizationKind::Cube => Token::Cube,
            })
            .lparen();
            tr.render_comma_separated(groupings)?;
            tr.push(Token::RParen);
            Ok(())
        }
        _ => tr.visit_expr(expr),
    }
}
