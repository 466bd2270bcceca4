//! Row limiting for dialects without OFFSET/FETCH.
//!
//! The root query's limit is not rendered. It is captured as a [`RowLimit`]
//! and handed to the caller, who applies it when executing the statement
//! (statement max rows plus skipping rows on the result cursor). Nested
//! query parts can only be limited with `TOP`.

use serde::Serialize;

use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::expr::{Expr, Literal};
use crate::sql::query::{FetchClauseType, QueryPart};
use crate::sql::token::Token;
use crate::sql::translator::Translator;

/// A row count: either known up front or bound through a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLimitValue {
    Literal(u64),
    Parameter(String),
}

/// The root row limit left for the caller to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowLimit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_to_skip: Option<RowLimitValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<RowLimitValue>,
}

impl RowLimit {
    /// Statement-level max rows covering both the skipped and returned rows.
    ///
    /// `None` when there is no fetch or either value is a parameter.
    pub fn statement_max_rows(&self) -> Option<u64> {
        let max = match &self.max_rows {
            Some(RowLimitValue::Literal(n)) => *n,
            _ => return None,
        };
        match &self.rows_to_skip {
            None => Some(max),
            Some(RowLimitValue::Literal(skip)) => Some(skip.saturating_add(max)),
            Some(RowLimitValue::Parameter(_)) => None,
        }
    }
}

/// Reject `PERCENT` / `WITH TIES` fetches, which cannot be applied to a cursor.
pub fn assert_rows_only_fetch_clause_type(
    tr: &Translator<'_>,
    part: &QueryPart,
) -> TranslateResult<()> {
    let fetch_type = part.fetch_type();
    if part.fetch().is_some() && fetch_type != FetchClauseType::RowsOnly {
        return Err(TranslationError::unsupported(
            tr.dialect().name(),
            format!("Can't emulate fetch clause type: {fetch_type:?}"),
        ));
    }
    Ok(())
}

/// Validate a row count expression.
pub fn row_limit_value(
    tr: &Translator<'_>,
    expr: &Expr,
    clause: &str,
) -> TranslateResult<RowLimitValue> {
    match expr {
        Expr::Literal(Literal::Integer(n)) => u64::try_from(*n)
            .map(RowLimitValue::Literal)
            .map_err(|_| TranslationError::invalid(format!("negative {clause} row count {n}"))),
        Expr::Parameter { label } => Ok(RowLimitValue::Parameter(label.clone())),
        _ => Err(TranslationError::unsupported(
            tr.dialect().name(),
            format!("{clause} row count that is not an integer literal or parameter"),
        )),
    }
}

/// Record the root query's OFFSET/FETCH as the statement's [`RowLimit`].
pub fn capture_root_row_limit(tr: &mut Translator<'_>, part: &QueryPart) -> TranslateResult<()> {
    let dialect = tr.dialect();
    let rows_to_skip = match part.offset() {
        Some(offset) if dialect.needs_rows_to_skip() => Some(row_limit_value(tr, offset, "OFFSET")?),
        Some(_) => return Err(TranslationError::unsupported(dialect.name(), "OFFSET clause")),
        None => None,
    };
    let max_rows = match part.fetch() {
        Some(fetch) if dialect.needs_max_rows() => Some(row_limit_value(tr, fetch, "FETCH")?),
        Some(_) => return Err(TranslationError::unsupported(dialect.name(), "FETCH clause")),
        None => None,
    };
    if rows_to_skip.is_some() || max_rows.is_some() {
        tr.set_row_limit(RowLimit {
            rows_to_skip,
            max_rows,
        });
    }
    Ok(())
}

/// ` TOP n` or, when `parenthesized`, ` TOP (n) [PERCENT] [WITH TIES]`.
///
/// The bare form only takes an integer literal.
pub fn render_top_clause(
    tr: &mut Translator<'_>,
    fetch: &Expr,
    fetch_type: FetchClauseType,
    parenthesized: bool,
) -> TranslateResult<()> {
    let dialect = tr.dialect();
    if !dialect.supports_top_clause() {
        return Err(TranslationError::unsupported(dialect.name(), "TOP clause"));
    }
    tr.space().push(Token::Top).space();
    if parenthesized {
        tr.push(Token::LParen);
        tr.visit_expr(fetch)?;
        tr.push(Token::RParen);
    } else {
        match row_limit_value(tr, fetch, "TOP")? {
            RowLimitValue::Literal(_) => tr.visit_expr(fetch)?,
            RowLimitValue::Parameter(_) => {
                return Err(TranslationError::unsupported(
                    dialect.name(),
                    "parameterized TOP row count",
                ))
            }
        }
    }
    if fetch_type.is_percent() {
        tr.space().push(Token::Percent);
    }
    if fetch_type.with_ties() {
        tr.space().push(Token::WithTies);
    }
    Ok(())
}
