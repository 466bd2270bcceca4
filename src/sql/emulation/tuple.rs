//! Row-value constructor emulation.
//!
//! Dialects without `(a, b) op (x, y)` support get the comparison expanded
//! into per-column predicates with the same three-valued result.

use super::intersect;
use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::expr::{ComparisonOperator, Expr, Quantifier};
use crate::sql::query::QueryPart;
use crate::sql::token::Token;
use crate::sql::translator::Translator;

/// Expand `(lhs...) op (rhs...)` into scalar comparisons.
///
/// - `=` becomes `a = x AND b = y`
/// - `<>` becomes `(a <> x OR b <> y)`
/// - ordering operators use the lexicographic expansion
///   `(a < x OR a = x AND b < y)`, or with `index_optimized` the
///   leading-column form `(a <= x AND NOT (a = x AND b >= y))`, which lets
///   an index on the first column drive the scan
pub fn emulate_tuple_comparison(
    tr: &mut Translator<'_>,
    lhs: &[Expr],
    rhs: &[Expr],
    op: ComparisonOperator,
    index_optimized: bool,
) -> TranslateResult<()> {
    check_arity(lhs, rhs)?;
    tracing::trace!(?op, arity = lhs.len(), index_optimized, "expanding row-value comparison");

    match op {
        ComparisonOperator::Equal => render_conjunction(tr, lhs, rhs, ComparisonOperator::Equal),
        ComparisonOperator::NotEqual => {
            tr.push(Token::LParen);
            for (i, (l, r)) in lhs.iter().zip(rhs).enumerate() {
                if i > 0 {
                    tr.space().push(Token::Or).space();
                }
                render_component(tr, l, ComparisonOperator::NotEqual, r)?;
            }
            tr.push(Token::RParen);
            Ok(())
        }
        ComparisonOperator::DistinctFrom | ComparisonOperator::NotDistinctFrom => {
            intersect::emulate_distinct_from_items(tr, lhs, op, rhs)
        }
        _ if lhs.len() == 1 => render_component(tr, &lhs[0], op, &rhs[0]),
        _ if index_optimized => render_index_optimized(tr, lhs, rhs, op),
        _ => render_lexicographic(tr, lhs, rhs, op),
    }
}

/// `(a, b) [NOT] IN ((1, 2), (3, 4))` as ORed equality expansions.
pub fn emulate_tuple_in_list(
    tr: &mut Translator<'_>,
    lhs: &[Expr],
    list: &[Expr],
    negated: bool,
) -> TranslateResult<()> {
    let rows = list
        .iter()
        .map(|item| {
            item.as_tuple().ok_or_else(|| {
                TranslationError::invalid("IN list of a row value must contain row values")
            })
        })
        .collect::<TranslateResult<Vec<_>>>()?;

    if negated {
        tr.push(Token::Not).space();
    }
    let multiple = rows.len() > 1;
    if multiple || negated {
        tr.push(Token::LParen);
    }
    for (i, row) in rows.iter().enumerate() {
        check_arity(lhs, row)?;
        if i > 0 {
            tr.space().push(Token::Or).space();
        }
        if multiple {
            tr.push(Token::LParen);
        }
        render_conjunction(tr, lhs, row, ComparisonOperator::Equal)?;
        if multiple {
            tr.push(Token::RParen);
        }
    }
    if multiple || negated {
        tr.push(Token::RParen);
    }
    Ok(())
}

/// `(a, b) op ANY|ALL (SELECT x, y FROM ...)` as a correlated `[NOT] EXISTS`.
///
/// ANY holds when some row satisfies the comparison; ALL holds when no row
/// satisfies the negated comparison. The subquery's select items move to
/// the left-hand side, so the hook receives the inverted operator.
///
/// For `NOT IN` this differs from the native predicate when either side
/// contains NULL: the native form yields UNKNOWN, the emulation TRUE.
pub fn emulate_subquery_comparison(
    tr: &mut Translator<'_>,
    lhs: &[Expr],
    subquery: &QueryPart,
    op: ComparisonOperator,
    quantifier: Quantifier,
    negated: bool,
) -> TranslateResult<()> {
    let dialect = tr.dialect();
    let QueryPart::Spec(spec) = subquery else {
        return Err(TranslationError::unsupported(
            dialect.name(),
            "row-value comparison against a set operation subquery",
        ));
    };
    if spec.has_row_limit() {
        return Err(TranslationError::unsupported(
            dialect.name(),
            "row-value comparison against a subquery with OFFSET/FETCH",
        ));
    }
    if spec.select.selections.len() != lhs.len() {
        return Err(TranslationError::invalid(format!(
            "row value of {} elements compared with a subquery selecting {}",
            lhs.len(),
            spec.select.selections.len()
        )));
    }

    let (not_exists, row_op) = match quantifier {
        Quantifier::Any => (false, op),
        Quantifier::All => (true, op.negated()),
    };
    let not_exists = not_exists != negated;
    let select_op = row_op.invert();
    tracing::trace!(?quantifier, ?op, not_exists, "emulating row-value subquery predicate");

    if not_exists {
        tr.push(Token::Not).space();
    }
    tr.push(Token::Exists)
        .space()
        .lparen()
        .push(Token::Select)
        .space()
        .push(Token::LitInt(1));

    tr.in_query_part(false, |tr| {
        if !spec.from.is_empty() {
            tr.space().push(Token::From).space();
            tr.render_from_clause(&spec.from)?;
        }
        let grouped = !spec.group_by.is_empty() || spec.having.is_some();
        if grouped {
            if let Some(predicate) = &spec.where_clause {
                tr.space().push(Token::Where).space();
                tr.visit_expr(predicate)?;
            }
            if !spec.group_by.is_empty() {
                tr.space().push(Token::GroupBy).space();
                tr.render_partition_items(&spec.group_by)?;
            }
            tr.space().push(Token::Having).space();
            if let Some(predicate) = &spec.having {
                tr.render_conjunct(predicate)?;
                tr.space().push(Token::And).space();
            }
        } else {
            tr.space().push(Token::Where).space();
            if let Some(predicate) = &spec.where_clause {
                tr.render_conjunct(predicate)?;
                tr.space().push(Token::And).space();
            }
        }
        dialect.render_select_tuple_comparison(tr, &spec.select.selections, lhs, select_op)
    })?;

    tr.push(Token::RParen);
    Ok(())
}

/// `(a, b) IS [NOT] NULL` as `a IS [NOT] NULL AND b IS [NOT] NULL`.
pub fn emulate_tuple_null_check(
    tr: &mut Translator<'_>,
    items: &[Expr],
    negated: bool,
) -> TranslateResult<()> {
    if items.is_empty() {
        return Err(TranslationError::invalid("empty row value"));
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            tr.space().push(Token::And).space();
        }
        tr.visit_operand(item)?;
        tr.space().push(Token::Is).space();
        if negated {
            tr.push(Token::Not).space();
        }
        tr.push(Token::Null);
    }
    Ok(())
}

fn check_arity(lhs: &[Expr], rhs: &[Expr]) -> TranslateResult<()> {
    if lhs.is_empty() || lhs.len() != rhs.len() {
        return Err(TranslationError::invalid(format!(
            "row values of different arity ({} and {})",
            lhs.len(),
            rhs.len()
        )));
    }
    Ok(())
}

fn render_component(
    tr: &mut Translator<'_>,
    lhs: &Expr,
    op: ComparisonOperator,
    rhs: &Expr,
) -> TranslateResult<()> {
    tr.visit_operand(lhs)?;
    tr.space().extend(op.tokens()).space();
    tr.visit_operand(rhs)
}

fn render_conjunction(
    tr: &mut Translator<'_>,
    lhs: &[Expr],
    rhs: &[Expr],
    op: ComparisonOperator,
) -> TranslateResult<()> {
    for (i, (l, r)) in lhs.iter().zip(rhs).enumerate() {
        if i > 0 {
            tr.space().push(Token::And).space();
        }
        render_component(tr, l, op, r)?;
    }
    Ok(())
}

/// `(a < x OR a = x AND <rest>)`; the last column keeps the original operator.
fn render_lexicographic(
    tr: &mut Translator<'_>,
    lhs: &[Expr],
    rhs: &[Expr],
    op: ComparisonOperator,
) -> TranslateResult<()> {
    if lhs.len() == 1 {
        return render_component(tr, &lhs[0], op, &rhs[0]);
    }
    tr.push(Token::LParen);
    render_component(tr, &lhs[0], op.sharper(), &rhs[0])?;
    tr.space().push(Token::Or).space();
    render_component(tr, &lhs[0], ComparisonOperator::Equal, &rhs[0])?;
    tr.space().push(Token::And).space();
    render_lexicographic(tr, &lhs[1..], &rhs[1..], op)?;
    tr.push(Token::RParen);
    Ok(())
}

/// `(a <= x AND NOT (a = x AND <rest negated>))`
fn render_index_optimized(
    tr: &mut Translator<'_>,
    lhs: &[Expr],
    rhs: &[Expr],
    op: ComparisonOperator,
) -> TranslateResult<()> {
    tr.push(Token::LParen);
    render_component(tr, &lhs[0], op.broader(), &rhs[0])?;
    tr.space()
        .push(Token::And)
        .space()
        .push(Token::Not)
        .space()
        .lparen();
    render_component(tr, &lhs[0], ComparisonOperator::Equal, &rhs[0])?;
    tr.space().push(Token::And).space();
    render_lexicographic(tr, &lhs[1..], &rhs[1..], op.negated())?;
    tr.push(Token::RParen).rparen();
    Ok(())
}
