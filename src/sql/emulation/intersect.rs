//! `IS [NOT] DISTINCT FROM` emulation.
//!
//! With INTERSECT available the null-safe comparison becomes
//! `EXISTS (SELECT l INTERSECT SELECT r)`, since INTERSECT treats NULLs as
//! equal. Without it a CASE expression spells out the null handling.

use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::expr::{ComparisonOperator, Expr};
use crate::sql::token::Token;
use crate::sql::translator::{standard, Translator};

/// Comparison strategy for dialects without the distinct predicates: the
/// distinct operators are emulated, everything else renders as standard.
pub fn render_comparison_emulate_intersect(
    tr: &mut Translator<'_>,
    lhs: &Expr,
    op: ComparisonOperator,
    rhs: &Expr,
) -> TranslateResult<()> {
    if op.is_distinct_predicate() {
        emulate_distinct_from(tr, lhs, op, rhs)
    } else {
        standard::render_comparison(tr, lhs, op, rhs)
    }
}

/// Emulate `lhs IS [NOT] DISTINCT FROM rhs`; row values compare element-wise.
pub fn emulate_distinct_from(
    tr: &mut Translator<'_>,
    lhs: &Expr,
    op: ComparisonOperator,
    rhs: &Expr,
) -> TranslateResult<()> {
    let lhs_items = lhs.as_tuple().unwrap_or(std::slice::from_ref(lhs));
    let rhs_items = rhs.as_tuple().unwrap_or(std::slice::from_ref(rhs));
    emulate_distinct_from_items(tr, lhs_items, op, rhs_items)
}

pub fn emulate_distinct_from_items(
    tr: &mut Translator<'_>,
    lhs: &[Expr],
    op: ComparisonOperator,
    rhs: &[Expr],
) -> TranslateResult<()> {
    if lhs.is_empty() || lhs.len() != rhs.len() {
        return Err(TranslationError::invalid(format!(
            "distinct predicate over operands of different arity ({} and {})",
            lhs.len(),
            rhs.len()
        )));
    }
    let distinct = match op {
        ComparisonOperator::DistinctFrom => true,
        ComparisonOperator::NotDistinctFrom => false,
        other => {
            return Err(TranslationError::invalid(format!(
                "{other:?} is not a distinct predicate"
            )))
        }
    };

    if tr.dialect().supports_intersect() {
        if distinct {
            tr.push(Token::Not).space();
        }
        tr.push(Token::Exists)
            .space()
            .lparen()
            .push(Token::Select)
            .space();
        tr.render_comma_separated(lhs)?;
        tr.space().push(Token::Intersect).space().push(Token::Select).space();
        tr.render_comma_separated(rhs)?;
        tr.push(Token::RParen);
        return Ok(());
    }

    tr.push(Token::Case).space().push(Token::When).space();
    for (i, (l, r)) in lhs.iter().zip(rhs).enumerate() {
        if i > 0 {
            tr.space().push(Token::And).space();
        }
        tr.push(Token::LParen);
        tr.visit_operand(l)?;
        tr.space().push(Token::Eq).space();
        tr.visit_operand(r)?;
        tr.space().push(Token::Or).space();
        tr.visit_operand(l)?;
        tr.space().push(Token::Is).space().push(Token::Null);
        tr.space().push(Token::And).space();
        tr.visit_operand(r)?;
        tr.space()
            .push(Token::Is)
            .space()
            .push(Token::Null)
            .rparen();
    }
    tr.space()
        .push(Token::Then)
        .space()
        .push(Token::LitInt(1))
        .space()
        .push(Token::Else)
        .space()
        .push(Token::LitInt(0))
        .space()
        .push(Token::End)
        .space()
        .push(Token::Eq)
        .space()
        .push(Token::LitInt(if distinct { 0 } else { 1 }));
    Ok(())
}
