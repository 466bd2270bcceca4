//! NULLS FIRST / NULLS LAST emulation.

use crate::sql::error::TranslateResult;
use crate::sql::expr::{NullPrecedence, SortSpecification};
use crate::sql::token::Token;
use crate::sql::translator::Translator;

/// Render the extra sort key placed ahead of `item`:
/// `CASE WHEN e IS NULL THEN 0 ELSE 1 END` puts nulls first, the swapped
/// ranks put them last.
pub fn render_null_precedence_item(
    tr: &mut Translator<'_>,
    item: &SortSpecification,
) -> TranslateResult<()> {
    let Some(nulls) = item.nulls else {
        return Ok(());
    };
    let (null_rank, other_rank) = match nulls {
        NullPrecedence::First => (0, 1),
        NullPrecedence::Last => (1, 0),
    };
    tr.push(Token::Case).space().push(Token::When).space();
    tr.visit_operand(&item.expr)?;
    tr.space()
        .push(Token::Is)
        .space()
        .push(Token::Null)
        .space()
        .push(Token::Then)
        .space()
        .push(Token::LitInt(null_rank))
        .space()
        .push(Token::Else)
        .space()
        .push(Token::LitInt(other_rank))
        .space()
        .push(Token::End);
    Ok(())
}
