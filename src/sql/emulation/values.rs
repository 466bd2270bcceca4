//! Multi-row `VALUES` for dialects that accept a single row per INSERT.

use tracing::debug;

use crate::sql::error::TranslateResult;
use crate::sql::expr::Expr;
use crate::sql::token::Token;
use crate::sql::translator::Translator;

/// `SELECT 1, 'a' UNION ALL SELECT 2, 'b'`
pub fn render_values_as_union_all(
    tr: &mut Translator<'_>,
    rows: &[Vec<Expr>],
) -> TranslateResult<()> {
    debug!(rows = rows.len(), "rendering VALUES rows as UNION ALL");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            tr.space()
                .push(Token::Union)
                .space()
                .push(Token::All)
                .space();
        }
        tr.push(Token::Select).space();
        tr.render_comma_separated(row)?;
    }
    Ok(())
}
