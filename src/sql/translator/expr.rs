//! Expression rendering.

use super::Translator;
use crate::sql::dialect::PositionFunction;
use crate::sql::emulation::tuple;
use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::expr::{
    ComparisonOperator, Expr, JunctionKind, Literal, Quantifier, WindowFrame, WindowFrameBound,
    WindowFrameKind,
};
use crate::sql::query::QueryPart;
use crate::sql::token::Token;

impl Translator<'_> {
    /// Render any expression.
    pub fn visit_expr(&mut self, expr: &Expr) -> TranslateResult<()> {
        match expr {
            Expr::Column { qualifier, name } => {
                if let Some(q) = qualifier {
                    self.push(Token::Ident(q.clone())).push(Token::Dot);
                }
                self.push(Token::Ident(name.clone()));
                Ok(())
            }

            Expr::Literal(lit) => self.visit_literal(lit),

            Expr::Parameter { label } => {
                self.push(Token::Placeholder);
                self.register_parameter(label);
                Ok(())
            }

            Expr::Tuple(items) => {
                if items.is_empty() {
                    return Err(TranslationError::invalid("empty row value"));
                }
                if !self.dialect.supports_row_value_constructor_syntax() {
                    return Err(self.unsupported("row value outside a comparison"));
                }
                self.push(Token::LParen);
                self.render_comma_separated(items)?;
                self.push(Token::RParen);
                Ok(())
            }

            Expr::Comparison { lhs, op, rhs } => self.visit_comparison(lhs, *op, rhs),

            Expr::Quantified {
                quantifier,
                subquery,
            } => {
                self.push(match quantifier {
                    Quantifier::All => Token::All,
                    Quantifier::Any => Token::Any,
                })
                .space();
                self.render_subquery(subquery)
            }

            Expr::Junction { kind, items } => self.visit_junction(*kind, items),

            Expr::Not(inner) => {
                self.push(Token::Not).space().lparen();
                self.visit_expr(inner)?;
                self.push(Token::RParen);
                Ok(())
            }

            Expr::Arithmetic { lhs, op, rhs } => {
                self.visit_arithmetic_operand(lhs)?;
                self.space().push(op.token()).space();
                self.visit_arithmetic_operand(rhs)
            }

            Expr::Concat(parts) => {
                if parts.is_empty() {
                    return Err(TranslationError::invalid("empty concatenation"));
                }
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        self.space().push(Token::Concat).space();
                    }
                    self.visit_arithmetic_operand(part)?;
                }
                Ok(())
            }

            Expr::Function {
                name,
                args,
                distinct,
            } => {
                self.push(Token::FunctionName(name.clone())).lparen();
                if *distinct {
                    self.push(Token::Distinct).space();
                }
                self.render_comma_separated(args)?;
                self.push(Token::RParen);
                Ok(())
            }

            Expr::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                if when_clauses.is_empty() {
                    return Err(TranslationError::invalid("CASE without WHEN clauses"));
                }
                self.push(Token::Case);
                if let Some(operand) = operand {
                    self.space();
                    self.visit_expr(operand)?;
                }
                for (when, then) in when_clauses {
                    self.space().push(Token::When).space();
                    self.visit_expr(when)?;
                    self.space().push(Token::Then).space();
                    self.visit_expr(then)?;
                }
                if let Some(else_expr) = else_clause {
                    self.space().push(Token::Else).space();
                    self.visit_expr(else_expr)?;
                }
                self.space().push(Token::End);
                Ok(())
            }

            Expr::InList {
                expr,
                list,
                negated,
            } => self.visit_in_list(expr, list, *negated),

            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => {
                if let Some(items) = expr.as_tuple() {
                    if !self
                        .dialect
                        .supports_row_value_constructor_syntax_in_quantified_predicates()
                    {
                        // x IN (q) is x = ANY (q); NOT IN is NOT (x = ANY (q))
                        return tuple::emulate_subquery_comparison(
                            self,
                            items,
                            subquery,
                            ComparisonOperator::Equal,
                            Quantifier::Any,
                            *negated,
                        );
                    }
                }
                self.visit_operand(expr)?;
                if *negated {
                    self.space().push(Token::Not);
                }
                self.space().push(Token::In).space();
                self.render_subquery(subquery)
            }

            Expr::Exists { subquery, negated } => {
                if *negated {
                    self.push(Token::Not).space();
                }
                self.push(Token::Exists).space();
                self.render_subquery(subquery)
            }

            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                if let Some(items) = expr.as_tuple() {
                    if !self.dialect.supports_row_value_constructor_syntax() {
                        return self.visit_tuple_between(items, low, high, *negated);
                    }
                }
                self.visit_operand(expr)?;
                if *negated {
                    self.space().push(Token::Not);
                }
                self.space().push(Token::Between).space();
                self.visit_operand(low)?;
                self.space().push(Token::And).space();
                self.visit_operand(high)
            }

            Expr::IsNull { expr, negated } => {
                if let Some(items) = expr.as_tuple() {
                    if !self.dialect.supports_row_value_constructor_syntax() {
                        return tuple::emulate_tuple_null_check(self, items, *negated);
                    }
                }
                self.visit_operand(expr)?;
                self.space().push(Token::Is).space();
                if *negated {
                    self.push(Token::Not).space();
                }
                self.push(Token::Null);
                Ok(())
            }

            Expr::Like {
                expr,
                pattern,
                escape,
                negated,
            } => {
                self.visit_operand(expr)?;
                if *negated {
                    self.space().push(Token::Not);
                }
                self.space().push(Token::Like).space();
                self.visit_operand(pattern)?;
                if let Some(escape) = escape {
                    self.space()
                        .push(Token::Escape)
                        .space()
                        .push(Token::LitString(escape.to_string()));
                }
                Ok(())
            }

            Expr::Cast { expr, target } => {
                self.push(Token::Cast).lparen();
                self.visit_expr(expr)?;
                self.space()
                    .push(Token::As)
                    .space()
                    .push(Token::Raw(target.clone()))
                    .rparen();
                Ok(())
            }

            Expr::Position { needle, haystack } => {
                match self.dialect.position_function() {
                    PositionFunction::PositionIn => {
                        self.push(Token::FunctionName("position".into())).lparen();
                        self.visit_expr(needle)?;
                        self.space().push(Token::In).space();
                        self.visit_expr(haystack)?;
                    }
                    PositionFunction::Charindex => {
                        self.push(Token::FunctionName("charindex".into())).lparen();
                        self.visit_expr(needle)?;
                        self.push(Token::Comma).space();
                        self.visit_expr(haystack)?;
                    }
                }
                self.push(Token::RParen);
                Ok(())
            }

            Expr::Subquery(subquery) => self.render_subquery(subquery),

            Expr::Summarization { .. } => {
                let dialect = self.dialect;
                dialect.render_partition_item(self, expr)
            }

            Expr::Window {
                function,
                partition_by,
                order_by,
                frame,
            } => {
                self.visit_expr(function)?;
                self.space().push(Token::Over).space().lparen();
                let mut needs_space = false;
                if !partition_by.is_empty() {
                    if partition_by
                        .iter()
                        .any(|item| matches!(item, Expr::Summarization { .. }))
                    {
                        return Err(TranslationError::invalid(
                            "ROLLUP/CUBE inside PARTITION BY",
                        ));
                    }
                    self.push(Token::PartitionBy).space();
                    let outer = self.group_by_len.take();
                    let result = self.render_partition_items(partition_by);
                    self.group_by_len = outer;
                    result?;
                    needs_space = true;
                }
                if !order_by.is_empty() {
                    if needs_space {
                        self.space();
                    }
                    self.push(Token::OrderBy).space();
                    self.render_sort_specifications(order_by)?;
                    needs_space = true;
                }
                if let Some(frame) = frame {
                    if order_by.is_empty() {
                        return Err(TranslationError::invalid(
                            "window frame requires ORDER BY",
                        ));
                    }
                    if needs_space {
                        self.space();
                    }
                    self.render_window_frame(frame)?;
                }
                self.push(Token::RParen);
                Ok(())
            }

            Expr::Star { qualifier } => {
                if let Some(q) = qualifier {
                    self.push(Token::Ident(q.clone())).push(Token::Dot);
                }
                self.push(Token::Star);
                Ok(())
            }
        }
    }

    fn visit_literal(&mut self, lit: &Literal) -> TranslateResult<()> {
        let token = match lit {
            Literal::Integer(n) => Token::LitInt(*n),
            Literal::Float(f) => {
                if !f.is_finite() {
                    return Err(TranslationError::invalid(format!(
                        "non-finite float literal {f}"
                    )));
                }
                Token::LitFloat(*f)
            }
            Literal::String(s) => Token::LitString(s.clone()),
            Literal::Boolean(b) => Token::LitBool(*b),
            Literal::Null => Token::LitNull,
        };
        self.push(token);
        Ok(())
    }

    /// Render an operand of a predicate, parenthesizing nested predicates.
    pub fn visit_operand(&mut self, expr: &Expr) -> TranslateResult<()> {
        let wrap = matches!(expr, Expr::Junction { .. } | Expr::Comparison { .. });
        if wrap {
            self.push(Token::LParen);
        }
        self.visit_expr(expr)?;
        if wrap {
            self.push(Token::RParen);
        }
        Ok(())
    }

    fn visit_arithmetic_operand(&mut self, expr: &Expr) -> TranslateResult<()> {
        let wrap = matches!(
            expr,
            Expr::Arithmetic { .. } | Expr::Junction { .. } | Expr::Comparison { .. }
        );
        if wrap {
            self.push(Token::LParen);
        }
        self.visit_expr(expr)?;
        if wrap {
            self.push(Token::RParen);
        }
        Ok(())
    }

    /// `(SELECT ...)`
    pub fn render_subquery(&mut self, subquery: &QueryPart) -> TranslateResult<()> {
        self.push(Token::LParen);
        self.visit_nested_query_part(subquery)?;
        self.push(Token::RParen);
        Ok(())
    }

    fn visit_junction(&mut self, kind: JunctionKind, items: &[Expr]) -> TranslateResult<()> {
        if items.is_empty() {
            return Err(TranslationError::invalid("empty AND/OR junction"));
        }
        let separator = match kind {
            JunctionKind::And => Token::And,
            JunctionKind::Or => Token::Or,
        };
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.space().push(separator.clone()).space();
            }
            let wrap = matches!(item, Expr::Junction { kind: inner, .. } if *inner != kind);
            if wrap {
                self.push(Token::LParen);
            }
            self.visit_expr(item)?;
            if wrap {
                self.push(Token::RParen);
            }
        }
        Ok(())
    }

    fn visit_comparison(
        &mut self,
        lhs: &Expr,
        op: ComparisonOperator,
        rhs: &Expr,
    ) -> TranslateResult<()> {
        if lhs.as_tuple().is_none() && rhs.as_tuple().is_some() {
            return self.visit_comparison(rhs, op.invert(), lhs);
        }

        if let Some(items) = lhs.as_tuple() {
            let quantified = match rhs {
                Expr::Quantified {
                    quantifier,
                    subquery,
                } => Some((*quantifier, subquery)),
                // A row subquery yields at most one row, where ANY and ALL agree.
                Expr::Subquery(subquery) => Some((Quantifier::Any, subquery)),
                _ => None,
            };
            if let Some((quantifier, subquery)) = quantified {
                if !self
                    .dialect
                    .supports_row_value_constructor_syntax_in_quantified_predicates()
                {
                    return tuple::emulate_subquery_comparison(
                        self, items, subquery, op, quantifier, false,
                    );
                }
                self.visit_expr(lhs)?;
                self.space().extend(op.tokens()).space();
                return self.visit_expr(rhs);
            }
        }

        let dialect = self.dialect;
        dialect.render_comparison(self, lhs, op, rhs)
    }

    /// `(a, b) BETWEEN (x1, y1) AND (x2, y2)` as
    /// `(a, b) >= (x1, y1) AND (a, b) <= (x2, y2)`, both sides expanded.
    fn visit_tuple_between(
        &mut self,
        items: &[Expr],
        low: &Expr,
        high: &Expr,
        negated: bool,
    ) -> TranslateResult<()> {
        let (Some(low_items), Some(high_items)) = (low.as_tuple(), high.as_tuple()) else {
            return Err(TranslationError::invalid(
                "row value BETWEEN with non-row bounds",
            ));
        };
        if negated {
            self.push(Token::Not).space().lparen();
        }
        tuple::emulate_tuple_comparison(
            self,
            items,
            low_items,
            ComparisonOperator::GreaterThanOrEqual,
            false,
        )?;
        self.space().push(Token::And).space();
        tuple::emulate_tuple_comparison(
            self,
            items,
            high_items,
            ComparisonOperator::LessThanOrEqual,
            false,
        )?;
        if negated {
            self.push(Token::RParen);
        }
        Ok(())
    }

    fn visit_in_list(&mut self, expr: &Expr, list: &[Expr], negated: bool) -> TranslateResult<()> {
        if list.is_empty() {
            // x IN () is never true; x NOT IN () always is
            self.push(Token::LitInt(1))
                .space()
                .push(Token::Eq)
                .space()
                .push(Token::LitInt(if negated { 1 } else { 0 }));
            return Ok(());
        }
        if let Some(items) = expr.as_tuple() {
            if !self.dialect.supports_row_value_constructor_syntax_in_in_list() {
                return tuple::emulate_tuple_in_list(self, items, list, negated);
            }
        }
        self.visit_operand(expr)?;
        if negated {
            self.space().push(Token::Not);
        }
        self.space().push(Token::In).space().lparen();
        self.render_comma_separated(list)?;
        self.push(Token::RParen);
        Ok(())
    }

    fn render_window_frame(&mut self, frame: &WindowFrame) -> TranslateResult<()> {
        let kind = match frame.kind {
            WindowFrameKind::Rows => Token::Rows,
            WindowFrameKind::Range => Token::Range,
            WindowFrameKind::Groups => {
                if !self.dialect.supports_groups_frame() {
                    return Err(self.unsupported("GROUPS window frame"));
                }
                Token::Groups
            }
        };
        self.push(kind).space();
        match &frame.end {
            Some(end) => {
                self.push(Token::Between).space();
                self.render_frame_bound(&frame.start)?;
                self.space().push(Token::And).space();
                self.render_frame_bound(end)?;
            }
            None => self.render_frame_bound(&frame.start)?,
        }
        Ok(())
    }

    fn render_frame_bound(&mut self, bound: &WindowFrameBound) -> TranslateResult<()> {
        match bound {
            WindowFrameBound::UnboundedPreceding => {
                self.push(Token::Unbounded).space().push(Token::Preceding);
            }
            WindowFrameBound::Preceding(n) => {
                self.push(Token::LitInt(frame_offset(*n)?))
                    .space()
                    .push(Token::Preceding);
            }
            WindowFrameBound::CurrentRow => {
                self.push(Token::CurrentRow);
            }
            WindowFrameBound::Following(n) => {
                self.push(Token::LitInt(frame_offset(*n)?))
                    .space()
                    .push(Token::Following);
            }
            WindowFrameBound::UnboundedFollowing => {
                self.push(Token::Unbounded).space().push(Token::Following);
            }
        }
        Ok(())
    }
}

fn frame_offset(n: u64) -> TranslateResult<i64> {
    i64::try_from(n)
        .map_err(|_| TranslationError::invalid(format!("window frame offset {n} out of range")))
}
