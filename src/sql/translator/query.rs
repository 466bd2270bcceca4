//! SELECT statements, query parts, CTEs and the FROM clause.

use std::borrow::Cow;

use tracing::{debug, warn};

use super::Translator;
use crate::sql::emulation::cycle::{self, CycleStrategy};
use crate::sql::emulation::nulls;
use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::dml::Select;
use crate::sql::expr::{Expr, JunctionKind, NullPrecedence, SortDirection, SortSpecification};
use crate::sql::query::{
    CteStatement, JoinType, QueryGroup, QueryPart, QuerySpec, SetOperator, TableGroup,
    TableReference, WithClause,
};
use crate::sql::token::Token;

impl Translator<'_> {
    pub(super) fn visit_select(&mut self, select: &Select) -> TranslateResult<()> {
        self.lock_options = select.lock_options.clone();
        if let Some(with) = &select.with {
            self.render_with_clause(with)?;
            self.space();
        }
        self.visit_query_part(&select.query, true)
    }

    // =========================================================================
    // WITH
    // =========================================================================

    fn render_with_clause(&mut self, with: &WithClause) -> TranslateResult<()> {
        if with.ctes.is_empty() {
            return Err(TranslationError::invalid("WITH clause without CTEs"));
        }
        self.push(Token::With);
        if with.recursive && self.dialect.emit_recursive_keyword() {
            self.space().push(Token::Recursive);
        }
        self.space();
        for (i, cte) in with.ctes.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma).space();
            }
            self.visit_cte(cte)?;
        }
        Ok(())
    }

    fn visit_cte(&mut self, cte: &CteStatement) -> TranslateResult<()> {
        let prepared = self.prepare_cycle_emulation(cte)?;
        let cte: &CteStatement = &prepared;

        self.push(Token::Ident(cte.name.clone()));
        if !cte.columns.is_empty() {
            self.space().lparen();
            self.render_identifier_list(&cte.columns);
            self.push(Token::RParen);
        }
        self.space().push(Token::As).space().lparen();
        self.visit_nested_query_part(&cte.query)?;
        self.push(Token::RParen);

        let dialect = self.dialect;
        if cte.search.is_some() && !dialect.supports_search_clause() {
            debug!(cte = %cte.name, "dropping SEARCH clause, ordering hint only");
        }
        dialect.render_search_clause(self, cte)?;
        dialect.render_cycle_clause(self, cte)
    }

    /// Rewrite a CTE whose CYCLE clause the dialect cannot render natively.
    fn prepare_cycle_emulation<'c>(
        &self,
        cte: &'c CteStatement,
    ) -> TranslateResult<Cow<'c, CteStatement>> {
        if cte.cycle.is_none() || self.dialect.supports_cycle_clause() {
            return Ok(Cow::Borrowed(cte));
        }
        match self.cycle_strategy {
            CycleStrategy::Emulate => {
                debug!(cte = %cte.name, "emulating CYCLE clause");
                Ok(Cow::Owned(cycle::emulate_cycle_clause(self.dialect, cte)?))
            }
            CycleStrategy::Drop => {
                warn!(
                    cte = %cte.name,
                    dialect = self.dialect.name(),
                    "dropping CYCLE clause, recursion is not cycle-safe"
                );
                Ok(Cow::Borrowed(cte))
            }
        }
    }

    // =========================================================================
    // Query parts
    // =========================================================================

    /// Render a query part that is not the statement's root.
    pub fn visit_nested_query_part(&mut self, part: &QueryPart) -> TranslateResult<()> {
        self.visit_query_part(part, false)
    }

    fn visit_query_part(&mut self, part: &QueryPart, root: bool) -> TranslateResult<()> {
        self.in_query_part(root, |tr| match part {
            QueryPart::Spec(spec) => tr.visit_query_spec(part, spec),
            QueryPart::Group(group) => tr.visit_query_group(part, group),
        })
    }

    fn visit_query_group(&mut self, part: &QueryPart, group: &QueryGroup) -> TranslateResult<()> {
        if group.parts.is_empty() {
            return Err(TranslationError::invalid("query group without parts"));
        }
        if group.set_operator.is_intersect_or_except() && !self.dialect.supports_intersect() {
            return Err(self.unsupported(format!("{:?} set operation", group.set_operator)));
        }

        for (i, member) in group.parts.iter().enumerate() {
            if i > 0 {
                self.space();
                self.render_set_operator(group.set_operator);
                self.space();
            }
            let wrap = matches!(member, QueryPart::Group(_))
                || !member.order_by().is_empty()
                || member.has_row_limit();
            if wrap {
                self.push(Token::LParen);
            }
            self.visit_nested_query_part(member)?;
            if wrap {
                self.push(Token::RParen);
            }
        }

        self.render_order_by(&group.order_by)?;
        let dialect = self.dialect;
        dialect.visit_offset_fetch_clause(self, part)
    }

    fn render_set_operator(&mut self, op: SetOperator) {
        let keyword = match op {
            SetOperator::Union | SetOperator::UnionAll => Token::Union,
            SetOperator::Intersect | SetOperator::IntersectAll => Token::Intersect,
            SetOperator::Except | SetOperator::ExceptAll => Token::Except,
        };
        self.push(keyword);
        if op.is_all() {
            self.space().push(Token::All);
        }
    }

    fn visit_query_spec(&mut self, part: &QueryPart, spec: &QuerySpec) -> TranslateResult<()> {
        if spec.select.selections.is_empty() {
            return Err(TranslationError::invalid("query spec has an empty select list"));
        }
        let dialect = self.dialect;

        self.push(Token::Select);
        if spec.select.distinct {
            self.space().push(Token::Distinct);
        }
        dialect.render_row_limit_prefix(self, part)?;
        self.space();
        for (i, selection) in spec.select.selections.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma).space();
            }
            self.visit_expr(&selection.expression)?;
            if let Some(alias) = &selection.alias {
                self.space()
                    .push(Token::As)
                    .space()
                    .push(Token::Ident(alias.clone()));
            }
        }

        if !spec.from.is_empty() {
            self.space().push(Token::From).space();
            self.render_from_clause(&spec.from)?;
        }
        if let Some(predicate) = &spec.where_clause {
            self.space().push(Token::Where).space();
            self.visit_expr(predicate)?;
        }
        if !spec.group_by.is_empty() {
            self.space().push(Token::GroupBy).space();
            self.render_group_by(&spec.group_by)?;
        }
        if let Some(predicate) = &spec.having {
            self.space().push(Token::Having).space();
            self.visit_expr(predicate)?;
        }
        self.render_order_by(&spec.order_by)?;
        dialect.visit_offset_fetch_clause(self, part)?;

        if let Some(clause) = self.take_for_update() {
            if !self.is_root_query_part() {
                return Err(self.unsupported("row lock inside a subquery"));
            }
            dialect.render_for_update_clause(self, spec, &clause)?;
        }
        Ok(())
    }

    // =========================================================================
    // FROM
    // =========================================================================

    /// Render comma-separated table groups, resolving lock modes per reference.
    pub fn render_from_clause(&mut self, from: &[TableGroup]) -> TranslateResult<()> {
        for (i, group) in from.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma).space();
            }
            self.render_table_group(group)?;
        }
        Ok(())
    }

    fn render_table_group(&mut self, group: &TableGroup) -> TranslateResult<()> {
        self.render_locked_table_reference(&group.primary)?;
        for join in &group.joins {
            self.space();
            match join.join_type {
                JoinType::Inner => self.push(Token::Inner),
                JoinType::Left => self.push(Token::Left).space().push(Token::Outer),
                JoinType::Right => self.push(Token::Right).space().push(Token::Outer),
                JoinType::Full => self.push(Token::Full).space().push(Token::Outer),
                JoinType::Cross => self.push(Token::Cross),
            };
            self.space().push(Token::Join).space();
            self.render_locked_table_reference(&join.table)?;
            match (&join.predicate, join.join_type) {
                (Some(predicate), _) => {
                    self.space().push(Token::On).space();
                    self.visit_expr(predicate)?;
                }
                (None, JoinType::Cross) => {}
                (None, _) => {
                    return Err(TranslationError::invalid(format!(
                        "{:?} join on {} without a predicate",
                        join.join_type,
                        join.table.identification_variable()
                    )))
                }
            }
        }
        Ok(())
    }

    fn render_locked_table_reference(&mut self, table: &TableReference) -> TranslateResult<()> {
        let alias = table.identification_variable();
        let lock_mode = self.effective_lock_mode(alias);
        let dialect = self.dialect;
        let handled = dialect.render_table_reference(self, table, lock_mode)?;
        if !handled && lock_mode.requires_row_lock() {
            self.register_for_update(lock_mode, alias);
        }
        Ok(())
    }

    /// Render a possibly schema-qualified name, quoting each segment.
    pub fn render_qualified_name(&mut self, name: &str) {
        for (i, segment) in name.split('.').enumerate() {
            if i > 0 {
                self.push(Token::Dot);
            }
            self.push(Token::Ident(segment.to_string()));
        }
    }

    pub fn render_identifier_list(&mut self, names: &[String]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma).space();
            }
            self.push(Token::Ident(name.clone()));
        }
    }

    // =========================================================================
    // GROUP BY / ORDER BY
    // =========================================================================

    fn render_group_by(&mut self, items: &[Expr]) -> TranslateResult<()> {
        let outer = self.group_by_len.replace(items.len());
        let result = self.render_partition_items(items);
        self.group_by_len = outer;
        result
    }

    /// Render GROUP BY or PARTITION BY items through the dialect hook.
    pub fn render_partition_items(&mut self, items: &[Expr]) -> TranslateResult<()> {
        let dialect = self.dialect;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma).space();
            }
            dialect.render_partition_item(self, item)?;
        }
        Ok(())
    }

    /// ` ORDER BY ...` (nothing when `items` is empty).
    pub fn render_order_by(&mut self, items: &[SortSpecification]) -> TranslateResult<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.space().push(Token::OrderBy).space();
        self.render_sort_specifications(items)
    }

    pub fn render_sort_specifications(&mut self, items: &[SortSpecification]) -> TranslateResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma).space();
            }
            self.render_sort_specification(item)?;
        }
        Ok(())
    }

    fn render_sort_specification(&mut self, item: &SortSpecification) -> TranslateResult<()> {
        let emulate_nulls = item.nulls.is_some() && !self.dialect.supports_nulls_ordering();
        if emulate_nulls {
            nulls::render_null_precedence_item(self, item)?;
            self.push(Token::Comma).space();
        }

        self.visit_expr(&item.expr)?;
        match item.direction {
            Some(SortDirection::Asc) => {
                self.space().push(Token::Asc);
            }
            Some(SortDirection::Desc) => {
                self.space().push(Token::Desc);
            }
            None => {}
        }
        if !emulate_nulls {
            match item.nulls {
                Some(NullPrecedence::First) => {
                    self.space().push(Token::NullsFirst);
                }
                Some(NullPrecedence::Last) => {
                    self.space().push(Token::NullsLast);
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Render `predicate` so it can be ANDed with another condition.
    pub fn render_conjunct(&mut self, predicate: &Expr) -> TranslateResult<()> {
        let wrap = matches!(
            predicate,
            Expr::Junction {
                kind: JunctionKind::Or,
                ..
            }
        );
        if wrap {
            self.push(Token::LParen);
        }
        self.visit_expr(predicate)?;
        if wrap {
            self.push(Token::RParen);
        }
        Ok(())
    }
}
