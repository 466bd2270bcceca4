//! INSERT, UPDATE and DELETE rendering.

use super::Translator;
use crate::sql::dml::{Delete, Insert, InsertSource, Update};
use crate::sql::emulation::values;
use crate::sql::error::{TranslateResult, TranslationError};
use crate::sql::token::Token;

impl Translator<'_> {
    pub(super) fn visit_insert(&mut self, insert: &Insert) -> TranslateResult<()> {
        self.push(Token::Insert).space().push(Token::Into).space();
        self.render_qualified_name(&insert.table);
        if !insert.columns.is_empty() {
            self.space().lparen();
            self.render_identifier_list(&insert.columns);
            self.push(Token::RParen);
        }
        self.space();

        match &insert.source {
            InsertSource::Values(rows) => {
                if rows.is_empty() {
                    return Err(TranslationError::invalid("INSERT without rows"));
                }
                let width = rows[0].len();
                if width == 0 || rows.iter().any(|row| row.len() != width) {
                    return Err(TranslationError::invalid(
                        "INSERT rows must be non-empty and of equal width",
                    ));
                }
                if !insert.columns.is_empty() && insert.columns.len() != width {
                    return Err(TranslationError::invalid(format!(
                        "INSERT names {} columns but rows have {} values",
                        insert.columns.len(),
                        width
                    )));
                }
                if rows.len() > 1 && !self.dialect.supports_multi_row_values() {
                    return values::render_values_as_union_all(self, rows);
                }
                self.push(Token::Values).space();
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        self.push(Token::Comma).space();
                    }
                    self.push(Token::LParen);
                    self.render_comma_separated(row)?;
                    self.push(Token::RParen);
                }
                Ok(())
            }
            InsertSource::Query(query) => self.visit_nested_query_part(query),
        }
    }

    pub(super) fn visit_update(&mut self, update: &Update) -> TranslateResult<()> {
        if update.assignments.is_empty() {
            return Err(TranslationError::invalid("UPDATE without assignments"));
        }
        self.push(Token::Update).space();
        self.render_qualified_name(&update.table);
        self.space().push(Token::Set).space();
        for (i, assignment) in update.assignments.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma).space();
            }
            self.push(Token::Ident(assignment.column.clone()))
                .space()
                .push(Token::Eq)
                .space();
            self.visit_expr(&assignment.value)?;
        }
        if let Some(predicate) = &update.where_clause {
            self.space().push(Token::Where).space();
            self.visit_expr(predicate)?;
        }
        Ok(())
    }

    pub(super) fn visit_delete(&mut self, delete: &Delete) -> TranslateResult<()> {
        self.push(Token::Delete).space().push(Token::From).space();
        self.render_qualified_name(&delete.table);
        if let Some(predicate) = &delete.where_clause {
            self.space().push(Token::Where).space();
            self.visit_expr(predicate)?;
        }
        Ok(())
    }
}
