//! AST-to-SQL translator.
//!
//! A [`Translator`] walks one [`Statement`] and appends tokens to a single
//! buffer. Dialect differences are injected through the [`DialectTranslator`]
//! hooks; the traversal itself is shared by every dialect.
//!
//! One translator instance is built per statement and consumed by
//! [`Translator::translate`]. It is not shared between threads.

mod dml;
mod expr;
mod hooks;
mod query;
pub mod standard;

pub use hooks::DialectTranslator;

use serde::Serialize;
use tracing::debug;

use super::dialect::IdentifierQuoting;
use super::emulation::cycle::CycleStrategy;
use super::emulation::row_limit::RowLimit;
use super::error::{TranslateResult, TranslationError};
use super::dml::Statement;
use super::expr::Expr;
use super::lock::{ForUpdateClause, LockMode, LockOptions};
use super::token::{Token, TokenStream};

/// Output of a successful translation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    /// The rendered SQL text.
    pub sql: String,
    /// Name of the dialect the SQL was rendered for.
    pub dialect: &'static str,
    /// Root row limit the caller must apply when binding the statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<RowLimit>,
    /// Labels of the `?` markers, in the order they appear in `sql`.
    pub parameters: Vec<String>,
}

/// Per query part translation state.
#[derive(Debug)]
struct QueryPartFrame {
    root: bool,
    for_update: Option<ForUpdateClause>,
}

/// Walks a statement and renders it for one dialect.
pub struct Translator<'d> {
    dialect: &'d dyn DialectTranslator,
    quoting: IdentifierQuoting,
    cycle_strategy: CycleStrategy,
    buffer: TokenStream,
    query_parts: Vec<QueryPartFrame>,
    lock_options: LockOptions,
    row_limit: Option<RowLimit>,
    parameters: Vec<String>,
    /// Item count of the GROUP BY clause being rendered.
    group_by_len: Option<usize>,
}

impl<'d> Translator<'d> {
    pub fn new(dialect: &'d dyn DialectTranslator) -> Self {
        Self {
            dialect,
            quoting: IdentifierQuoting::default(),
            cycle_strategy: CycleStrategy::default(),
            buffer: TokenStream::new(),
            query_parts: Vec::new(),
            lock_options: LockOptions::default(),
            row_limit: None,
            parameters: Vec::new(),
            group_by_len: None,
        }
    }

    #[must_use]
    pub fn with_identifier_quoting(mut self, quoting: IdentifierQuoting) -> Self {
        self.quoting = quoting;
        self
    }

    #[must_use]
    pub fn with_cycle_strategy(mut self, strategy: CycleStrategy) -> Self {
        self.cycle_strategy = strategy;
        self
    }

    /// Translate the statement, consuming the translator.
    pub fn translate(mut self, statement: &Statement) -> TranslateResult<Translation> {
        debug!(dialect = self.dialect.name(), "translating statement");
        match statement {
            Statement::Select(select) => self.visit_select(select)?,
            Statement::Insert(insert) => self.visit_insert(insert)?,
            Statement::Update(update) => self.visit_update(update)?,
            Statement::Delete(delete) => self.visit_delete(delete)?,
        }

        let sql = self.buffer.serialize(self.dialect, self.quoting);
        debug!(sql = %sql, parameters = self.parameters.len(), "translation finished");
        Ok(Translation {
            sql,
            dialect: self.dialect.name(),
            row_limit: self.row_limit,
            parameters: self.parameters,
        })
    }

    /// Serialize whatever has been rendered so far.
    #[cfg(test)]
    pub(crate) fn finish_fragment(&self) -> String {
        self.buffer.serialize(self.dialect, self.quoting)
    }

    // =========================================================================
    // Accessors used by dialect hooks and emulations
    // =========================================================================

    pub fn dialect(&self) -> &'d dyn DialectTranslator {
        self.dialect
    }

    pub fn cycle_strategy(&self) -> CycleStrategy {
        self.cycle_strategy
    }

    /// Number of GROUP BY items while a GROUP BY clause is rendered, `None`
    /// anywhere else (PARTITION BY included).
    pub fn group_by_len(&self) -> Option<usize> {
        self.group_by_len
    }

    pub fn lock_options(&self) -> &LockOptions {
        &self.lock_options
    }

    /// Append a token to the output buffer.
    pub fn push(&mut self, token: Token) -> &mut TokenStream {
        self.buffer.push(token)
    }

    /// Append several tokens to the output buffer.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut TokenStream {
        self.buffer.extend(tokens)
    }

    pub fn space(&mut self) -> &mut TokenStream {
        self.buffer.space()
    }

    /// Whether the query part being rendered is the statement's root query.
    pub fn is_root_query_part(&self) -> bool {
        self.query_parts.last().is_some_and(|frame| frame.root)
    }

    /// Record the root row limit the caller has to apply.
    pub fn set_row_limit(&mut self, row_limit: RowLimit) {
        debug!(?row_limit, "row limit handed to caller");
        self.row_limit = Some(row_limit);
    }

    /// Record a rendered `?` marker.
    pub(crate) fn register_parameter(&mut self, label: &str) {
        self.parameters.push(label.to_string());
    }

    /// Render `f` as a nested query part.
    pub fn in_query_part<T>(
        &mut self,
        root: bool,
        f: impl FnOnce(&mut Self) -> TranslateResult<T>,
    ) -> TranslateResult<T> {
        self.query_parts.push(QueryPartFrame {
            root,
            for_update: None,
        });
        let result = f(self);
        self.query_parts.pop();
        result
    }

    /// Render expressions separated by `, `.
    pub fn render_comma_separated(&mut self, exprs: &[Expr]) -> TranslateResult<()> {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.buffer.comma().space();
            }
            self.visit_expr(expr)?;
        }
        Ok(())
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Lock mode for a table reference identified by `alias`.
    ///
    /// Alias-specific modes apply in every query part; the statement-wide
    /// mode only applies to the root query part.
    fn effective_lock_mode(&self, alias: &str) -> LockMode {
        match self.lock_options.alias_specific.get(alias) {
            Some(mode) => *mode,
            None if self.is_root_query_part() => self.lock_options.lock_mode,
            None => LockMode::None,
        }
    }

    /// Remember a lock that the table reference did not express as a hint.
    fn register_for_update(&mut self, lock_mode: LockMode, alias: &str) {
        if let Some(frame) = self.query_parts.last_mut() {
            frame
                .for_update
                .get_or_insert_with(|| ForUpdateClause::new(lock_mode))
                .merge(lock_mode, alias);
        }
    }

    fn take_for_update(&mut self) -> Option<ForUpdateClause> {
        self.query_parts
            .last_mut()
            .and_then(|frame| frame.for_update.take())
    }

    fn unsupported(&self, construct: impl Into<String>) -> TranslationError {
        TranslationError::unsupported(self.dialect.name(), construct)
    }
}
