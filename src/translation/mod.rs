//! Translation entry point: a [`Statement`] plus options in, SQL out.

use serde::{Deserialize, Serialize};

use crate::sql::dialect::{Dialect, IdentifierQuoting};
use crate::sql::dml::Statement;
use crate::sql::emulation::cycle::CycleStrategy;
use crate::sql::error::TranslateResult;
use crate::sql::translator::{Translation, Translator};

/// How a statement should be translated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    pub dialect: Dialect,
    pub identifier_quoting: IdentifierQuoting,
    pub cycle_strategy: CycleStrategy,
}

impl TranslateOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_identifier_quoting(mut self, quoting: IdentifierQuoting) -> Self {
        self.identifier_quoting = quoting;
        self
    }

    #[must_use]
    pub fn with_cycle_strategy(mut self, strategy: CycleStrategy) -> Self {
        self.cycle_strategy = strategy;
        self
    }
}

/// Translate `statement` for the dialect named in `options`.
///
/// Every call uses a fresh [`Translator`], so translating the same
/// statement twice yields identical output.
pub fn translate(statement: &Statement, options: &TranslateOptions) -> TranslateResult<Translation> {
    Translator::new(options.dialect.dialect())
        .with_identifier_quoting(options.identifier_quoting)
        .with_cycle_strategy(options.cycle_strategy)
        .translate(statement)
}
