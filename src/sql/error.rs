//! Translation errors.
//!
//! Every failure aborts the whole translation: no partial SQL is returned.

/// Errors raised while translating a statement for a dialect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    /// The statement uses a construct this dialect can neither express nor emulate.
    #[error("Unsupported construct for {dialect}: {construct}")]
    UnsupportedConstruct {
        dialect: &'static str,
        construct: String,
    },

    /// The construct could be emulated for this dialect, but the emulation is not built yet.
    #[error("Not yet implemented for {dialect}: {feature}")]
    NotYetImplemented {
        dialect: &'static str,
        feature: String,
    },

    /// The AST itself is malformed (tuple arity mismatch, empty select list, ...).
    #[error("Invalid AST: {0}")]
    InvalidAst(String),
}

impl TranslationError {
    pub fn unsupported(dialect: &'static str, construct: impl Into<String>) -> Self {
        TranslationError::UnsupportedConstruct {
            dialect,
            construct: construct.into(),
        }
    }

    pub fn not_yet_implemented(dialect: &'static str, feature: impl Into<String>) -> Self {
        TranslationError::NotYetImplemented {
            dialect,
            feature: feature.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        TranslationError::InvalidAst(message.into())
    }
}

pub type TranslateResult<T> = Result<T, TranslationError>;
