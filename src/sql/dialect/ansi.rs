//! ANSI SQL dialect - base reference implementation.
//!
//! Every capability flag keeps its default and every translator hook
//! renders standard SQL. Other dialects are described by how they
//! differ from this one.

use super::helpers;
use super::{DialectTranslator, SqlDialect};

/// ANSI SQL dialect (reference implementation).
#[derive(Debug, Clone, Copy)]
pub struct Ansi;

impl SqlDialect for Ansi {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_keyword(b)
    }
}

impl DialectTranslator for Ansi {}
