//! Rewrites for constructs a dialect cannot express natively.
//!
//! Each module renders an equivalent formulation through the
//! [`Translator`](crate::sql::translator::Translator) buffer, or produces a
//! rewritten AST fragment that the translator then renders as usual.

pub mod cycle;
pub mod intersect;
pub mod nulls;
pub mod row_limit;
pub mod tuple;
pub mod values;
