//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic representations that serialize
//! to dialect-specific strings. The translator appends tokens to a
//! [`TokenStream`] and serializes the whole stream once at the end.

use super::dialect::{IdentifierQuoting, SqlDialect};

/// SQL Token - every possible element in a rendered statement.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    Distinct,
    From,
    Where,
    And,
    Or,
    Not,
    As,
    On,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    GroupBy,
    Having,
    OrderBy,
    Asc,
    Desc,
    NullsFirst,
    NullsLast,
    Offset,
    Fetch,
    First,
    Next,
    Rows,
    Only,
    WithTies,
    Percent,
    Top,
    Case,
    When,
    Then,
    Else,
    End,
    In,
    Between,
    Like,
    Escape,
    Is,
    Null,
    All,
    Any,
    Exists,
    Union,
    Intersect,
    Except,
    With,
    Recursive,
    Cast,
    DistinctFrom,

    // === Window / grouping keywords ===
    Over,
    PartitionBy,
    Range,
    Groups,
    Unbounded,
    Preceding,
    Following,
    CurrentRow,
    Rollup,
    Cube,

    // === CTE search / cycle keywords ===
    Search,
    DepthFirstBy,
    BreadthFirstBy,
    Set,
    Cycle,
    To,
    Default,
    Using,

    // === Locking keywords ===
    ForUpdate,
    Of,
    NoWait,
    SkipLocked,
    Wait,

    // === DML keywords ===
    Insert,
    Into,
    Values,
    Update,
    Delete,

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LParen,
    RParen,
    Placeholder,

    // === Operators ===
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Concat,

    // === Whitespace ===
    Space,

    // === Dynamic Content ===
    /// Simple identifier (table, column, alias)
    Ident(String),
    /// Integer literal
    LitInt(i64),
    /// Float literal (finiteness is checked before the token is produced)
    LitFloat(f64),
    /// String literal
    LitString(String),
    /// Boolean literal
    LitBool(bool),
    /// NULL literal
    LitNull,
    /// Function name, rendered upper-cased
    FunctionName(String),
    /// Dialect-specific table hint such as `holdlock`, emitted verbatim
    TableHint(String),

    // === Escape Hatch ===
    /// Raw SQL passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Raw SQL is not sanitized.
    /// Only use with trusted, static SQL fragments such as type names.
    Raw(String),
}

impl Token {
    /// Serialize this token to a string for the given dialect.
    pub fn serialize<D: SqlDialect + ?Sized>(&self, dialect: &D, quoting: IdentifierQuoting) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::Not => "NOT".into(),
            Token::As => "AS".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Inner => "INNER".into(),
            Token::Left => "LEFT".into(),
            Token::Right => "RIGHT".into(),
            Token::Full => "FULL".into(),
            Token::Outer => "OUTER".into(),
            Token::Cross => "CROSS".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::Having => "HAVING".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Desc => "DESC".into(),
            Token::NullsFirst => "NULLS FIRST".into(),
            Token::NullsLast => "NULLS LAST".into(),
            Token::Offset => "OFFSET".into(),
            Token::Fetch => "FETCH".into(),
            Token::First => "FIRST".into(),
            Token::Next => "NEXT".into(),
            Token::Rows => "ROWS".into(),
            Token::Only => "ONLY".into(),
            Token::WithTies => "WITH TIES".into(),
            Token::Percent => "PERCENT".into(),
            Token::Top => "TOP".into(),
            Token::Case => "CASE".into(),
            Token::When => "WHEN".into(),
            Token::Then => "THEN".into(),
            Token::Else => "ELSE".into(),
            Token::End => "END".into(),
            Token::In => "IN".into(),
            Token::Between => "BETWEEN".into(),
            Token::Like => "LIKE".into(),
            Token::Escape => "ESCAPE".into(),
            Token::Is => "IS".into(),
            Token::Null => "NULL".into(),
            Token::All => "ALL".into(),
            Token::Any => "ANY".into(),
            Token::Exists => "EXISTS".into(),
            Token::Union => "UNION".into(),
            Token::Intersect => "INTERSECT".into(),
            Token::Except => "EXCEPT".into(),
            Token::With => "WITH".into(),
            Token::Recursive => "RECURSIVE".into(),
            Token::Cast => "CAST".into(),
            Token::DistinctFrom => "DISTINCT FROM".into(),

            // Window / grouping keywords
            Token::Over => "OVER".into(),
            Token::PartitionBy => "PARTITION BY".into(),
            Token::Range => "RANGE".into(),
            Token::Groups => "GROUPS".into(),
            Token::Unbounded => "UNBOUNDED".into(),
            Token::Preceding => "PRECEDING".into(),
            Token::Following => "FOLLOWING".into(),
            Token::CurrentRow => "CURRENT ROW".into(),
            Token::Rollup => "ROLLUP".into(),
            Token::Cube => "CUBE".into(),

            // CTE keywords
            Token::Search => "SEARCH".into(),
            Token::DepthFirstBy => "DEPTH FIRST BY".into(),
            Token::BreadthFirstBy => "BREADTH FIRST BY".into(),
            Token::Set => "SET".into(),
            Token::Cycle => "CYCLE".into(),
            Token::To => "TO".into(),
            Token::Default => "DEFAULT".into(),
            Token::Using => "USING".into(),

            // Locking keywords
            Token::ForUpdate => "FOR UPDATE".into(),
            Token::Of => "OF".into(),
            Token::NoWait => "NOWAIT".into(),
            Token::SkipLocked => "SKIP LOCKED".into(),
            Token::Wait => "WAIT".into(),

            // DML keywords
            Token::Insert => "INSERT".into(),
            Token::Into => "INTO".into(),
            Token::Values => "VALUES".into(),
            Token::Update => "UPDATE".into(),
            Token::Delete => "DELETE".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Placeholder => "?".into(),

            // Operators
            Token::Eq => "=".into(),
            Token::Ne => "<>".into(),
            Token::Lt => "<".into(),
            Token::Gt => ">".into(),
            Token::Lte => "<=".into(),
            Token::Gte => ">=".into(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Mul => "*".into(),
            Token::Div => "/".into(),
            Token::Mod => "%".into(),
            Token::Concat => dialect.concat_operator().into(),

            // Whitespace
            Token::Space => " ".into(),

            // Dynamic - dialect-specific formatting
            Token::Ident(name) => dialect.format_identifier(name, quoting),
            Token::LitInt(n) => n.to_string(),
            Token::LitFloat(f) => {
                let mut buffer = ryu::Buffer::new();
                buffer.format(*f).to_string()
            }
            Token::LitString(s) => dialect.quote_string(s),
            Token::LitBool(b) => dialect.format_bool(*b).into(),
            Token::LitNull => "NULL".into(),
            Token::FunctionName(name) => name.to_uppercase(),
            Token::TableHint(hint) => hint.clone(),

            // Escape hatch
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
///
/// The translator only ever appends; tokens are never removed or reordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Extend with multiple tokens.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Number of tokens pushed so far.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens pushed since `mark` (a previous [`TokenStream::len`]).
    pub fn since(&self, mark: usize) -> &[Token] {
        &self.tokens[mark.min(self.tokens.len())..]
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize<D: SqlDialect + ?Sized>(&self, dialect: &D, quoting: IdentifierQuoting) -> String {
        self.tokens
            .iter()
            .map(|t| t.serialize(dialect, quoting))
            .collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::dialect::{Ansi, Sybase, TSql};

    const QUOTING: IdentifierQuoting = IdentifierQuoting::WhenNeeded;

    #[test]
    fn test_keyword_serialize() {
        assert_eq!(Token::Select.serialize(&Ansi, QUOTING), "SELECT");
        assert_eq!(Token::GroupBy.serialize(&Sybase, QUOTING), "GROUP BY");
        assert_eq!(Token::DistinctFrom.serialize(&Ansi, QUOTING), "DISTINCT FROM");
    }

    #[test]
    fn test_ident_serialize_when_needed() {
        let tok = Token::Ident("users".into());
        assert_eq!(tok.serialize(&Ansi, QUOTING), "users");
        assert_eq!(tok.serialize(&Sybase, QUOTING), "users");

        let spaced = Token::Ident("order items".into());
        assert_eq!(spaced.serialize(&Ansi, QUOTING), "\"order items\"");
        assert_eq!(spaced.serialize(&Sybase, QUOTING), "[order items]");
    }

    #[test]
    fn test_ident_serialize_reserved_word() {
        let tok = Token::Ident("order".into());
        assert_eq!(tok.serialize(&Ansi, QUOTING), "\"order\"");
        assert_eq!(tok.serialize(&TSql, QUOTING), "[order]");
    }

    #[test]
    fn test_ident_serialize_always() {
        let tok = Token::Ident("users".into());
        assert_eq!(tok.serialize(&Ansi, IdentifierQuoting::Always), "\"users\"");
        assert_eq!(tok.serialize(&TSql, IdentifierQuoting::Always), "[users]");
    }

    #[test]
    fn test_token_stream() {
        let mut ts = TokenStream::new();
        ts.push(Token::Select)
            .space()
            .push(Token::Ident("name".into()))
            .space()
            .push(Token::From)
            .space()
            .push(Token::Ident("users".into()))
            .space()
            .push(Token::TableHint("holdlock".into()));

        assert_eq!(ts.serialize(&Sybase, QUOTING), "SELECT name FROM users holdlock");
    }

    #[test]
    fn test_concat_dialect() {
        assert_eq!(Token::Concat.serialize(&Ansi, QUOTING), "||");
        assert_eq!(Token::Concat.serialize(&Sybase, QUOTING), "+");
    }

    #[test]
    fn test_bool_literal_dialect() {
        assert_eq!(Token::LitBool(true).serialize(&Ansi, QUOTING), "TRUE");
        assert_eq!(Token::LitBool(true).serialize(&Sybase, QUOTING), "1");
        assert_eq!(Token::LitBool(false).serialize(&TSql, QUOTING), "0");
    }

    #[test]
    fn test_float_serialize() {
        assert_eq!(Token::LitFloat(3.25).serialize(&Ansi, QUOTING), "3.25");
        assert_eq!(Token::LitFloat(1.0).serialize(&Ansi, QUOTING), "1.0");
        assert_eq!(Token::LitFloat(-42.5).serialize(&Ansi, QUOTING), "-42.5");
    }

    #[test]
    fn test_since_mark() {
        let mut ts = TokenStream::new();
        ts.push(Token::Select);
        let mark = ts.len();
        ts.space().push(Token::Star);
        assert_eq!(ts.since(mark), &[Token::Space, Token::Star]);
    }
}
