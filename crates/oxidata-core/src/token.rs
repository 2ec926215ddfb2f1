//! The token model shared by every tokenizer in the workspace.

use serde::{Deserialize, Serialize};

/// What a token is, independent of the grammar that consumes it.
///
/// The kinds partition into delimiters, literal categories,
/// operator/function categories, and two synthetic kinds ([`ArgCount`] and
/// [`ListExpr`]) that exist only inside postfix queues, never in tokenizer
/// output.
///
/// [`ArgCount`]: TokenKind::ArgCount
/// [`ListExpr`]: TokenKind::ListExpr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Delimiters.
    OpenParen,
    CloseParen,
    /// Consumed by ignore matchers; never emitted.
    Whitespace,
    /// `/` used for property navigation.
    Nav,
    /// `:` separating a lambda variable from its predicate.
    Colon,
    Comma,
    /// `;` separating nested `$expand` options.
    Semicolon,
    /// `=` introducing a nested `$expand` option value.
    Equals,

    // Operators and functions.
    /// `eq|ne|gt|ge|lt|le|and|or|not|has|in`.
    Logical,
    /// `add|sub|mul|divby|div|mod`, and `/` before a lambda function.
    Op,
    Func,
    /// The `any`/`all` lambda functions.
    Lambda,

    // Literals.
    Null,
    /// The `$it` special identifier.
    It,
    /// The `$root` special identifier.
    Root,
    Float,
    Integer,
    String,
    Date,
    Time,
    DateTime,
    Boolean,
    /// An identifier: a property name or a `@name` parameter alias.
    Literal,
    Duration,
    Guid,

    // Synthetic kinds produced during infix-to-postfix conversion.
    /// Carries the decimal argument count of the following variadic token.
    ArgCount,
    /// Marks a parenthesised list expression; carries the value `list`.
    ListExpr,
}

/// Semantic binding of a token, filled in by a later phase that resolves
/// literal names against a service's metadata model. Parsers always
/// produce [`Semantic::Unbound`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Semantic {
    #[default]
    Unbound,
    /// A schema property, by name.
    Property(String),
    /// A constant value.
    PropertyValue(String),
    /// An entity type, by name.
    Entity(String),
    /// An entity set, by name.
    EntitySet(String),
}

impl Semantic {
    pub fn is_unbound(&self) -> bool {
        matches!(self, Semantic::Unbound)
    }
}

/// A lexed token: its source text (possibly case-folded or substituted by
/// the matcher that produced it) and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    /// Reserved for the semantic binding phase.
    #[serde(default, skip_serializing_if = "Semantic::is_unbound")]
    pub semantic: Semantic,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind) -> Self {
        Token {
            value: value.into(),
            kind,
            semantic: Semantic::Unbound,
        }
    }
}
