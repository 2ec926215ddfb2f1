//! Regex-driven tokenizer engine.
//!
//! A tokenizer is built by registering, in declaration order, a list of
//! emitting matchers and a list of ignoring matchers. At each step the
//! emitting matchers are tried in registration order and the first match
//! wins; if none matches, the ignoring matchers are tried, which consume
//! input without emitting a token. Unmatched input is a bad request.
//!
//! Two named capture groups adjust how much input a match consumes:
//!
//! - `token`: the token value is the group's text and only the group's
//!   span is consumed. This supports boundary rules like "`eq` must be
//!   followed by whitespace or `(`" without swallowing the boundary.
//! - `subtoken`: the token value is the group's text but the full match
//!   is consumed, extracting an inner payload such as the ISO-8601 body
//!   of `duration'…'`.
//!
//! Patterns containing `(?i)` are case-insensitive; their token values
//! are lowercased before any substitution, matching OData 4.01's rule
//! that operator and function names are case-insensitive.

use regex::Regex;

use oxidata_core::{Error, Result, Token, TokenKind};

/// A single registered pattern.
#[derive(Debug)]
struct TokenMatcher {
    re: Regex,
    kind: TokenKind,
    case_insensitive: bool,
    substitution: Option<fn(&str) -> String>,
}

impl TokenMatcher {
    fn new(pattern: &str, kind: TokenKind, substitution: Option<fn(&str) -> String>) -> Self {
        let re = Regex::new(pattern).expect("token pattern must be a valid regular expression");
        TokenMatcher {
            re,
            kind,
            case_insensitive: pattern.contains("(?i)"),
            substitution,
        }
    }

    /// Matches against the start of `input`, returning the token value
    /// and the number of bytes consumed. Zero-length matches count as no
    /// match.
    fn match_prefix(&self, input: &str) -> Option<(String, usize)> {
        let caps = self.re.captures(input)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 {
            return None;
        }
        let (raw, consumed) = if let Some(group) = caps.name("token") {
            (group.as_str(), group.end())
        } else if let Some(group) = caps.name("subtoken") {
            (group.as_str(), whole.end())
        } else {
            (whole.as_str(), whole.end())
        };
        if consumed == 0 {
            return None;
        }
        let value = if self.case_insensitive {
            raw.to_lowercase()
        } else {
            raw.to_string()
        };
        let value = match self.substitution {
            Some(substitute) => substitute(&value),
            None => value,
        };
        Some((value, consumed))
    }
}

/// An ordered collection of token patterns.
///
/// Construct once, reuse across parses: tokenizers are immutable after
/// construction and safe to share between threads.
#[derive(Debug, Default)]
pub struct Tokenizer {
    matchers: Vec<TokenMatcher>,
    ignorers: Vec<TokenMatcher>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer::default()
    }

    /// Registers an emitting matcher. Patterns must be anchored at the
    /// input start (`^`).
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression.
    pub fn add(&mut self, pattern: &str, kind: TokenKind) {
        self.matchers.push(TokenMatcher::new(pattern, kind, None));
    }

    /// Registers an emitting matcher whose value is rewritten by
    /// `substitution` after matching (and after case folding).
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression.
    pub fn add_with_substitution(
        &mut self,
        pattern: &str,
        kind: TokenKind,
        substitution: fn(&str) -> String,
    ) {
        self.matchers
            .push(TokenMatcher::new(pattern, kind, Some(substitution)));
    }

    /// Registers an ignoring matcher: matched input is consumed without
    /// emitting a token.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression.
    pub fn ignore(&mut self, pattern: &str, kind: TokenKind) {
        self.ignorers.push(TokenMatcher::new(pattern, kind, None));
    }

    /// Tokenizes `input` into an ordered token sequence.
    ///
    /// Fails with a bad request when a non-empty remainder matches no
    /// registered pattern, or when the input yields no tokens at all.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut rest = input;
        'input: while !rest.is_empty() {
            for matcher in &self.matchers {
                if let Some((value, consumed)) = matcher.match_prefix(rest) {
                    tokens.push(Token::new(value, matcher.kind));
                    rest = &rest[consumed..];
                    continue 'input;
                }
            }
            for matcher in &self.ignorers {
                if let Some((_, consumed)) = matcher.match_prefix(rest) {
                    rest = &rest[consumed..];
                    continue 'input;
                }
            }
            return Err(Error::bad_request(format!("no matching token for {rest}")));
        }
        if tokens.is_empty() {
            return Err(Error::bad_request("empty query parameter"));
        }
        Ok(tokens)
    }
}
