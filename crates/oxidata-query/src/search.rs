//! The `$search` query option.
//!
//! Reuses the expression engine with its own, much smaller grammar:
//! quoted phrases and bare terms as literals, and the case-sensitive
//! operators `NOT`, `AND`, `OR`.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use oxidata_core::{ParseNode, Result, TokenKind};

use crate::expr::{Assoc, ExprParser};
use crate::tokenizer::Tokenizer;

static SEARCH_TOKENIZER: LazyLock<Tokenizer> = LazyLock::new(search_tokenizer);
static SEARCH_PARSER: LazyLock<ExprParser> = LazyLock::new(search_parser);

/// A parsed `$search` expression: the term tree plus the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub tree: ParseNode,
    pub raw_value: String,
}

/// Parses a `$search` expression. Unlike `$filter` there is no
/// boolean-root restriction: a single term is a valid search.
pub fn parse_search(search: &str) -> Result<SearchQuery> {
    let tokens = SEARCH_TOKENIZER.tokenize(search)?;
    let postfix = SEARCH_PARSER.infix_to_postfix(tokens)?;
    let tree = SEARCH_PARSER.postfix_to_tree(postfix)?;
    Ok(SearchQuery {
        tree,
        raw_value: search.to_string(),
    })
}

pub fn search_tokenizer() -> Tokenizer {
    let mut t = Tokenizer::new();
    t.add(r"^\(", TokenKind::OpenParen);
    t.add(r"^\)", TokenKind::CloseParen);
    // searchExpr operators are case-sensitive uppercase.
    t.add(r"^(?P<token>(AND|OR|NOT))[\s(]", TokenKind::Op);
    // A quoted phrase, then a bare term.
    t.add(r#"^"[^"]*""#, TokenKind::Literal);
    t.add(r"^[^\s()]+", TokenKind::Literal);
    t.ignore(r"^ ", TokenKind::Whitespace);
    t
}

pub fn search_parser() -> ExprParser {
    let mut parser = ExprParser::new();
    parser.define_operator("NOT", 1, Assoc::Left, 3);
    parser.define_operator("AND", 2, Assoc::Left, 2);
    parser.define_operator("OR", 2, Assoc::Left, 1);
    parser
}
