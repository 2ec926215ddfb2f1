//! The `$expand` query option.
//!
//! An expand clause is a comma-separated list of items; each item is a
//! `/`-separated navigation path optionally followed by a parenthesised,
//! `;`-separated option list. Option values are parsed with the
//! corresponding sub-parsers, and `$expand` options nest recursively.
//!
//! The tokenizer's literal class includes spaces, so an option value such
//! as `DiscontinuedDate eq null` arrives as a single token and the queue's
//! `Display` reconstitutes it for the nested parser.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use oxidata_core::{Error, Result, Token, TokenKind, TokenQueue, TokenStack};

use crate::filter::{FilterQuery, parse_filter};
use crate::orderby::{OrderByQuery, parse_orderby};
use crate::search::{SearchQuery, parse_search};
use crate::select::{SelectQuery, parse_select};
use crate::tokenizer::Tokenizer;
use crate::topskip::{SkipQuery, TopQuery, parse_skip, parse_top};

static EXPAND_TOKENIZER: LazyLock<Tokenizer> = LazyLock::new(expand_tokenizer);

/// One item of an expand clause: the navigation path and its nested
/// options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandItem {
    pub path: Vec<Token>,
    pub filter: Option<FilterQuery>,
    pub at: Option<FilterQuery>,
    pub search: Option<SearchQuery>,
    pub order_by: Option<OrderByQuery>,
    pub skip: Option<SkipQuery>,
    pub top: Option<TopQuery>,
    pub select: Option<SelectQuery>,
    pub expand: Option<ExpandQuery>,
    pub levels: Option<i64>,
}

/// A parsed `$expand` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandQuery {
    pub items: Vec<ExpandItem>,
}

fn expand_tokenizer() -> Tokenizer {
    let mut t = Tokenizer::new();
    t.add(r"^\(", TokenKind::OpenParen);
    t.add(r"^\)", TokenKind::CloseParen);
    t.add(r"^/", TokenKind::Nav);
    t.add(r"^,", TokenKind::Comma);
    t.add(r"^;", TokenKind::Semicolon);
    t.add(r"^=", TokenKind::Equals);
    t.add(r"^[a-zA-Z0-9_'.:$ *]+", TokenKind::Literal);
    t
}

/// Parses an `$expand` clause into its items.
pub fn parse_expand(expand: &str) -> Result<ExpandQuery> {
    let tokens = EXPAND_TOKENIZER.tokenize(expand)?;

    let mut stack = TokenStack::new();
    let mut queue = TokenQueue::new();
    let mut items = Vec::new();

    for token in tokens {
        match token.value.as_str() {
            "(" => {
                queue.enqueue(token.clone());
                stack.push(token);
            }
            ")" => {
                if stack.pop().is_none() {
                    return Err(mismatched_parens());
                }
                queue.enqueue(token);
            }
            // Top-level commas separate items; nested ones stay queued.
            "," if stack.is_empty() => {
                items.push(parse_expand_item(queue)?);
                queue = TokenQueue::new();
            }
            _ => queue.enqueue(token),
        }
    }

    if !stack.is_empty() {
        return Err(mismatched_parens());
    }
    items.push(parse_expand_item(queue)?);

    Ok(ExpandQuery { items })
}

fn mismatched_parens() -> Error {
    Error::bad_request("mismatched parentheses in expand clause")
}

fn parse_expand_item(mut input: TokenQueue) -> Result<ExpandItem> {
    let mut item = ExpandItem::default();
    let mut stack = TokenStack::new();
    let mut queue = TokenQueue::new();

    while let Some(token) = input.dequeue() {
        if token.value == "(" {
            if stack.is_empty() {
                // A top-level paren ends the path and starts the options.
                if let Some(segment) = queue.dequeue() {
                    item.path.push(segment);
                }
            } else {
                queue.enqueue(token.clone());
            }
            stack.push(token);
        } else if token.value == ")" {
            if stack.pop().is_none() {
                return Err(mismatched_parens());
            }
            if stack.is_empty() {
                parse_expand_option(&mut queue, &mut item)?;
                queue = TokenQueue::new();
            } else {
                queue.enqueue(token);
            }
        } else if token.value == "/" && stack.is_empty() {
            // At root level, slashes separate path segments.
            if let Some(segment) = queue.dequeue() {
                item.path.push(segment);
            }
        } else if token.value == ";" && stack.len() == 1 {
            // Semicolons split options at the first nesting level only.
            parse_expand_option(&mut queue, &mut item)?;
            queue = TokenQueue::new();
        } else {
            queue.enqueue(token);
        }
    }

    if !stack.is_empty() {
        return Err(mismatched_parens());
    }
    if let Some(segment) = queue.dequeue() {
        item.path.push(segment);
    }

    Ok(item)
}

/// Consumes one `key=value` option queue into the item.
fn parse_expand_option(queue: &mut TokenQueue, item: &mut ExpandItem) -> Result<()> {
    let invalid = || Error::bad_request("invalid expand clause");
    let head = queue.dequeue().ok_or_else(invalid)?;
    match queue.dequeue() {
        Some(equals) if equals.value == "=" => {}
        _ => return Err(invalid()),
    }
    let body = queue.to_string();

    match head.value.trim() {
        "$filter" => item.filter = Some(parse_filter(&body)?),
        "at" => item.at = Some(parse_filter(&body)?),
        "$search" => item.search = Some(parse_search(&body)?),
        "$orderby" => item.order_by = Some(parse_orderby(&body)?),
        "$skip" => item.skip = Some(parse_skip(&body)?),
        "$top" => item.top = Some(parse_top(&body)?),
        "$select" => item.select = Some(parse_select(&body)?),
        "$expand" => item.expand = Some(parse_expand(&body)?),
        "$levels" => {
            let levels = body
                .parse()
                .map_err(|_| Error::bad_request(format!("invalid $levels value '{body}'")))?;
            item.levels = Some(levels);
        }
        // Unknown options pass through unparsed.
        _ => {}
    }
    Ok(())
}
