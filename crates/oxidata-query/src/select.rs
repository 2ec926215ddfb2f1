//! The `$select` query option.

use serde::{Deserialize, Serialize};

use oxidata_core::{Result, Token, TokenKind};

/// One selected property path, as `/`-separated segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectItem {
    pub segments: Vec<Token>,
}

/// A parsed `$select` clause plus the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectQuery {
    pub items: Vec<SelectItem>,
    pub raw_value: String,
}

/// Splits a `$select` clause into comma-separated items of `/`-separated
/// path segments.
pub fn parse_select(select: &str) -> Result<SelectQuery> {
    let items = select
        .split(',')
        .map(|item| SelectItem {
            segments: item
                .trim()
                .split('/')
                .map(|segment| Token::new(segment, TokenKind::Literal))
                .collect(),
        })
        .collect();
    Ok(SelectQuery {
        items,
        raw_value: select.to_string(),
    })
}
